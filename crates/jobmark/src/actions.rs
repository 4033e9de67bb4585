//! Action kinds and their persisted shapes.

use serde::{Deserialize, Serialize};

/// One of the three orthogonal tags a user can put on a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Favorite,
    Archive,
    Hidden,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Favorite, ActionKind::Archive, ActionKind::Hidden];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Favorite => "favorite",
            ActionKind::Archive => "archive",
            ActionKind::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "favorite" | "favorites" => Ok(ActionKind::Favorite),
            "archive" | "archived" => Ok(ActionKind::Archive),
            "hidden" | "hide" => Ok(ActionKind::Hidden),
            other => Err(format!("unknown action kind '{}'", other)),
        }
    }
}

/// Persisted action sets, one list of stored identifier strings per kind.
///
/// Entries keep the exact string they were stored with; lookups normalize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSetSnapshot {
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub archived: Vec<String>,
    #[serde(default)]
    pub hidden: Vec<String>,
}

impl ActionSetSnapshot {
    pub fn entries(&self, kind: ActionKind) -> &[String] {
        match kind {
            ActionKind::Favorite => &self.favorites,
            ActionKind::Archive => &self.archived,
            ActionKind::Hidden => &self.hidden,
        }
    }

    pub fn entries_mut(&mut self, kind: ActionKind) -> &mut Vec<String> {
        match kind {
            ActionKind::Favorite => &mut self.favorites,
            ActionKind::Archive => &mut self.archived,
            ActionKind::Hidden => &mut self.hidden,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.archived.is_empty() && self.hidden.is_empty()
    }
}

/// Persisted "skip confirmation" flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub archive: bool,
}

impl PreferenceSnapshot {
    pub fn get(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Favorite => self.favorite,
            ActionKind::Archive => self.archive,
            ActionKind::Hidden => self.hide,
        }
    }

    pub fn set(&mut self, kind: ActionKind, value: bool) {
        match kind {
            ActionKind::Favorite => self.favorite = value,
            ActionKind::Archive => self.archive = value,
            ActionKind::Hidden => self.hide = value,
        }
    }
}
