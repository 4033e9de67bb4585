//! Visible job collections per listing scope.
//!
//! Hidden is a global suppression: a hidden job disappears from every scope
//! except `hidden` itself. Results keep catalog order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::controller::PendingActions;
use crate::identifier::{CanonicalKey, JobId};
use crate::store::ActionSetStore;

/// Anything in the catalog that can be listed.
pub trait Listable {
    fn job_id(&self) -> &JobId;
}

impl Listable for JobId {
    fn job_id(&self) -> &JobId {
        self
    }
}

/// Job record as served by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Listable for JobPosting {
    fn job_id(&self) -> &JobId {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingScope {
    All,
    Favorite,
    Archived,
    Hidden,
}

impl ListingScope {
    pub const ALL: [ListingScope; 4] = [
        ListingScope::All,
        ListingScope::Favorite,
        ListingScope::Archived,
        ListingScope::Hidden,
    ];

    /// The action set this scope filters on, if any.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            ListingScope::All => None,
            ListingScope::Favorite => Some(ActionKind::Favorite),
            ListingScope::Archived => Some(ActionKind::Archive),
            ListingScope::Hidden => Some(ActionKind::Hidden),
        }
    }
}

impl std::fmt::Display for ListingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingScope::All => write!(f, "all"),
            ListingScope::Favorite => write!(f, "favorite"),
            ListingScope::Archived => write!(f, "archived"),
            ListingScope::Hidden => write!(f, "hidden"),
        }
    }
}

impl std::str::FromStr for ListingScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ListingScope::All),
            "favorite" | "favorites" => Ok(ListingScope::Favorite),
            "archived" | "archive" => Ok(ListingScope::Archived),
            "hidden" => Ok(ListingScope::Hidden),
            other => Err(format!("unknown listing scope '{}'", other)),
        }
    }
}

/// A job admitted to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListedJob<'a, J> {
    pub job: &'a J,
    /// Set when a pending action will drop this job from the scope. The card
    /// renders as a placeholder until the grace window closes.
    pub leaving: Option<ActionKind>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeCounts {
    pub all: usize,
    pub favorite: usize,
    pub archived: usize,
    pub hidden: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Membership {
    favorite: bool,
    archived: bool,
    hidden: bool,
}

impl Membership {
    fn flipped(mut self, kind: ActionKind) -> Self {
        match kind {
            ActionKind::Favorite => self.favorite = !self.favorite,
            ActionKind::Archive => self.archived = !self.archived,
            ActionKind::Hidden => self.hidden = !self.hidden,
        }
        self
    }

    fn admitted_to(&self, scope: ListingScope) -> bool {
        match scope {
            ListingScope::All => !self.hidden,
            ListingScope::Favorite => self.favorite && !self.hidden,
            ListingScope::Archived => self.archived && !self.hidden,
            ListingScope::Hidden => self.hidden,
        }
    }
}

/// Canonical keys of all three sets, read once per listing pass.
struct MembershipIndex {
    favorite: HashSet<CanonicalKey>,
    archived: HashSet<CanonicalKey>,
    hidden: HashSet<CanonicalKey>,
}

impl MembershipIndex {
    fn read(store: &ActionSetStore) -> Self {
        Self {
            favorite: store.keys(ActionKind::Favorite),
            archived: store.keys(ActionKind::Archive),
            hidden: store.keys(ActionKind::Hidden),
        }
    }

    fn of(&self, key: &CanonicalKey) -> Membership {
        Membership {
            favorite: self.favorite.contains(key),
            archived: self.archived.contains(key),
            hidden: self.hidden.contains(key),
        }
    }
}

/// Jobs from `catalog` visible under `scope`, in catalog order.
pub fn visible<'a, J: Listable>(
    catalog: &'a [J],
    scope: ListingScope,
    store: &ActionSetStore,
) -> Vec<&'a J> {
    let index = MembershipIndex::read(store);
    catalog
        .iter()
        .filter(|job| index.of(&job.job_id().key()).admitted_to(scope))
        .collect()
}

/// Like [`visible`], but accounts for actions still inside their grace
/// window.
///
/// Admission still follows stored membership, so a pending toggle never
/// admits a job early. A pending toggle that would drop an admitted job
/// flags it as `leaving` instead.
pub fn visible_with_pending<'a, J: Listable>(
    catalog: &'a [J],
    scope: ListingScope,
    store: &ActionSetStore,
    pending: &PendingActions,
) -> Vec<ListedJob<'a, J>> {
    let index = MembershipIndex::read(store);
    catalog
        .iter()
        .filter_map(|job| {
            let key = job.job_id().key();
            let membership = index.of(&key);
            if !membership.admitted_to(scope) {
                return None;
            }
            let leaving = pending
                .kinds_for(&key)
                .into_iter()
                .find(|kind| !membership.flipped(*kind).admitted_to(scope));
            Some(ListedJob { job, leaving })
        })
        .collect()
}

/// Number of visible jobs per scope, for tab badges.
pub fn counts<J: Listable>(catalog: &[J], store: &ActionSetStore) -> ScopeCounts {
    let index = MembershipIndex::read(store);
    let mut counts = ScopeCounts::default();
    for job in catalog {
        let membership = index.of(&job.job_id().key());
        for scope in ListingScope::ALL {
            if membership.admitted_to(scope) {
                match scope {
                    ListingScope::All => counts.all += 1,
                    ListingScope::Favorite => counts.favorite += 1,
                    ListingScope::Archived => counts.archived += 1,
                    ListingScope::Hidden => counts.hidden += 1,
                }
            }
        }
    }
    counts
}
