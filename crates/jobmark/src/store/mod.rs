pub mod action_sets;
pub mod preferences;
mod save_order;

pub use action_sets::{ActionSetStore, DEFAULT_PAD_WIDTH};
pub use preferences::PreferenceStore;
