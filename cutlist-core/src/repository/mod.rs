//! Stateful coordination over the saved-project store.

mod saved_projects;

pub use saved_projects::{Mirror, SavedProjectRepository};
