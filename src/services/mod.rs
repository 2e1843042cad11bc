//! Collaborators the widgets depend on but never construct
//!
//! `UserSource` feeds the list, `Submitter` performs the insert call. Both are async
//! traits so tests can swap in instant, failing or hanging implementations.

pub mod submitter;
pub mod user_source;

pub use submitter::{SimulatedSubmitter, SubmitError, Submitter};
pub use user_source::{MockUserService, SourceError, UserSource};
