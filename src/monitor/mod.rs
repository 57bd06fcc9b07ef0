//! Monitor core: the observation registry, the reporter that turns it into a
//! traffic report, and the cooperative scheduler driving both off one clock.
pub mod config;
pub mod registry;
pub mod reporter;
pub mod scheduler;
