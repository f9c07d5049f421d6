//! Command planning
//!
//! Turns a profile and a request, or a raw ad-hoc command string, into the
//! argument vector handed to the launcher.

pub mod adhoc;
pub mod profiles;

pub use adhoc::tokenize;
pub use profiles::ProfileCommandBuilder;
