//! Common utilities and helpers

pub mod mime;
pub mod time;
