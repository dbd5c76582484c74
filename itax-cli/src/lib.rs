//! Command-line front end for the regime comparison engine.

pub mod format;
pub mod logging;
pub mod report;
