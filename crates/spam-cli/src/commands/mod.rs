//! Subcommand implementations.

pub(crate) mod classify;
pub(crate) mod run;
pub(crate) mod signals;
