//! Game Settings Library
//!
//! Layered composition of gamemode settings: a global tier, a per-gamemode
//! tier and a per-level tier merged field by field, where higher tiers only
//! replace what they explicitly set.

pub mod cli;
pub mod error;
pub mod format;
pub mod logging;
pub mod merge;
pub mod settings;
