//! CLI commands

pub mod hook;
pub mod list;
pub mod new;
pub mod show;
pub mod validate;
