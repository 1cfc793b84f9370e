//! Display helpers shared by the commands

mod date;

pub use date::*;

/// Format reading time for display (e.g. "5 min read")
pub fn format_reading_time(minutes: u32) -> String {
    format!("{} min read", minutes)
}
