//! Reading time estimation

/// Average adult reading speed
pub const WORDS_PER_MINUTE: u32 = 200;

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `text` at [`WORDS_PER_MINUTE`], rounded up, never below 1
pub fn estimate(text: &str) -> u32 {
    estimate_with(text, WORDS_PER_MINUTE)
}

/// Same as [`estimate`] with a custom reading speed
pub fn estimate_with(text: &str, words_per_minute: u32) -> u32 {
    let per_minute = words_per_minute.max(1) as usize;
    let minutes = word_count(text).div_ceil(per_minute).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
