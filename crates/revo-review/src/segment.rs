//! Fixed-width segmentation

use std::num::NonZeroUsize;

/// Split `text` into consecutive slices of `max_chars` characters
///
/// Every slice but the last holds exactly `max_chars` characters; the last
/// holds between 1 and `max_chars`. Slicing ignores lines and hunks, never
/// splits a character, and the slices concatenate back to `text`. Empty text
/// gives no slices.
pub fn segment(text: &str, max_chars: NonZeroUsize) -> Vec<&str> {
    let max = max_chars.get();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max {
            segments.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if count > 0 {
        segments.push(&text[start..]);
    }

    segments
}
