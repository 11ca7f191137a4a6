/// Convert free text into the dictionary's URL path segment.
///
/// Trims, lowercases, collapses every whitespace run into a single hyphen,
/// then drops anything outside `[a-z0-9-']`. Accented letters are dropped
/// rather than transliterated, so "Façade" becomes "faade".
///
/// An empty result is possible (e.g. for "!!!"); callers must not fetch it.
pub fn slugify(word: &str) -> String {
    let hyphenated = word
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    hyphenated.chars().filter(|&c| is_slug_char(c)).collect()
}

/// Name of the archive entry holding the clip for `slug`.
pub fn archive_file_name(slug: &str) -> String {
    format!("{slug}.mp3")
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '\''
}
