//! Minimal HTML escaping for chat transcripts
//!
//! History lines use a handful of inline tags for markup, so user-supplied
//! text must have its formatting characters neutralized before it joins
//! the transcript.

/// Escape `&`, `<`, and `>` in `text`, every occurrence.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
