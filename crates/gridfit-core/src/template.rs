//! Track-list tokenizer.
//!
//! Expands `repeat(count, value)` occurrences and splits the expanded text
//! on top-level whitespace, so `minmax(100px, 1fr)` stays one token.
//! Token content is checked by [`crate::syntax`].

/// One column or row sizing token, e.g. `1fr` or `minmax(100px,1fr)`.
pub type Track = String;

/// Track list used when a template is empty or yields no tokens.
pub const DEFAULT_TRACK: &str = "1fr";

/// Expansion stops once the expanded template would grow beyond this.
pub const MAX_EXPANDED_LEN: usize = 64 * 1024;

const REPEAT_OPEN: &str = "repeat(";

// ─── Public API ───────────────────────────────────────────────────────────

/// Parse a track-list string into its ordered tokens.
///
/// Blank input, or input that tokenizes to nothing, yields `["1fr"]`.
#[must_use]
pub fn parse_template(template: &str) -> Vec<Track> {
    if template.trim().is_empty() {
        return vec![DEFAULT_TRACK.to_string()];
    }

    let expanded = expand_repeats(template);
    let tracks = tokenize(&expanded);
    if tracks.is_empty() {
        log::debug!("template `{template}` produced no tracks, using `{DEFAULT_TRACK}`");
        return vec![DEFAULT_TRACK.to_string()];
    }

    log::trace!("template `{template}` -> {tracks:?}");
    tracks
}

/// Expand every `repeat(count, value)` in `template`, innermost last.
///
/// A malformed occurrence (missing `)`, missing top-level comma, count that
/// is not an integer ≥ 1) is left literal and stops further expansion.
#[must_use]
pub fn expand_repeats(template: &str) -> String {
    let mut out = template.to_string();
    while let Some(start) = out.find(REPEAT_OPEN) {
        match expand_at(&out, start) {
            Some(expanded) => out = expanded,
            None => {
                log::debug!("leaving malformed `repeat(` literal in `{template}`");
                break;
            }
        }
    }
    out
}

/// Join tracks back into template text.
#[must_use]
pub fn join_tracks(tracks: &[Track]) -> String {
    tracks.join(" ")
}

// ─── Expansion ────────────────────────────────────────────────────────────

/// Replace the `repeat(` span starting at byte `start` with its expansion.
fn expand_at(text: &str, start: usize) -> Option<String> {
    let open = start + REPEAT_OPEN.len() - 1;
    let close = matching_paren(text, open)?;
    let inner = &text[open + 1..close];

    let comma = top_level_comma(inner)?;
    let count = inner[..comma]
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)?;
    let value = inner[comma + 1..].trim();

    let expanded_len = count
        .checked_mul(value.len() + 1)
        .and_then(|n| n.checked_add(text.len() - (close + 1 - start)));
    if expanded_len.is_none_or(|len| len > MAX_EXPANDED_LEN) {
        log::debug!("repeat({count}, {value}) would exceed {MAX_EXPANDED_LEN} bytes");
        return None;
    }

    let repeated = vec![value; count].join(" ");
    Some(format!("{}{}{}", &text[..start], repeated, &text[close + 1..]))
}

/// Byte index of the `)` closing the `(` at `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte index of the first comma not nested inside any bracket pair.
fn top_level_comma(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

// ─── Tokenizer ────────────────────────────────────────────────────────────

/// Split on whitespace that is not nested inside `()`, `[]` or `{}`.
fn tokenize(text: &str) -> Vec<Track> {
    let mut tracks = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tracks.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tracks.push(current);
    }
    tracks
}

// ─── Tests ────────────────────────────────────────────────────────────────
