//! Token grammars shared by placement resolution and validation.
//!
//! Built on `winnow` 0.7. Each public function checks one whole value;
//! none of them allocate unless they return owned data.

use crate::template::parse_template;
use winnow::ascii::{digit1, space0, space1};
use winnow::combinator::{alt, delimited, opt, preceded, separated};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

// ─── Keyword tables ──────────────────────────────────────────────────────

/// Values for `justify-items` / `align-items`.
pub const ITEMS_ALIGNMENT: &[&str] = &[
    "normal",
    "stretch",
    "start",
    "end",
    "center",
    "baseline",
    "left",
    "right",
    "self-start",
    "self-end",
    "flex-start",
    "flex-end",
];

/// Values for `justify-content` / `align-content`.
pub const CONTENT_ALIGNMENT: &[&str] = &[
    "normal",
    "stretch",
    "start",
    "end",
    "center",
    "left",
    "right",
    "flex-start",
    "flex-end",
    "space-between",
    "space-around",
    "space-evenly",
];

/// Keywords valid for min/max width/height besides lengths.
pub const SIZE_KEYWORDS: &[&str] = &[
    "auto",
    "none",
    "min-content",
    "max-content",
    "fit-content",
];

const FUNCTION_ESCAPES: &[&str] = &["calc(", "min(", "max(", "clamp(", "var(", "env("];

// ─── Grid lines ──────────────────────────────────────────────────────────

/// A parsed grid-line reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridLine {
    /// `""` or `auto`.
    Auto,
    /// `span N`, N ≥ 1.
    Span(u32),
    /// A nonzero line number; negative counts from the end.
    Number(i64),
    /// A named line such as `header-start`.
    Name(String),
}

/// Parse a grid-line value. `None` means the value is invalid.
pub fn parse_grid_line(value: &str) -> Option<GridLine> {
    let value = value.trim();
    if value.is_empty() || value == "auto" {
        return Some(GridLine::Auto);
    }
    grid_line.parse(value).ok()
}

/// `span N` with a positive integer N.
pub fn parse_span(value: &str) -> Option<u32> {
    span_count.parse(value.trim()).ok()
}

/// Area-name rule: a letter, then letters, digits, `-` or `_`.
/// `.` and empty are valid and mean "no area".
pub fn is_valid_area_name(value: &str) -> bool {
    value.is_empty() || value == "." || is_identifier(value)
}

/// A bare identifier: ASCII letter first, then letters, digits, `-`, `_`.
pub fn is_identifier(value: &str) -> bool {
    identifier.parse(value).is_ok()
}

fn grid_line(input: &mut &str) -> ModalResult<GridLine> {
    alt((
        span_count.map(GridLine::Span),
        integer.verify(|n: &i64| *n != 0).map(GridLine::Number),
        identifier
            .verify(|s: &str| s != "span")
            .map(|s: &str| GridLine::Name(s.to_string())),
    ))
    .parse_next(input)
}

fn span_count(input: &mut &str) -> ModalResult<u32> {
    preceded(("span", space1), digit1.try_map(|s: &str| s.parse::<u32>()))
        .verify(|n: &u32| *n > 0)
        .parse_next(input)
}

fn integer(input: &mut &str) -> ModalResult<i64> {
    (opt(one_of(['+', '-'])), digit1)
        .take()
        .try_map(|s: &str| s.parse::<i64>())
        .parse_next(input)
}

fn identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
    )
        .take()
        .parse_next(input)
}

// ─── Lengths ─────────────────────────────────────────────────────────────

/// A length or percentage (`10px`, `2.5rem`, `50%`, `0`), or a
/// `calc()`/`var()`-style function that is accepted without inspection.
pub fn is_length(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    is_function_escape(&value) || length.parse(value.as_str()).is_ok()
}

/// One or two lengths separated by whitespace (`gap: 10px 20px`).
pub fn is_gap(value: &str) -> bool {
    let parts = parse_template(value);
    (1..=2).contains(&parts.len()) && parts.iter().all(|p| is_length(p))
}

/// A min/max width or height value.
pub fn is_size_value(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    SIZE_KEYWORDS.contains(&lower.as_str()) || is_length(&lower)
}

fn is_function_escape(value: &str) -> bool {
    FUNCTION_ESCAPES.iter().any(|f| value.starts_with(f)) && value.ends_with(')')
}

fn number<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit1))).take(), ('.', digit1).take())),
    )
        .take()
        .parse_next(input)
}

fn unit<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        "px", "%", "rem", "em", "vw", "vh", "vmin", "vmax", "ch", "ex",
    ))
    .parse_next(input)
}

fn length<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((
        (number, unit).take(),
        number.verify(|s: &str| s.parse::<f64>() == Ok(0.0)),
    ))
    .parse_next(input)
}

fn flex<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (number.verify(|s: &str| !s.starts_with('-')), "fr")
        .take()
        .parse_next(input)
}

fn keyword<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt(("auto", "min-content", "max-content")).parse_next(input)
}

fn escape<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        alt(("calc(", "min(", "max(", "clamp(", "var(", "env(")),
        take_while(0.., |c: char| c != ')'),
        ')',
    )
        .take()
        .parse_next(input)
}

fn breadth<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    alt((flex, length, keyword, escape)).parse_next(input)
}

fn minmax<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        "minmax(",
        space0,
        breadth,
        space0,
        ',',
        space0,
        breadth,
        space0,
        ')',
    )
        .take()
        .parse_next(input)
}

fn fit_content<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited(("fit-content(", space0), length, (space0, ')')).parse_next(input)
}

fn line_names<'a>(input: &mut &'a str) -> ModalResult<Vec<&'a str>> {
    delimited(
        ('[', space0),
        separated(0.., identifier, space1),
        (space0, ']'),
    )
    .parse_next(input)
}

// ─── Track tokens ────────────────────────────────────────────────────────

/// What a single track-list token turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackToken {
    /// A sizing token: breadth, `minmax()`, `fit-content()`.
    Size,
    /// A `[name ...]` line-name group.
    LineNames(Vec<String>),
    /// `repeat(auto-fill|auto-fit, ...)`, resolved by the layout engine.
    AutoRepeat,
    /// A `repeat(` that was left unexpanded because it is malformed.
    BrokenRepeat,
    /// Anything else.
    Unknown,
}

impl TrackToken {
    pub fn is_sizing(&self) -> bool {
        matches!(self, TrackToken::Size | TrackToken::AutoRepeat)
    }
}

/// Classify one token produced by [`parse_template`].
pub fn classify_track(token: &str) -> TrackToken {
    let lower = token.to_ascii_lowercase();
    let lower = lower.as_str();

    if let Ok(names) = line_names.parse(token) {
        return TrackToken::LineNames(names.into_iter().map(str::to_string).collect());
    }
    if lower.starts_with("repeat(") {
        return classify_repeat(lower);
    }
    if alt((breadth, minmax, fit_content)).parse(lower).is_ok() {
        return TrackToken::Size;
    }
    TrackToken::Unknown
}

/// Only `auto-fill`/`auto-fit` repeats survive expansion legitimately.
fn classify_repeat(token: &str) -> TrackToken {
    let Some(inner) = token
        .strip_prefix("repeat(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return TrackToken::BrokenRepeat;
    };
    let Some((count, value)) = inner.split_once(',') else {
        return TrackToken::BrokenRepeat;
    };
    if !matches!(count.trim(), "auto-fill" | "auto-fit") {
        return TrackToken::BrokenRepeat;
    }
    let tracks = parse_template(value);
    let all_valid = tracks.iter().all(|t| match classify_track(t) {
        TrackToken::Size | TrackToken::LineNames(_) => true,
        TrackToken::AutoRepeat | TrackToken::BrokenRepeat | TrackToken::Unknown => false,
    });
    if all_valid {
        TrackToken::AutoRepeat
    } else {
        TrackToken::Unknown
    }
}

// ─── Keyword values ──────────────────────────────────────────────────────

/// `grid-auto-flow`: `row`, `column`, `dense`, or a direction plus `dense`.
pub fn is_auto_flow(value: &str) -> bool {
    let words: Vec<&str> = value.split_whitespace().collect();
    let directions = words
        .iter()
        .filter(|w| matches!(**w, "row" | "column"))
        .count();
    let dense = words.iter().filter(|w| **w == "dense").count();
    !words.is_empty() && directions <= 1 && dense <= 1 && directions + dense == words.len()
}

pub fn is_items_alignment(value: &str) -> bool {
    ITEMS_ALIGNMENT.contains(&value.trim())
}

pub fn is_self_alignment(value: &str) -> bool {
    value.trim() == "auto" || is_items_alignment(value)
}

pub fn is_content_alignment(value: &str) -> bool {
    CONTENT_ALIGNMENT.contains(&value.trim())
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_line_values() {
        assert_eq!(parse_grid_line(""), Some(GridLine::Auto));
        assert_eq!(parse_grid_line("auto"), Some(GridLine::Auto));
        assert_eq!(parse_grid_line("span 3"), Some(GridLine::Span(3)));
        assert_eq!(parse_grid_line("-2"), Some(GridLine::Number(-2)));
        assert_eq!(parse_grid_line("+4"), Some(GridLine::Number(4)));
        assert_eq!(
            parse_grid_line("header-start"),
            Some(GridLine::Name("header-start".into()))
        );
        assert_eq!(
            parse_grid_line("span-area"),
            Some(GridLine::Name("span-area".into()))
        );
    }

    #[test]
    fn invalid_grid_lines() {
        for value in ["0", "span", "span 0", "span x", "2x", "-", "1.5", "_a", "a b"] {
            assert_eq!(parse_grid_line(value), None, "`{value}` should be invalid");
        }
    }

    #[test]
    fn span_values() {
        assert_eq!(parse_span("span 2"), Some(2));
        assert_eq!(parse_span("span   12"), Some(12));
        assert_eq!(parse_span("span"), None);
        assert_eq!(parse_span("span -1"), None);
    }

    #[test]
    fn area_names() {
        assert!(is_valid_area_name(""));
        assert!(is_valid_area_name("."));
        assert!(is_valid_area_name("main_2"));
        assert!(is_valid_area_name("side-bar"));
        assert!(!is_valid_area_name("2col"));
        assert!(!is_valid_area_name("-x"));
        assert!(!is_valid_area_name("..."));
    }

    #[test]
    fn lengths() {
        for value in ["10px", "2.5rem", "50%", "0", "-4px", ".5em", "1vmax", "calc(100% - 2px)"] {
            assert!(is_length(value), "`{value}` should be a length");
        }
        for value in ["10", "px", "1fr", "10 px", "1.px"] {
            assert!(!is_length(value), "`{value}` should not be a length");
        }
    }

    #[test]
    fn gaps() {
        assert!(is_gap("10px"));
        assert!(is_gap("10px 2rem"));
        assert!(!is_gap("10px 2rem 3px"));
        assert!(!is_gap("wide"));
    }

    #[test]
    fn track_tokens() {
        for token in [
            "1fr",
            "0.5fr",
            "200px",
            "20%",
            "auto",
            "min-content",
            "MAX-CONTENT",
            "minmax(100px,1fr)",
            "minmax( 0 , 1fr )",
            "fit-content(300px)",
            "calc(100% - 10px)",
        ] {
            assert_eq!(classify_track(token), TrackToken::Size, "`{token}`");
        }
        assert_eq!(classify_track("-1fr"), TrackToken::Unknown);
        assert_eq!(classify_track("wide"), TrackToken::Unknown);
        assert_eq!(classify_track("minmax(1fr)"), TrackToken::Unknown);
    }

    #[test]
    fn line_name_groups() {
        assert_eq!(
            classify_track("[content-start main]"),
            TrackToken::LineNames(vec!["content-start".into(), "main".into()])
        );
        assert_eq!(classify_track("[]"), TrackToken::LineNames(vec![]));
        assert_eq!(classify_track("[1bad]"), TrackToken::Unknown);
    }

    #[test]
    fn repeat_literals() {
        assert_eq!(
            classify_track("repeat(auto-fill, minmax(120px, 1fr))"),
            TrackToken::AutoRepeat
        );
        assert_eq!(classify_track("repeat(0, 1fr)"), TrackToken::BrokenRepeat);
        assert_eq!(classify_track("repeat(2, 1fr"), TrackToken::BrokenRepeat);
        assert_eq!(classify_track("repeat(auto-fit, wide)"), TrackToken::Unknown);
    }

    #[test]
    fn keyword_values() {
        assert!(is_auto_flow("row"));
        assert!(is_auto_flow("column dense"));
        assert!(is_auto_flow("dense"));
        assert!(!is_auto_flow("row column"));
        assert!(!is_auto_flow("sideways"));
        assert!(!is_auto_flow(""));
        assert!(is_items_alignment("center"));
        assert!(!is_items_alignment("space-between"));
        assert!(is_content_alignment("space-between"));
        assert!(is_self_alignment("auto"));
        assert!(is_size_value("none"));
        assert!(is_size_value("640px"));
        assert!(!is_size_value("huge"));
    }
}
