//! Named-area grid parser.
//!
//! Accepts the quoted form (`"header header" "side main"`) and the legacy
//! newline form (one row per line, no quotes). Rows must have equal cell
//! counts; anything else is a structural failure and yields `None`.
//!
//! Area bounds are bounding boxes: an area whose cells do not form a solid
//! rectangle still gets the box around all of its cells.

use crate::name::AreaName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write;

/// A rectangular matrix of cell labels, `.` marking an empty cell.
///
/// Only built by [`parse_areas`], which rejects ragged rows; serialize-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaGrid {
    rows: Vec<Vec<AreaName>>,
}

/// Inclusive, zero-based bounding box of one area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaBounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl AreaBounds {
    /// The box as a `grid-area` line quadruple: `row-start / col-start / row-end / col-end`.
    pub fn to_grid_area(&self) -> String {
        format!(
            "{} / {} / {} / {}",
            self.min_row + 1,
            self.min_col + 1,
            self.max_row + 2,
            self.max_col + 2
        )
    }

    pub fn row_span(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn col_span(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

impl AreaGrid {
    pub fn rows(&self) -> &[Vec<AreaName>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cells per row. Every row has this length.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<AreaName> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Labels as plain strings, row by row.
    pub fn to_labels(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(AreaName::as_str).collect())
            .collect()
    }

    /// Canonical `grid-template-areas` text: `"a b" "c d"`.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push('"');
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{cell}");
            }
            out.push('"');
        }
        out
    }
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Parse named-area text into a grid.
///
/// Returns `None` when no rows are found, a quote is left open, a row has
/// no cells, or rows differ in length.
#[must_use]
pub fn parse_areas(input: &str) -> Option<AreaGrid> {
    let row_texts = if input.contains('"') || input.contains('\'') {
        quoted_rows(input)?
    } else {
        newline_rows(input)
    };

    if row_texts.is_empty() {
        return None;
    }

    let rows: Vec<Vec<AreaName>> = row_texts
        .iter()
        .map(|text| split_cells(text).into_iter().map(AreaName::intern).collect())
        .collect();

    let width = rows[0].len();
    if width == 0 {
        log::debug!("area row 0 has no cells");
        return None;
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        log::debug!(
            "area row {i} has {} cells, expected {width}; named areas disabled",
            row.len()
        );
        return None;
    }

    Some(AreaGrid { rows })
}

/// Every distinct label in the grid except `.`.
#[must_use]
pub fn unique_area_names(grid: &AreaGrid) -> BTreeSet<AreaName> {
    grid.rows
        .iter()
        .flatten()
        .filter(|cell| !cell.is_empty_cell())
        .copied()
        .collect()
}

/// Bounding box of every cell labelled `name`, or `None` if it never appears.
#[must_use]
pub fn compute_area_bounds(grid: &AreaGrid, name: &str) -> Option<AreaBounds> {
    let mut bounds: Option<AreaBounds> = None;
    for (r, row) in grid.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if cell.as_str() != name {
                continue;
            }
            bounds = Some(match bounds {
                None => AreaBounds {
                    min_row: r,
                    max_row: r,
                    min_col: c,
                    max_col: c,
                },
                Some(b) => AreaBounds {
                    min_row: b.min_row.min(r),
                    max_row: b.max_row.max(r),
                    min_col: b.min_col.min(c),
                    max_col: b.max_col.max(c),
                },
            });
        }
    }
    bounds
}

// ─── Row extraction ───────────────────────────────────────────────────────

/// Text between each matching quote pair, in order. `"` and `'` both open
/// a row, which is closed by the same character.
fn quoted_rows(input: &str) -> Option<Vec<&str>> {
    let mut rows = Vec::new();
    let mut rest = input;
    while let Some(open) = rest.find(['"', '\'']) {
        let quote = rest[open..].chars().next()?;
        let body = &rest[open + 1..];
        let Some(close) = body.find(quote) else {
            log::debug!("unterminated {quote} in area text");
            return None;
        };
        rows.push(&body[..close]);
        rest = &body[close + 1..];
    }
    Some(rows)
}

fn newline_rows(input: &str) -> Vec<&str> {
    input
        .split('\n')
        .map(|line| line.trim_end_matches('\r').trim())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split a row on runs of spaces and tabs.
fn split_cells(row: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in row.char_indices() {
        if c == ' ' || c == '\t' {
            if let Some(s) = start.take() {
                cells.push(&row[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        cells.push(&row[s..]);
    }
    cells
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(grid: &AreaGrid) -> Vec<String> {
        unique_area_names(grid)
            .into_iter()
            .map(|n| n.as_str().to_string())
            .collect()
    }

    #[test]
    fn quoted_rows_parse() {
        let grid = parse_areas("\"header header\"\n\"side main\"").unwrap();
        assert_eq!(
            grid.to_labels(),
            vec![vec!["header", "header"], vec!["side", "main"]]
        );
        assert_eq!(names(&grid), vec!["header", "main", "side"]);
    }

    #[test]
    fn single_quoted_rows_on_one_line() {
        let grid = parse_areas("'a a' 'b c'").unwrap();
        assert_eq!(grid.to_labels(), vec![vec!["a", "a"], vec!["b", "c"]]);
    }

    #[test]
    fn mixed_quote_kinds_close_on_the_same_character() {
        let grid = parse_areas("\"it's\" 'x'").unwrap();
        assert_eq!(grid.to_labels(), vec![vec!["it's"], vec!["x"]]);
    }

    #[test]
    fn row_length_mismatch_is_none() {
        assert!(parse_areas("\"a b\"\n\"c\"").is_none());
    }

    #[test]
    fn grid_serializes_as_label_rows() {
        let grid = parse_areas("\"a b\" \". b\"").unwrap();
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            serde_json::json!({ "rows": [["a", "b"], [".", "b"]] })
        );
    }

    #[test]
    fn unterminated_quote_is_none() {
        assert!(parse_areas("\"a b\" \"c d").is_none());
    }

    #[test]
    fn empty_input_is_none() {
        assert!(parse_areas("").is_none());
        assert!(parse_areas("  \n\n ").is_none());
        assert!(parse_areas("\"\"").is_none());
    }

    #[test]
    fn legacy_newline_form_with_crlf() {
        let grid = parse_areas("header header\r\n\r\n  nav\tmain  \r\n").unwrap();
        assert_eq!(
            grid.to_labels(),
            vec![vec!["header", "header"], vec!["nav", "main"]]
        );
    }

    #[test]
    fn tabs_and_runs_of_spaces_split_cells() {
        let grid = parse_areas("\"a \t  b\t\tc\"").unwrap();
        assert_eq!(grid.to_labels(), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn dots_are_not_area_names() {
        let grid = parse_areas("\". top\" \"left .\"").unwrap();
        assert_eq!(names(&grid), vec!["left", "top"]);
    }

    #[test]
    fn bounds_of_rectangular_areas() {
        let grid = parse_areas("\"a a b\" \"a a b\"").unwrap();
        assert_eq!(
            compute_area_bounds(&grid, "a"),
            Some(AreaBounds {
                min_row: 0,
                max_row: 1,
                min_col: 0,
                max_col: 1
            })
        );
        assert_eq!(
            compute_area_bounds(&grid, "b"),
            Some(AreaBounds {
                min_row: 0,
                max_row: 1,
                min_col: 2,
                max_col: 2
            })
        );
        assert_eq!(compute_area_bounds(&grid, "zzz"), None);
    }

    #[test]
    fn bounds_of_l_shape_cover_the_whole_box() {
        let grid = parse_areas("\"a a\" \"a b\"").unwrap();
        let bounds = compute_area_bounds(&grid, "a").unwrap();
        assert_eq!((bounds.row_span(), bounds.col_span()), (2, 2));
        assert_eq!(bounds.to_grid_area(), "1 / 1 / 3 / 3");
    }

    #[test]
    fn css_output_reparses_identically() {
        let grid = parse_areas("header header\nside main").unwrap();
        assert_eq!(grid.to_css(), "\"header header\" \"side main\"");
        assert_eq!(parse_areas(&grid.to_css()), Some(grid));
    }

    #[test]
    fn grid_dimensions() {
        let grid = parse_areas("\"a b c\" \"d e f\"").unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.cell(1, 2).map(|c| c.as_str().to_string()), Some("f".into()));
        assert_eq!(grid.cell(2, 0), None);
    }
}
