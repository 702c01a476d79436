//! Marker-bounded text splicing.
//!
//! All operations are pure functions over file contents held in memory;
//! `splice::rewrite` is the thin I/O boundary around them. Anchors and
//! region markers are located by exact substring match on a line, the same
//! convention the scaffolder's own rewrite utilities use. Anchor text is
//! never altered, only the content around it.

use thiserror::Error;

/// A named region delimited by a start/end marker comment pair.
///
/// Zero or more regions with the same identifier may exist in a file
/// (redundant historical regions included) and all of them are removed on
/// regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRegion {
    pub identifier: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

impl MarkerRegion {
    pub const fn new(identifier: &'static str, start: &'static str, end: &'static str) -> Self {
        Self {
            identifier,
            start,
            end,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("anchor marker `{0}` not found")]
    AnchorNotFound(String),

    #[error("start marker for region `{0}` has no matching end marker")]
    DanglingStart(String),
}

/// Remove every block bounded by a line containing `region.start` and the
/// nearest following line containing `region.end`, both inclusive.
///
/// Returns the new content and the number of blocks removed; zero blocks is
/// a no-op, not an error. A start marker without a matching end marker means
/// the file no longer follows the region convention and fails loudly.
pub fn remove_regions(content: &str, region: &MarkerRegion) -> Result<(String, usize), SpliceError> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut removed = 0usize;

    let mut i = 0;
    while i < lines.len() {
        if lines[i].contains(region.start) {
            let end = lines[i + 1..].iter().position(|line| line.contains(region.end));
            match end {
                Some(offset) => {
                    removed += 1;
                    i += offset + 2;
                }
                None => return Err(SpliceError::DanglingStart(region.identifier.to_string())),
            }
        } else {
            kept.push(lines[i]);
            i += 1;
        }
    }

    Ok((kept.join("\n"), removed))
}

/// Insert `block` immediately above the first line containing `anchor`,
/// re-indented to the anchor line's leading whitespace. The anchor line is
/// left intact so future insertions can target it again.
pub fn insert_above(content: &str, anchor: &str, block: &str) -> Result<String, SpliceError> {
    splice_at_anchor(content, anchor, block, Placement::Above)
}

/// Insert `block` immediately below the first line containing `anchor`.
pub fn insert_below(content: &str, anchor: &str, block: &str) -> Result<String, SpliceError> {
    splice_at_anchor(content, anchor, block, Placement::Below)
}

enum Placement {
    Above,
    Below,
}

fn splice_at_anchor(
    content: &str,
    anchor: &str,
    block: &str,
    placement: Placement,
) -> Result<String, SpliceError> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 8);
    let mut spliced = false;

    for line in &lines {
        let hit = !spliced && line.contains(anchor);
        if hit {
            spliced = true;
            let indent = leading_whitespace(line);
            match placement {
                Placement::Above => {
                    push_block(&mut out, block, indent);
                    out.push((*line).to_string());
                }
                Placement::Below => {
                    out.push((*line).to_string());
                    push_block(&mut out, block, indent);
                }
            }
        } else {
            out.push((*line).to_string());
        }
    }

    if !spliced {
        return Err(SpliceError::AnchorNotFound(anchor.to_string()));
    }
    Ok(out.join("\n"))
}

fn push_block(out: &mut Vec<String>, block: &str, indent: &str) {
    for line in block.trim_end_matches('\n').split('\n') {
        if line.is_empty() {
            out.push(String::new());
        } else {
            out.push(format!("{indent}{line}"));
        }
    }
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(line.len());
    &line[..end]
}

/// Replace every literal occurrence of `needle`. Zero occurrences is a
/// no-op; the count is returned for callers that want to log it.
pub fn replace_literal(content: &str, needle: &str, replacement: &str) -> (String, usize) {
    let count = content.matches(needle).count();
    if count == 0 {
        return (content.to_string(), 0);
    }
    (content.replace(needle, replacement), count)
}

/// Trim whitespace-only lines to empty and collapse every run of
/// consecutive blank lines to a single one, keeping regenerated files
/// visually stable across runs. Idempotent.
pub fn collapse_blank_lines(content: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut previous_blank = false;
    for line in content.split('\n') {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        out.push(if blank { "" } else { line });
        previous_blank = blank;
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REGION: MarkerRegion = MarkerRegion::new("demo", "demo-region-start", "demo-region-end");

    #[test]
    fn test_remove_single_region() {
        let content = "a\n// demo-region-start\nbody\n// demo-region-end\nb\n";
        let (result, removed) = remove_regions(content, &REGION).unwrap();
        assert_eq!(result, "a\nb\n");
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_remove_all_redundant_regions() {
        let content = "\
head
// demo-region-start
one
// demo-region-end
middle
// demo-region-start
two
// demo-region-end
tail
";
        let (result, removed) = remove_regions(content, &REGION).unwrap();
        assert_eq!(result, "head\nmiddle\ntail\n");
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_remove_missing_region_is_noop() {
        let content = "a\nb\n";
        let (result, removed) = remove_regions(content, &REGION).unwrap();
        assert_eq!(result, content);
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_dangling_start_marker_fails() {
        let content = "a\n// demo-region-start\nbody\n";
        let err = remove_regions(content, &REGION).unwrap_err();
        assert_eq!(err, SpliceError::DanglingStart("demo".to_string()));
    }

    #[test]
    fn test_remove_region_with_interior_blank_line() {
        let content = "a\n// demo-region-start\none\n\ntwo\n// demo-region-end\nb\n";
        let (result, _) = remove_regions(content, &REGION).unwrap();
        assert_eq!(result, "a\nb\n");
    }

    #[test]
    fn test_insert_above_indents_to_anchor() {
        let content = "class A {\n    // the-anchor\n}\n";
        let result = insert_above(content, "the-anchor", "int x;\n    int y;").unwrap();
        assert_eq!(result, "class A {\n    int x;\n        int y;\n    // the-anchor\n}\n");
    }

    #[test]
    fn test_insert_below_keeps_anchor_first() {
        let content = "import a;\nrest\n";
        let result = insert_below(content, "import a;", "import b;").unwrap();
        assert_eq!(result, "import a;\nimport b;\nrest\n");
    }

    #[test]
    fn test_insert_targets_first_anchor_only() {
        let content = "    // spot\n    // spot\n";
        let result = insert_above(content, "// spot", "x").unwrap();
        assert_eq!(result, "    x\n    // spot\n    // spot\n");
    }

    #[test]
    fn test_insert_missing_anchor_fails() {
        let err = insert_above("nothing here\n", "// spot", "x").unwrap_err();
        assert_eq!(err, SpliceError::AnchorNotFound("// spot".to_string()));
    }

    #[test]
    fn test_replace_literal_counts_occurrences() {
        let (result, count) = replace_literal("x y x\n", "x", "z");
        assert_eq!(result, "z y z\n");
        assert_eq!(count, 2);

        let (result, count) = replace_literal("x y\n", "q", "z");
        assert_eq!(result, "x y\n");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_collapse_blank_lines() {
        let content = "a\n\n\n\nb\n   \nc\n";
        assert_eq!(collapse_blank_lines(content), "a\n\nb\n\nc\n");
    }

    #[test]
    fn test_collapse_blank_lines_is_idempotent() {
        let content = "a\n\n\nb\n\t\n\nc\n";
        let once = collapse_blank_lines(content);
        assert_eq!(collapse_blank_lines(&once), once);
    }

    #[test]
    fn test_remove_then_insert_round_trip() {
        let base = "head\n    // the-anchor\ntail\n";
        let block = "// demo-region-start\nbody\n// demo-region-end";

        let first = insert_above(base, "the-anchor", block).unwrap();
        let (stripped, removed) = remove_regions(&first, &REGION).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(stripped, base);

        let second = insert_above(&stripped, "the-anchor", block).unwrap();
        assert_eq!(second, first);
    }
}
