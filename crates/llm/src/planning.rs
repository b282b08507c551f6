//! Planner-output parsing.
//!
//! Planner text arrives in three shapes: a single comma/semicolon-delimited
//! line, numbered or bulleted lines, or plain lines. All three reduce to a
//! clean list of subtopic titles.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scout_core::constants::MAX_SUBTOPICS;

/// Optional leading `1.` / `2)` / `-` / `*` marker on a list line.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    // compile-time constant pattern
    Regex::new(r"^\s*(?:\d+[.)]\s*|[-*]\s*)?(.*)$").expect("valid list marker pattern")
});

/// Parse planner output into subtopic titles.
///
/// De-duplicates case-insensitively, preserving first-seen order, and caps
/// the result at [`MAX_SUBTOPICS`] items. An empty result is the caller's
/// abort condition, not an error here.
#[must_use]
pub fn parse_subtopics(planner_text: &str) -> Vec<String> {
    let lines: Vec<&str> = planner_text.trim().lines().collect();
    let mut items: Vec<String> = Vec::new();

    if let [single] = lines.as_slice()
        && (single.contains(',') || single.contains(';'))
    {
        items.extend(
            single.split([';', ',']).map(str::trim).filter(|p| !p.is_empty()).map(str::to_owned),
        );
    } else {
        for line in lines {
            if let Some(captures) = LIST_MARKER.captures(line.trim())
                && let Some(m) = captures.get(1)
            {
                let value = m.as_str().trim();
                if !value.is_empty() {
                    items.push(value.to_owned());
                }
            }
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if seen.insert(item.to_lowercase()) {
            out.push(item);
            if out.len() >= MAX_SUBTOPICS {
                break;
            }
        }
    }
    out
}
