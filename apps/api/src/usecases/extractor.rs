//! Use-case extraction: turns a model's free-text list into at most four clean entries.
//!
//! Two passes over the same text:
//! 1. split on line-anchored `N.` markers, dropping any preamble before the first marker;
//! 2. if that finds fewer than four, split on lines and strip per-line markers.
//!
//! The line pass wins only when it finds at least as many entries as the marker pass.

use std::sync::OnceLock;

use regex::Regex;

/// Upper bound on entries returned to the caller.
pub const MAX_USE_CASES: usize = 4;

/// Entries with this many characters or fewer are treated as noise.
pub const MIN_USE_CASE_CHARS: usize = 10;

fn enumeration_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]*").expect("valid enumeration regex"))
}

fn line_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ \t]*(?:\d+\.[ \t]*|[-*•][ \t]+)").expect("valid line marker regex")
    })
}

/// Extracts up to [`MAX_USE_CASES`] use cases from raw model output, in emission order.
///
/// Never fails: an unhelpful reply yields fewer entries, possibly none.
pub fn extract_use_cases(raw: &str) -> Vec<String> {
    let primary = split_on_enumeration(raw);
    if primary.len() >= MAX_USE_CASES {
        return primary;
    }

    let fallback = split_on_lines(raw);
    if fallback.len() >= primary.len() {
        fallback
    } else {
        primary
    }
}

fn split_on_enumeration(raw: &str) -> Vec<String> {
    let marker = enumeration_marker();
    let mut segments = marker.split(raw);
    if marker.is_match(raw) {
        // Whatever precedes the first marker is an introduction, not a use case.
        segments.next();
    }
    keep_candidates(segments)
}

fn split_on_lines(raw: &str) -> Vec<String> {
    let marker = line_marker();
    let lines = raw
        .lines()
        .map(|line| marker.replace(line, ""))
        // "Here are four use cases:" style headings
        .filter(|line| !line.trim_end().ends_with(':'));
    keep_candidates(lines)
}

fn keep_candidates<I, S>(segments: I) -> Vec<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .filter_map(|segment| {
            let trimmed = segment.as_ref().trim();
            (trimmed.chars().count() > MIN_USE_CASE_CHARS).then(|| trimmed.to_string())
        })
        .take(MAX_USE_CASES)
        .collect()
}
