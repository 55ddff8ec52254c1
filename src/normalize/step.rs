use crate::model::Step;
use regex::Regex;
use std::sync::LazyLock;

static ENUMERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("Invalid enumeration regex"));

static STEP_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^step\s*\d+\s*:\s*").expect("Invalid step label regex"));

/// Remove a leading "1." marker.
fn strip_enumeration(line: &str) -> &str {
    match ENUMERATION.find(line) {
        Some(found) => &line[found.end()..],
        None => line,
    }
}

fn strip_step_label(line: &str) -> &str {
    match STEP_LABEL.find(line) {
        Some(found) => &line[found.end()..],
        None => line,
    }
}

/// Clean one instruction line. Blank results are dropped.
pub fn parse_step(line: &str) -> Option<Step> {
    let text = strip_step_label(strip_enumeration(line.trim())).trim();
    (!text.is_empty()).then(|| Step {
        text: text.to_string(),
    })
}
