use lazy_static::lazy_static;
use regex::Regex;

use crate::scoring::normalize::SCORE_MAX;

lazy_static! {
    // ASCII only: `\d` would also match other scripts' digits.
    static ref DIGIT_RUN_RE: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// First run of ASCII digits in `text`, clamped to 0–100. `0` when there is none.
/// Never fails.
pub fn extract_score(text: &str) -> u32 {
    let max = SCORE_MAX as u32;
    match DIGIT_RUN_RE.find(text.trim()) {
        // a run too long for u64 is far above the cap anyway
        Some(run) => run.as_str().parse::<u64>().map_or(max, |n| n.min(u64::from(max)) as u32),
        None => 0,
    }
}
