//! Free-text classification of calendar markers.
//!
//! Titles are matched permissively, case-insensitively and with any run of
//! whitespace between words, so people can write "Employee start day",
//! "EMPLOYEE  START DATE 60%" or "Summer vacation (half day)".
//!
//! | Kind              | Title must contain                          |
//! |-------------------|---------------------------------------------|
//! | EmploymentStart   | `employee` `start` `day`/`date`             |
//! | VacationBooking   | `holiday` or `vacation`                     |
//! | half-day hint     | `half` `day`                                |
//!
//! Words are matched as substrings ("holidays" counts as "holiday").

use crate::calendar::Marker;

const START_PHRASE: &[&[&str]] = &[&["employee"], &["start"], &["day", "date"]];
const VACATION_PHRASE: &[&[&str]] = &[&["holiday", "vacation"]];
const HALF_DAY_PHRASE: &[&[&str]] = &[&["half"], &["day"]];

/// Percentage found on an employment-start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtePercent {
    /// A percentage in `0..=100`. `00%` is taken literally and yields FTE 0.
    Percent(u8),
    /// No percentage anywhere: the FTE resets to full time.
    Absent,
}

impl FtePercent {
    /// Search the summary first, then the description, for `NN%` or `100%`.
    pub fn extract(summary: &str, description: &str) -> Self {
        match find_percent(summary).or_else(|| find_percent(description)) {
            Some(v) => FtePercent::Percent(v as u8),
            None => FtePercent::Absent,
        }
    }
}

/// What a marker means to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    EmploymentStart { fte_percent: FtePercent },
    VacationBooking { half_day_hint: bool },
    Ignored,
}

/// Classify a marker by its summary (and, for FTE, its description).
pub fn classify(marker: &Marker) -> Classification {
    classify_text(&marker.summary, &marker.description)
}

pub fn classify_text(summary: &str, description: &str) -> Classification {
    let title = summary.to_lowercase();
    if contains_phrase(&title, START_PHRASE) {
        return Classification::EmploymentStart {
            fte_percent: FtePercent::extract(summary, description),
        };
    }
    if contains_phrase(&title, VACATION_PHRASE) {
        return Classification::VacationBooking {
            half_day_hint: contains_phrase(&title, HALF_DAY_PHRASE),
        };
    }
    Classification::Ignored
}

/// True when `text` contains the words of `phrase` in order, separated by one
/// or more ASCII whitespace characters. Each slot lists alternatives; `text`
/// must already be lowercase.
fn contains_phrase(text: &str, phrase: &[&[&str]]) -> bool {
    text.char_indices()
        .any(|(i, _)| matches_at(&text[i..], phrase))
}

fn matches_at(text: &str, phrase: &[&[&str]]) -> bool {
    let Some((alternatives, rest)) = phrase.split_first() else {
        return true;
    };
    alternatives.iter().any(|word| {
        let Some(after) = text.strip_prefix(*word) else {
            return false;
        };
        if rest.is_empty() {
            return true;
        }
        let trimmed = after.trim_start_matches(|c: char| c.is_ascii_whitespace());
        trimmed.len() < after.len() && matches_at(trimmed, rest)
    })
}

/// Leftmost `NN%` / `NN %` / `100%` in `text`, where N is an ASCII digit.
/// The result is always at most 100.
///
/// At each position two digits are tried before three, so `150%` yields 50.
fn find_percent(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    (0..bytes.len()).find_map(|i| {
        let at = &bytes[i..];
        if at.len() >= 2
            && at[0].is_ascii_digit()
            && at[1].is_ascii_digit()
            && percent_follows(&at[2..])
        {
            return Some(u32::from(at[0] - b'0') * 10 + u32::from(at[1] - b'0'));
        }
        if at.starts_with(b"100") && percent_follows(&at[3..]) {
            return Some(100);
        }
        None
    })
}

fn percent_follows(rest: &[u8]) -> bool {
    match rest {
        [b'%', ..] => true,
        [ws, b'%', ..] => matches!(*ws, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C'),
        _ => false,
    }
}
