//! Numeric range matching for hourly-wage filters.
//!
//! Wage text arrives decorated ("₹500/hr", "1,000") and range tokens come
//! from user-facing band lists ("400-600", "1000+"). Parsing is manual byte
//! scanning rather than `regex` to stay dependency-light, and every
//! malformed input is a non-match, never a panic.

/// Extracts the first maximal run of ASCII digits from `text` as an integer.
///
/// `"₹500 - ₹600 per hour"` → `Some(500)`. Returns `None` when the text
/// contains no digits or the run does not fit in an `i64`.
#[must_use]
pub fn first_number(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            return text[start..i].parse().ok();
        }
        i += 1;
    }
    None
}

/// A parsed range token: `"min-max"` (inclusive) or `"min+"` (open-ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WageRange {
    Closed { min: i64, max: i64 },
    Open { min: i64 },
}

impl WageRange {
    /// Parses a range token.
    ///
    /// Bounds are read per `-`-separated segment with non-digit characters
    /// stripped, so `"₹400-₹600"` parses the same as `"400-600"`. A trailing
    /// `+` makes the range open-ended above its first bound. Returns `None`
    /// for anything that yields no usable bounds.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let mut segments = token.split('-');
        let min = digits_of(segments.next()?)?;
        if token.ends_with('+') {
            return Some(WageRange::Open { min });
        }
        let max = digits_of(segments.next()?)?;
        Some(WageRange::Closed { min, max })
    }

    /// Tests whether `value` falls inside the range. Both bounds of a closed
    /// range are inclusive.
    #[must_use]
    pub fn contains(self, value: i64) -> bool {
        match self {
            WageRange::Closed { min, max } => value >= min && value <= max,
            WageRange::Open { min } => value >= min,
        }
    }
}

/// Tests whether the number embedded in `value_text` falls inside
/// `range_token`. Malformed values or tokens are non-matches.
#[must_use]
pub fn in_range(value_text: &str, range_token: &str) -> bool {
    match (first_number(value_text), WageRange::parse(range_token)) {
        (Some(value), Some(range)) => range.contains(value),
        _ => false,
    }
}

fn digits_of(segment: &str) -> Option<i64> {
    let digits: String = segment.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
