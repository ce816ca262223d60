/*!
 * Item range selection.
 *
 * Turns a textual `"N"` or `"N-M"` range into 1-based inclusive bounds that
 * always fit the source array. Malformed input degrades to defaults instead of
 * failing.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::Range;

/// Leading integer prefix: optional whitespace, optional plus sign, digits
static INTEGER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\+?([0-9]+)").expect("valid integer prefix pattern")
});

/// A 1-based inclusive range of items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRange {
    /// First item, 1-based
    pub start: usize,
    /// Last item, 1-based and inclusive
    pub end: usize,
}

impl ItemRange {
    /// Range covering no items, used for an empty source array
    pub fn empty() -> Self {
        Self { start: 1, end: 0 }
    }

    /// Parse a range specification against the number of available items.
    ///
    /// Never fails: an unparsable start becomes 1, an unparsable end becomes
    /// `max_items`, both bounds are clamped into `1..=max_items` and swapped
    /// when reversed.
    pub fn parse(spec: &str, max_items: usize) -> Self {
        if max_items == 0 {
            return Self::empty();
        }

        let (start_text, end_text) = match spec.split_once('-') {
            Some((start, end)) => (start, Some(end)),
            None => (spec, None),
        };

        let start = parse_integer_prefix(start_text);
        let end = match end_text.filter(|text| !text.is_empty()) {
            Some(text) => parse_integer_prefix(text),
            None => start,
        };

        let start = start.unwrap_or(1).clamp(1, max_items);
        let end = end.unwrap_or(max_items).clamp(1, max_items);

        if start > end {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Number of items covered
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    /// True when the range covers nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero-based indices into the source array; empty when `start > end`
    pub fn indices(&self) -> Range<usize> {
        if self.is_empty() {
            return 0..0;
        }
        (self.start - 1)..self.end
    }
}

impl fmt::Display for ItemRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Read the leading integer of `text`, ignoring anything after it.
/// Digit runs too long for `usize` saturate.
fn parse_integer_prefix(text: &str) -> Option<usize> {
    let digits = INTEGER_PREFIX.captures(text)?.get(1)?.as_str();
    Some(digits.parse::<usize>().unwrap_or(usize::MAX))
}
