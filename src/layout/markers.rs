//! Option marker glyphs and answer marker resolution.
//!
//! Exam sheets number their four choices with circled numerals. The answer
//! key is printed graphically: the correct choice uses a filled variant of
//! its marker (a negative circled numeral or a solid dot) instead of the
//! outline numeral. Recognised glyphs form a closed set:
//!
//! | Kind | Glyphs |
//! |------|--------|
//! | Plain | `①` `②` `③` `④` |
//! | Filled | `●` `⚫` `⬤` `❶` `❷` `❸` `❹` `❺` |
//!
//! Characters outside the set are ordinary text and never become options.

use lazy_static::lazy_static;
use regex::Regex;

/// Outline circled numerals marking an unselected choice.
pub const PLAIN_MARKERS: [char; 4] = ['\u{2460}', '\u{2461}', '\u{2462}', '\u{2463}'];

/// Filled glyphs marking the keyed choice.
pub const FILLED_MARKERS: [char; 8] = [
    '\u{25CF}', // ● black circle
    '\u{26AB}', // ⚫ medium black circle
    '\u{2B24}', // ⬤ black large circle
    '\u{2776}', // ❶
    '\u{2777}', // ❷
    '\u{2778}', // ❸
    '\u{2779}', // ❹
    '\u{277A}', // ❺
];

lazy_static! {
    /// Any recognised option marker glyph
    static ref RE_MARKER: Regex = {
        let class: String = PLAIN_MARKERS.iter().chain(FILLED_MARKERS.iter()).collect();
        Regex::new(&format!("[{}]", class)).unwrap()
    };
}

/// Styling class of an option marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Outline numeral, an ordinary choice
    Plain,
    /// Filled variant, this choice is the key
    Filled,
}

/// A glyph from the closed option-marker set.
///
/// Only constructible from a recognised glyph, which makes
/// [`OptionMarker::kind`] total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionMarker(char);

impl OptionMarker {
    /// Recognise a marker glyph.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiz_oxide::layout::{MarkerKind, OptionMarker};
    ///
    /// assert_eq!(OptionMarker::from_char('②').map(|m| m.kind()), Some(MarkerKind::Plain));
    /// assert_eq!(OptionMarker::from_char('❹').map(|m| m.kind()), Some(MarkerKind::Filled));
    /// assert!(OptionMarker::from_char('5').is_none());
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        if PLAIN_MARKERS.contains(&c) || FILLED_MARKERS.contains(&c) {
            Some(Self(c))
        } else {
            None
        }
    }

    /// The glyph itself.
    pub fn glyph(self) -> char {
        self.0
    }

    /// Classify the marker as plain or filled.
    pub fn kind(self) -> MarkerKind {
        if FILLED_MARKERS.contains(&self.0) {
            MarkerKind::Filled
        } else {
            MarkerKind::Plain
        }
    }

    /// Whether this marker designates the answer.
    pub fn is_filled(self) -> bool {
        self.kind() == MarkerKind::Filled
    }
}

/// One marker occurrence and the trimmed text up to the next marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedSegment<'a> {
    /// The marker glyph that opened this segment
    pub marker: OptionMarker,
    /// Text following the marker, trimmed; empty when nothing follows
    pub text: &'a str,
}

/// A line of text split at its option markers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkedLine<'a> {
    /// Trimmed text before the first marker
    pub leading: &'a str,
    /// Marker occurrences, left to right
    pub segments: Vec<MarkedSegment<'a>>,
}

impl MarkedLine<'_> {
    /// Whether the line carries at least one marker.
    pub fn has_markers(&self) -> bool {
        !self.segments.is_empty()
    }
}

/// Whether `text` contains any recognised marker glyph.
pub fn contains_marker(text: &str) -> bool {
    RE_MARKER.is_match(text)
}

/// Split `text` at every marker glyph, removing the glyphs.
///
/// # Examples
///
/// ```
/// use quiz_oxide::layout::{split_markers, MarkerKind};
///
/// let line = split_markers("① A ② B ③ C ❹ D");
/// assert_eq!(line.leading, "");
/// let texts: Vec<&str> = line.segments.iter().map(|s| s.text).collect();
/// assert_eq!(texts, vec!["A", "B", "C", "D"]);
/// assert_eq!(line.segments[3].marker.kind(), MarkerKind::Filled);
/// ```
pub fn split_markers(text: &str) -> MarkedLine<'_> {
    let mut line = MarkedLine::default();
    let mut pending: Option<(OptionMarker, usize)> = None;

    for found in RE_MARKER.find_iter(text) {
        match pending.take() {
            Some((marker, start)) => line.segments.push(MarkedSegment {
                marker,
                text: text[start..found.start()].trim(),
            }),
            None => line.leading = text[..found.start()].trim(),
        }
        if let Some(marker) = found.as_str().chars().next().and_then(OptionMarker::from_char) {
            pending = Some((marker, found.end()));
        }
    }

    match pending {
        Some((marker, start)) => line.segments.push(MarkedSegment {
            marker,
            text: text[start..].trim(),
        }),
        None if line.segments.is_empty() => line.leading = text.trim(),
        None => {},
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_set_sizes() {
        assert_eq!(PLAIN_MARKERS.len(), 4);
        assert_eq!(FILLED_MARKERS.len(), 8);
        for c in PLAIN_MARKERS {
            assert_eq!(OptionMarker::from_char(c).unwrap().kind(), MarkerKind::Plain);
        }
        for c in FILLED_MARKERS {
            assert!(OptionMarker::from_char(c).unwrap().is_filled());
        }
    }

    #[test]
    fn test_outside_set_not_recognised() {
        for c in ['1', 'a', '⑤', '○', '◎', '⓵'] {
            assert!(OptionMarker::from_char(c).is_none(), "{c} should not be a marker");
            assert!(!contains_marker(&c.to_string()));
        }
    }

    #[test]
    fn test_split_without_markers() {
        let line = split_markers("  continued text ");
        assert!(!line.has_markers());
        assert_eq!(line.leading, "continued text");
    }

    #[test]
    fn test_split_leading_text() {
        let line = split_markers("tail of previous ③ third ④ fourth");
        assert_eq!(line.leading, "tail of previous");
        assert_eq!(line.segments.len(), 2);
        assert_eq!(line.segments[0].text, "third");
        assert_eq!(line.segments[1].text, "fourth");
    }

    #[test]
    fn test_split_empty_segments() {
        let line = split_markers("①② B ③");
        let texts: Vec<&str> = line.segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["", "B", ""]);
    }

    #[test]
    fn test_split_preserves_marker_identity() {
        let line = split_markers("● yes ② no");
        assert_eq!(line.segments[0].marker.glyph(), '●');
        assert!(line.segments[0].marker.is_filled());
        assert!(!line.segments[1].marker.is_filled());
    }
}
