//! Term marker parsing
//!
//! Text coming back from the backend embeds medical terms as `[[Term]]`.
//! `RichText` splits such text into plain runs and term triggers.
//!
//! Recognition is exactly `[[`, a non-greedy capture, `]]`:
//! - unterminated markers (`[[TSH`) stay literal
//! - empty markers (`[[]]`) stay literal
//! - nested or odd shapes are not special-cased

use std::sync::OnceLock;

use regex::Regex;

fn term_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"\[\[(.*?)\]\]").expect("term marker pattern is valid"))
}

/// One run of rendered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, shown as-is
    Text(String),
    /// Interactive trigger bound to the literal term string
    Term(String),
}

/// Text with term triggers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    segments: Vec<Segment>,
}

impl RichText {
    /// Parse `[[Term]]` markers out of `input`
    ///
    /// # Examples
    /// ```
    /// use althea::ui::markup::{RichText, Segment};
    ///
    /// let text = RichText::parse("Check your [[TSH]] level");
    /// assert_eq!(
    ///     text.segments(),
    ///     &[
    ///         Segment::Text("Check your ".to_string()),
    ///         Segment::Term("TSH".to_string()),
    ///         Segment::Text(" level".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn parse(input: &str) -> Self {
        let mut text = RichText::default();
        let mut cursor = 0;
        for caps in term_marker().captures_iter(input) {
            let (Some(whole), Some(term)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if term.as_str().is_empty() {
                continue;
            }
            text.push_text(&input[cursor..whole.start()]);
            text.segments.push(Segment::Term(term.as_str().to_string()));
            cursor = whole.end();
        }
        text.push_text(&input[cursor..]);
        text
    }

    fn push_text(&mut self, run: &str) {
        if run.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Text(existing)) => existing.push_str(run),
            _ => self.segments.push(Segment::Text(run.to_string())),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Terms in order of appearance (duplicates kept)
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Term(term) => Some(term.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Text with markers stripped
    pub fn plain(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) | Segment::Term(text) => text.as_str(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    fn term(s: &str) -> Segment {
        Segment::Term(s.to_string())
    }

    #[test]
    fn test_marker_becomes_term() {
        let rich = RichText::parse("Check your [[TSH]] level");
        assert_eq!(rich.segments(), &[text("Check your "), term("TSH"), text(" level")]);
        assert_eq!(rich.plain(), "Check your TSH level");
    }

    #[test]
    fn test_no_markers_pass_through() {
        let rich = RichText::parse("Everything looks normal.");
        assert_eq!(rich.segments(), &[text("Everything looks normal.")]);
    }

    #[test]
    fn test_unterminated_marker_is_literal() {
        let rich = RichText::parse("[[TSH");
        assert_eq!(rich.segments(), &[text("[[TSH")]);
        assert_eq!(rich.terms().count(), 0);
    }

    #[test]
    fn test_empty_marker_is_literal() {
        let rich = RichText::parse("a [[]] b [[LDL]]");
        assert_eq!(rich.segments(), &[text("a [[]] b "), term("LDL")]);
    }

    #[test]
    fn test_non_greedy_capture() {
        let rich = RichText::parse("[[HDL]] and [[LDL]]");
        assert_eq!(rich.terms().collect::<Vec<_>>(), vec!["HDL", "LDL"]);
    }

    #[test]
    fn test_adjacent_markers() {
        let rich = RichText::parse("[[A]][[B]]");
        assert_eq!(rich.segments(), &[term("A"), term("B")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(RichText::parse("").is_empty());
    }
}
