//! Chat mention parsing and highlight segmentation.
//!
//! # Responsibility
//! - Extract `@name` mentions from message text at append time.
//! - Split text into plain/mention runs for highlighting.
//!
//! # Invariants
//! - A mention is `@` followed by one or more of `[A-Za-z0-9_]`.
//! - Extraction keeps duplicates and left-to-right order.

use once_cell::sync::Lazy;
use regex::Regex;

static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_]+)").expect("valid mention regex"));

/// Returns every mentioned name in order of appearance, without the `@`.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// One run of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSegment<'a> {
    Plain(&'a str),
    /// Literal `@name` run.
    Mention(&'a str),
}

impl<'a> TextSegment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Plain(text) | Self::Mention(text) => text,
        }
    }

    pub fn is_mention(&self) -> bool {
        matches!(self, Self::Mention(_))
    }
}

/// Splits `text` into alternating plain and mention runs.
///
/// Each `@mention` is searched for starting where the previous match ended;
/// mentions that cannot be found are skipped. Concatenating the segment
/// texts always yields `text` again.
pub fn segment_mentions<'a>(text: &'a str, mentions: &[String]) -> Vec<TextSegment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for mention in mentions {
        let needle = format!("@{mention}");
        let Some(offset) = text[cursor..].find(needle.as_str()) else {
            continue;
        };
        let start = cursor + offset;
        let end = start + needle.len();
        if start > cursor {
            segments.push(TextSegment::Plain(&text[cursor..start]));
        }
        segments.push(TextSegment::Mention(&text[start..end]));
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(TextSegment::Plain(&text[cursor..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::{extract_mentions, segment_mentions, TextSegment};

    #[test]
    fn extracts_mentions_in_order() {
        assert_eq!(extract_mentions("hi @bob and @carol"), vec!["bob", "carol"]);
    }

    #[test]
    fn no_mentions_yields_empty_list() {
        assert!(extract_mentions("no mentions").is_empty());
        assert!(extract_mentions("mail me at @").is_empty());
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(
            extract_mentions("@ana, @luis y @ana otra vez"),
            vec!["ana", "luis", "ana"]
        );
    }

    #[test]
    fn mention_stops_at_non_word_character() {
        assert_eq!(extract_mentions("ping @dev_team!"), vec!["dev_team"]);
        assert_eq!(extract_mentions("user@example.com"), vec!["example"]);
        assert_eq!(extract_mentions("hola @josé"), vec!["jos"]);
    }

    #[test]
    fn segments_alternate_plain_and_mention_runs() {
        let text = "hi @bob and @carol!";
        let mentions = extract_mentions(text);
        let segments = segment_mentions(text, &mentions);
        assert_eq!(
            segments,
            vec![
                TextSegment::Plain("hi "),
                TextSegment::Mention("@bob"),
                TextSegment::Plain(" and "),
                TextSegment::Mention("@carol"),
                TextSegment::Plain("!"),
            ]
        );
        let rebuilt: String = segments.iter().map(|segment| segment.text()).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn missing_mentions_are_skipped() {
        let segments = segment_mentions("@ana says hi", &["luis".to_string(), "ana".to_string()]);
        assert_eq!(
            segments,
            vec![TextSegment::Mention("@ana"), TextSegment::Plain(" says hi")]
        );
    }

    #[test]
    fn search_resumes_after_previous_match() {
        let mentions = vec!["ana".to_string(), "ana".to_string()];
        let segments = segment_mentions("@ana y @ana", &mentions);
        let highlighted = segments.iter().filter(|segment| segment.is_mention()).count();
        assert_eq!(highlighted, 2);
    }

    #[test]
    fn text_without_mentions_is_one_plain_run() {
        assert_eq!(
            segment_mentions("plain", &[]),
            vec![TextSegment::Plain("plain")]
        );
    }
}
