// opus/metadata.rs
//! Tokenizer for the command-line-like metadata string embedded in certain
//! text blocks.
//!
//! Acquisition software records the command it was driven by as plain text,
//! e.g.:
//!
//! ```text
//! COMMAND_LINE MeasureSample (0:AB[0:Sample]{EXP='probe.xpm', NAM='S1', INT=10});
//! ```
//!
//! The interesting parts are the operation name, the bracketed type tag and
//! the brace-enclosed `key=value` list, where commas inside single-quoted
//! segments do not separate values. Metadata extraction is best-effort
//! enrichment: a malformed string must never fail the surrounding block
//! parse, so the forgiving entry point is [`EmbeddedMetadata::extract`].

use crate::{Error, Result};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::warn;

/// Keyword preceding the operation name. When absent, the whole intro text is
/// taken as the operation.
pub const COMMAND_MARKER: &str = "COMMAND_LINE";

/// Channel prefix stripped from the bracketed type tag when present.
pub const TYPE_SENTINEL: &str = "0:";

/// An insertion-ordered `key=value` list with last-write-wins semantics for
/// duplicate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedValues(Vec<(String, String)>);

impl OrderedValues {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert `key`, replacing the value in place when the key already exists.
    pub fn insert(&mut self, key: String, value: String) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The parsed embedded metadata string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmbeddedMetadata {
    /// Operation name, e.g. `MeasureSample`.
    pub operation: String,
    /// Bracketed type tag with the channel prefix stripped.
    pub type_tag: String,
    /// `key=value` pairs in their original order.
    pub values: OrderedValues,
}

impl EmbeddedMetadata {
    /// Parse a raw metadata string.
    ///
    /// Structural damage (missing parentheses, brackets or braces) is a
    /// [`Error::MetadataSyntax`]; a token without `=` is dropped with a
    /// warning and never fails the parse.
    pub fn parse(raw: &str) -> Result<Self> {
        let open = raw
            .find('(')
            .ok_or_else(|| Error::MetadataSyntax("missing '('".to_string()))?;
        let close = raw
            .rfind(')')
            .filter(|&close| close > open)
            .ok_or_else(|| Error::MetadataSyntax("missing ')'".to_string()))?;
        let intro = &raw[..open];
        let payload = &raw[open + 1..close];

        let operation = match intro.find(COMMAND_MARKER) {
            Some(pos) => &intro[pos + COMMAND_MARKER.len()..],
            None => intro,
        }
        .trim()
        .to_string();

        let lbracket = payload
            .find('[')
            .ok_or_else(|| Error::MetadataSyntax("missing '['".to_string()))?;
        let rbracket = payload
            .find(']')
            .filter(|&rbracket| rbracket > lbracket)
            .ok_or_else(|| Error::MetadataSyntax("missing ']'".to_string()))?;
        let type_tag = payload[lbracket + 1..rbracket].trim();
        let type_tag = type_tag
            .strip_prefix(TYPE_SENTINEL)
            .unwrap_or(type_tag)
            .to_string();

        let lbrace = payload
            .find('{')
            .ok_or_else(|| Error::MetadataSyntax("missing '{'".to_string()))?;
        let rbrace = payload
            .rfind('}')
            .filter(|&rbrace| rbrace > lbrace)
            .ok_or_else(|| Error::MetadataSyntax("missing '}'".to_string()))?;
        let data = &payload[lbrace + 1..rbrace];

        let mut values = OrderedValues::new();
        for token in split_outside_quotes(data) {
            match token.split_once('=') {
                Some((key, value)) => {
                    values.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => {
                    if !token.trim().is_empty() {
                        warn!("dropping metadata token without '=': {token:?}");
                    }
                }
            }
        }

        Ok(Self {
            operation,
            type_tag,
            values,
        })
    }

    /// Best-effort variant of [`parse`](Self::parse): structural failures are
    /// logged at warn level and collapse to `None`.
    pub fn extract(raw: &str) -> Option<Self> {
        match Self::parse(raw) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                warn!("embedded metadata ignored: {err}");
                None
            }
        }
    }
}

/// Split on commas that sit outside single-quoted segments.
///
/// Quote characters toggle the escape state and are dropped from the
/// accumulated token rather than copied into the value.
fn split_outside_quotes(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in data.chars() {
        match c {
            '\'' => in_quotes = !in_quotes,
            ',' if !in_quotes => tokens.push(core::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    tokens.push(current);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn parses_marker_type_and_values() {
        let raw = "COMMAND_LINE MeasureSample (0:AB[0:Sample]{EXP='probe.xpm', NAM='S1', INT=10});";
        let meta = EmbeddedMetadata::parse(raw).unwrap();
        assert_eq!(meta.operation, "MeasureSample");
        assert_eq!(meta.type_tag, "Sample");
        assert_eq!(meta.values.get("EXP"), Some("probe.xpm"));
        assert_eq!(meta.values.get("NAM"), Some("S1"));
        assert_eq!(meta.values.get("INT"), Some("10"));
        assert_eq!(meta.values.len(), 3);
    }

    #[test]
    fn quoted_commas_do_not_split() {
        let raw = "CMD(T[x]{NAM='a,b,c', INT=1})";
        let meta = EmbeddedMetadata::parse(raw).unwrap();
        assert_eq!(meta.values.get("NAM"), Some("a,b,c"));
        assert_eq!(meta.values.get("INT"), Some("1"));
    }

    #[test]
    fn token_without_equals_is_dropped() {
        let meta = EmbeddedMetadata::parse("CMD(TYPE[x]{a=1,b})").unwrap();
        assert_eq!(meta.operation, "CMD");
        assert_eq!(meta.type_tag, "x");
        assert_eq!(meta.values.get("a"), Some("1"));
        assert_eq!(meta.values.get("b"), None);
        assert_eq!(meta.values.len(), 1);
    }

    #[test]
    fn duplicate_keys_last_write_wins_in_place() {
        let meta = EmbeddedMetadata::parse("CMD(T[x]{a=1, b=2, a=3})").unwrap();
        assert_eq!(meta.values.get("a"), Some("3"));
        let pairs: Vec<(&str, &str)> = meta.values.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn structural_damage_is_an_error() {
        assert!(matches!(
            EmbeddedMetadata::parse("no payload at all"),
            Err(Error::MetadataSyntax(_))
        ));
        assert!(matches!(
            EmbeddedMetadata::parse("CMD(T[x]{a=1}"),
            Err(Error::MetadataSyntax(_))
        ));
        assert!(matches!(
            EmbeddedMetadata::parse("CMD(T{a=1})"),
            Err(Error::MetadataSyntax(_))
        ));
    }

    #[test]
    fn extract_degrades_to_none() {
        assert!(EmbeddedMetadata::extract("garbage").is_none());
        assert!(EmbeddedMetadata::extract("CMD(T[x]{a=1})").is_some());
    }

    #[test]
    fn empty_value_list_is_fine() {
        let meta = EmbeddedMetadata::parse("CMD(T[x]{})").unwrap();
        assert!(meta.values.is_empty());
    }
}
