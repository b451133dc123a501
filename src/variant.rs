use std::convert::TryFrom;
use std::fmt;

use crate::error::{Location, ParseError};

const TOKEN_SHAPE: &str = "<residue><position><residue>";

/// How the position of a variant token maps onto the wild type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indexing {
    /// The written position is the offset into the wild type (GB1 files use this)
    ZeroBased,
    /// The written position counts residues from 1
    OneBased,
}

impl Default for Indexing {
    fn default() -> Self {
        Indexing::ZeroBased
    }
}

impl Indexing {
    /// Offset into the wild type, or `None` if the position cannot address any residue
    pub fn offset(&self, position: usize) -> Option<usize> {
        match self {
            Indexing::ZeroBased => Some(position),
            Indexing::OneBased => position.checked_sub(1),
        }
    }
}

fn is_residue(c: char) -> bool {
    c.is_alphabetic() || c == '*'
}

/// A single substitution such as `V39A`
///
/// Residues are kept exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantToken {
    pub reference: char,
    pub position: usize,
    pub alternative: char,
}

impl VariantToken {
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        let token = token.trim();
        let mut chars = token.chars();
        let (first, last) = match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ParseError::somewhere(TOKEN_SHAPE, token.to_string())),
        };
        let digits = chars.as_str();
        if !is_residue(first)
            || !is_residue(last)
            || digits.is_empty()
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ParseError::somewhere(TOKEN_SHAPE, token.to_string()));
        }
        let position = digits
            .parse::<usize>()
            .map_err(|_| ParseError::somewhere("a position that fits usize", digits.to_string()))?;
        Ok(Self {
            reference: first,
            position,
            alternative: last,
        })
    }
}

impl fmt::Display for VariantToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.reference, self.position, self.alternative)
    }
}

impl TryFrom<&str> for VariantToken {
    type Error = ParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// Comma separated list of substitutions, kept in the order they were written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantNotation {
    tokens: Vec<VariantToken>,
}

impl VariantNotation {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut tokens = Vec::new();
        if text.trim() != "" {
            // an empty notation is the wild type itself
            for (index, token) in text.split(',').enumerate() {
                let token = VariantToken::parse(token).map_err(|e| {
                    e.at(Location::Item {
                        type_: "variant token",
                        index,
                    })
                })?;
                tokens.push(token);
            }
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[VariantToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariantToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for VariantNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let token = VariantToken::parse("V39A").unwrap();
        assert_eq!(token.reference, 'V');
        assert_eq!(token.position, 39);
        assert_eq!(token.alternative, 'A');
        assert_eq!(token.to_string(), "V39A");

        let token = VariantToken::parse(" d40g ").unwrap();
        assert_eq!(token.to_string(), "d40g");
        assert_eq!(VariantToken::parse("Y2*").unwrap().alternative, '*');
    }

    #[test]
    fn test_parse_any_residue_letter() {
        for token in &["X39A", "V39X", "B1Z", "U7O", "J0j"] {
            let parsed = VariantToken::parse(token).unwrap();
            assert_eq!(parsed.to_string(), *token);
        }
    }

    #[test]
    fn test_parse_bad_tokens() {
        for bad in &["", "V", "VA", "V-1A", "V3.5A", "39A", "V39", "V39-", "-39A", "VxA"] {
            assert!(VariantToken::parse(bad).is_err(), "{:?} should not parse", bad);
        }
        let err = VariantToken::parse("V99999999999999999999999A").unwrap_err();
        assert_eq!(err.expected(), "a position that fits usize");
    }

    #[test]
    fn test_parse_notation() {
        let notation = VariantNotation::parse("V39A,D40G").unwrap();
        assert_eq!(notation.len(), 2);
        assert_eq!(notation.tokens()[1].position, 40);
        assert_eq!(notation.to_string(), "V39A,D40G");

        assert!(VariantNotation::parse("").unwrap().is_empty());
        assert!(VariantNotation::parse("  ").unwrap().is_empty());
    }

    #[test]
    fn test_notation_error_names_token_index() {
        let err = VariantNotation::parse("V39A,D4x0G").unwrap_err();
        assert_eq!(
            err.location(),
            &Location::Item {
                type_: "variant token",
                index: 1
            }
        );
        assert!(VariantNotation::parse("V39A,").is_err());
        assert!(VariantNotation::parse(",V39A").is_err());
    }

    #[test]
    fn test_indexing() {
        assert_eq!(Indexing::default(), Indexing::ZeroBased);
        assert_eq!(Indexing::ZeroBased.offset(0), Some(0));
        assert_eq!(Indexing::ZeroBased.offset(39), Some(39));
        assert_eq!(Indexing::OneBased.offset(39), Some(38));
        assert_eq!(Indexing::OneBased.offset(0), None);
    }
}
