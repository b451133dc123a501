use std::convert::TryFrom;

use crate::amino_acid::AminoAcid;
use crate::error::{Location, ParseError, ResequenceError};
use crate::variant::{Indexing, VariantNotation, VariantToken};

/// Rebuilds full variant sequences from a wild type and a substitution list
///
/// Substitutions never change the length of the sequence. Positions that are
/// not named in the notation keep the wild type residue. If the same offset is
/// named twice, the later substitution wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resequencer {
    pub indexing: Indexing,
    /// Only accept standard residue codes and refuse substitutions whose
    /// original residue disagrees with the wild type
    pub check_reference: bool,
}

impl Resequencer {
    pub fn new(indexing: Indexing, check_reference: bool) -> Self {
        Self {
            indexing,
            check_reference,
        }
    }

    pub fn reconstruct(
        &self,
        wild_type: &str,
        variant_notation: &str,
    ) -> Result<String, ResequenceError> {
        if wild_type.is_empty() {
            return Err(ParseError::somewhere("a non-empty wild type sequence", String::new()).into());
        }
        let notation = VariantNotation::parse(variant_notation)?;
        self.apply(wild_type, &notation)
    }

    /// Same as `reconstruct` but for a notation that was already parsed
    pub fn apply(
        &self,
        wild_type: &str,
        notation: &VariantNotation,
    ) -> Result<String, ResequenceError> {
        let mut residues: Vec<char> = wild_type.chars().collect();
        for (index, token) in notation.iter().enumerate() {
            let offset = self.offset(token, residues.len())?;
            if self.check_reference {
                let location = || Location::Item {
                    type_: "variant token",
                    index,
                };
                let expected = AminoAcid::try_from(token.reference).map_err(|e| e.at(location()))?;
                AminoAcid::try_from(token.alternative).map_err(|e| e.at(location()))?;
                let observed = residues[offset];
                if AminoAcid::try_from(observed).ok() != Some(expected) {
                    return Err(ResequenceError::ReferenceMismatch {
                        token: token.to_string(),
                        offset,
                        expected: token.reference,
                        observed,
                    });
                }
            }
            residues[offset] = token.alternative;
        }
        Ok(residues.into_iter().collect())
    }

    fn offset(&self, token: &VariantToken, length: usize) -> Result<usize, ResequenceError> {
        match self.indexing.offset(token.position) {
            Some(offset) if offset < length => Ok(offset),
            _ => Err(ResequenceError::OutOfRange {
                token: token.to_string(),
                position: token.position,
                length,
            }),
        }
    }
}

/// Apply `variant_notation` to `wild_type` with zero-based positions and no reference check
pub fn reconstruct(wild_type: &str, variant_notation: &str) -> Result<String, ResequenceError> {
    Resequencer::default().reconstruct(wild_type, variant_notation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WILD_TYPE;

    fn differences(a: &str, b: &str) -> Vec<usize> {
        a.chars()
            .zip(b.chars())
            .enumerate()
            .filter(|(_, (x, y))| x != y)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_empty_notation_is_wild_type() {
        assert_eq!(reconstruct(WILD_TYPE, "").unwrap(), WILD_TYPE);
        assert_eq!(reconstruct("MQY", " ").unwrap(), "MQY");
    }

    #[test]
    fn test_single_substitution() {
        assert_eq!(WILD_TYPE.len(), 56);
        let seq = reconstruct(WILD_TYPE, "V39A").unwrap();
        assert_eq!(seq.len(), WILD_TYPE.len());
        assert_eq!(differences(WILD_TYPE, &seq), vec![39]);
        assert_eq!(&seq[39..40], "A");
    }

    #[test]
    fn test_double_substitution() {
        let seq = reconstruct(WILD_TYPE, "V39A,D40G").unwrap();
        assert_eq!(seq.len(), WILD_TYPE.len());
        // offset 40 is already G
        assert_eq!(differences(WILD_TYPE, &seq), vec![39]);
        assert_eq!(&seq[39..41], "AG");

        let seq = reconstruct(WILD_TYPE, "V39A,D40W").unwrap();
        assert_eq!(differences(WILD_TYPE, &seq), vec![39, 40]);
        assert_eq!(&seq[39..41], "AW");
    }

    #[test]
    fn test_every_offset() {
        for offset in 0..WILD_TYPE.len() {
            let replacement = if &WILD_TYPE[offset..offset + 1] == "W" { 'C' } else { 'W' };
            let token = format!("A{}{}", offset, replacement);
            let seq = reconstruct(WILD_TYPE, &token).unwrap();
            assert_eq!(seq.len(), WILD_TYPE.len());
            assert_eq!(differences(WILD_TYPE, &seq), vec![offset]);
            assert_eq!(seq.chars().nth(offset), Some(replacement));
        }
    }

    #[test]
    fn test_deterministic() {
        let a = reconstruct(WILD_TYPE, "Y2A,K3P,E55W").unwrap();
        let b = reconstruct(WILD_TYPE, "Y2A,K3P,E55W").unwrap();
        assert_eq!(a, b);
        assert_eq!(differences(WILD_TYPE, &a), vec![2, 3, 55]);
    }

    #[test]
    fn test_residues_are_written_as_given() {
        assert_eq!(reconstruct("MQY", "q1a").unwrap(), "MaY");
        let seq = reconstruct(WILD_TYPE, "X39A").unwrap();
        assert_eq!(differences(WILD_TYPE, &seq), vec![39]);
        let seq = reconstruct(WILD_TYPE, "V39X").unwrap();
        assert_eq!(seq.chars().nth(39), Some('X'));
    }

    #[test]
    fn test_later_substitution_wins() {
        let seq = reconstruct("MQY", "Q1A,Q1G").unwrap();
        assert_eq!(seq, "MGY");
    }

    #[test]
    fn test_out_of_range() {
        let err = reconstruct(WILD_TYPE, "E56A").unwrap_err();
        assert!(matches!(
            err,
            ResequenceError::OutOfRange {
                position: 56,
                length: 56,
                ..
            }
        ));
        assert!(reconstruct(WILD_TYPE, "M55A").is_ok());
    }

    #[test]
    fn test_format_errors() {
        for bad in &["V39", "39A", "VA", "V39A,,D40G", "Vx9A"] {
            let err = reconstruct(WILD_TYPE, bad).unwrap_err();
            assert!(matches!(err, ResequenceError::Format(_)), "{:?}", bad);
        }
        let err = reconstruct("", "V39A").unwrap_err();
        assert!(matches!(err, ResequenceError::Format(_)));
    }

    #[test]
    fn test_one_based() {
        let resequencer = Resequencer::new(Indexing::OneBased, false);
        let seq = resequencer.reconstruct(WILD_TYPE, "V39A").unwrap();
        assert_eq!(differences(WILD_TYPE, &seq), vec![38]);
        assert!(resequencer.reconstruct(WILD_TYPE, "E56A").is_ok());
        assert!(matches!(
            resequencer.reconstruct(WILD_TYPE, "M0A"),
            Err(ResequenceError::OutOfRange { position: 0, .. })
        ));
    }

    #[test]
    fn test_reference_check() {
        let strict = Resequencer::new(Indexing::ZeroBased, true);
        // offset 38 holds V, offset 39 holds D
        assert!(strict.reconstruct(WILD_TYPE, "V38A,D39G").is_ok());
        let err = strict.reconstruct(WILD_TYPE, "V39A").unwrap_err();
        assert!(matches!(
            err,
            ResequenceError::ReferenceMismatch {
                offset: 39,
                expected: 'V',
                observed: 'D',
                ..
            }
        ));
        let strict = Resequencer::new(Indexing::OneBased, true);
        assert!(strict.reconstruct(WILD_TYPE, "V39A,D40G").is_ok());
        assert_eq!(strict.reconstruct("MQY", "q2a").unwrap(), "MaY");
        // only standard residue codes pass the strict check
        for bad in &["V39X", "B39A"] {
            let err = strict.reconstruct(WILD_TYPE, bad).unwrap_err();
            assert!(matches!(err, ResequenceError::Format(_)), "{:?}", bad);
        }
    }
}
