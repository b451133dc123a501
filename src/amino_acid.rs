use std::convert::TryFrom;
use std::fmt;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AminoAcid {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    GlutamicAcid,
    Glutamine,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
    Stop,
}

const AMINO_ACID_CODES: &str = "one of ACDEFGHIKLMNPQRSTVWY*";

impl AminoAcid {
    /// The IUPAC one-letter code. Stop is written as `*`.
    pub fn code(&self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Arginine => 'R',
            Self::Asparagine => 'N',
            Self::AsparticAcid => 'D',
            Self::Cysteine => 'C',
            Self::GlutamicAcid => 'E',
            Self::Glutamine => 'Q',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Lysine => 'K',
            Self::Methionine => 'M',
            Self::Phenylalanine => 'F',
            Self::Proline => 'P',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Valine => 'V',
            Self::Stop => '*',
        }
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = ParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c.to_ascii_uppercase() {
            'A' => Self::Alanine,
            'R' => Self::Arginine,
            'N' => Self::Asparagine,
            'D' => Self::AsparticAcid,
            'C' => Self::Cysteine,
            'E' => Self::GlutamicAcid,
            'Q' => Self::Glutamine,
            'G' => Self::Glycine,
            'H' => Self::Histidine,
            'I' => Self::Isoleucine,
            'L' => Self::Leucine,
            'K' => Self::Lysine,
            'M' => Self::Methionine,
            'F' => Self::Phenylalanine,
            'P' => Self::Proline,
            'S' => Self::Serine,
            'T' => Self::Threonine,
            'W' => Self::Tryptophan,
            'Y' => Self::Tyrosine,
            'V' => Self::Valine,
            '*' => Self::Stop,
            _ => return Err(ParseError::somewhere(AMINO_ACID_CODES, c.to_string())),
        })
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_letter_codes() {
        for c in "ACDEFGHIKLMNPQRSTVWY*".chars() {
            let aa = AminoAcid::try_from(c).unwrap();
            assert_eq!(aa.code(), c);
        }
        assert_eq!(AminoAcid::try_from('v').unwrap(), AminoAcid::Valine);
        assert_eq!(AminoAcid::try_from('*').unwrap().to_string(), "*");
    }

    #[test]
    fn test_non_residue_letters() {
        for c in "BJOUXZ1-, ".chars() {
            assert!(AminoAcid::try_from(c).is_err(), "{} is not a residue", c);
        }
    }
}
