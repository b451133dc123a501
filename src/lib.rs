//! Loader for the GB1 pairwise epistasis fitness data (Olson, Wu & Sun 2014)
//!
//! Every row of the tab separated input names its variant with a compact
//! substitution list such as `V39A,D40G`. The full protein sequence of the
//! variant is rebuilt from the GB1 wild type and handed out together with the
//! number of mutations and the measured fitness.

mod amino_acid;
pub mod dataset;
pub mod error;
mod record;
mod resequencer;
mod variant;

pub use crate::amino_acid::AminoAcid;
pub use crate::dataset::{
    BuilderConfig, DatasetBuilder, DatasetInfo, Dtype, Feature, Gb1, Split, SplitGenerator,
};
pub use crate::error::DatasetError;
pub use crate::record::{generate_examples, read_examples_from_file, Record};
pub use crate::resequencer::{reconstruct, Resequencer};
pub use crate::variant::{Indexing, VariantNotation, VariantToken};

/// The IgG-binding domain of protein G as used by the GB1 fitness files
pub const WILD_TYPE: &str = "MQYKLILNGKTLKGETTTEAVDAATAEKVFKQYANDNGVDGEWTYDDATKTFTVTE";
