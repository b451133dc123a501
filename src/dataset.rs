use std::convert::TryFrom;
use std::fmt;
use std::path::{Path, PathBuf};

use log::Log;
use serde::Serialize;

use crate::error::{DatasetError, ParseError};
use crate::record::{generate_examples, Record};
use crate::resequencer::Resequencer;
use crate::variant::Indexing;
use crate::WILD_TYPE;

pub const CITATION: &str = "\
@article{OLSON20142643,
title = {A Comprehensive Biophysical Description of Pairwise Epistasis throughout an Entire Protein Domain},
journal = {Current Biology},
volume = {24},
number = {22},
pages = {2643-2651},
year = {2014},
issn = {0960-9822},
doi = {https://doi.org/10.1016/j.cub.2014.09.072},
url = {https://www.sciencedirect.com/science/article/pii/S0960982214012688},
author = {C. Anders Olson and Nicholas C. Wu and Ren Sun},
}
";

pub const DESCRIPTION: &str = "\
Summary \
Background \
Nonadditivity in fitness effects from two or more mutations, termed epistasis, can result in \
compensation of deleterious mutations or negation of beneficial mutations. Recent evidence shows \
the importance of epistasis in individual evolutionary pathways. However, an unresolved question \
in molecular evolution is how often and how significantly fitness effects change in alternative \
genetic backgrounds. \
Results \
To answer this question, we quantified the effects of all single mutations and double mutations \
between all positions in the IgG-binding domain of protein G (GB1). By observing the first two \
steps of all possible evolutionary pathways using this fitness profile, we were able to \
characterize the extent and magnitude of pairwise epistasis throughout an entire protein \
molecule. Furthermore, we developed a novel approach to quantitatively determine the effects of \
single mutations on structural stability (ΔΔGU). This enabled determination of the importance of \
stability effects in functional epistasis. \
Conclusions \
Our results illustrate common biophysical mechanisms for occurrences of positive and negative \
epistasis. Our results show pervasive positive epistasis within a conformationally dynamic \
network of residues. The stability analysis shows that significant negative epistasis, which is \
more common than positive epistasis, mostly occurs between combinations of destabilizing \
mutations. Furthermore, we show that although significant positive epistasis is rare, many \
deleterious mutations are beneficial in at least one alternative mutational background. The \
distribution of conditionally beneficial mutations throughout the domain demonstrates that the \
functional portion of sequence space can be significantly expanded by epistasis. \
";

pub const HOMEPAGE: &str = "https://github.com/gitter-lab/nn4dms";

const DEFAULT_TRAIN_FILE: &str = "/content/GB1/train/train.tsv";
const DEFAULT_TEST_FILE: &str = "/content/GB1/test/test.tsv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Split {
    type Error = ParseError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "train" => Ok(Self::Train),
            "test" => Ok(Self::Test),
            _ => Err(ParseError::somewhere("train or test", s.to_string())),
        }
    }
}

/// Storage type of a feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    String,
    Int32,
    Float32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub name: &'static str,
    pub dtype: Dtype,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub description: &'static str,
    pub citation: &'static str,
    pub homepage: &'static str,
    pub features: Vec<Feature>,
    pub supervised_keys: Option<(String, String)>,
    pub config_name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitGenerator {
    pub split: Split,
    pub filepath: PathBuf,
}

/// Everything that can be tuned about how the dataset is produced
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    pub name: String,
    pub version: String,
    pub description: String,
    pub wild_type: String,
    pub train_file: PathBuf,
    pub test_file: PathBuf,
    pub resequencer: Resequencer,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            name: "full_dataset".to_string(),
            version: "1.0.0".to_string(),
            description: "Full dataset".to_string(),
            wild_type: WILD_TYPE.to_string(),
            train_file: PathBuf::from(DEFAULT_TRAIN_FILE),
            test_file: PathBuf::from(DEFAULT_TEST_FILE),
            resequencer: Resequencer::default(),
        }
    }
}

impl BuilderConfig {
    /// Expect `train/train.tsv` and `test/test.tsv` below `dir`
    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        let dir = dir.as_ref();
        self.train_file = dir.join("train").join("train.tsv");
        self.test_file = dir.join("test").join("test.tsv");
        self
    }

    pub fn with_train_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.train_file = path.into();
        self
    }

    pub fn with_test_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.test_file = path.into();
        self
    }

    pub fn with_indexing(mut self, indexing: Indexing) -> Self {
        self.resequencer.indexing = indexing;
        self
    }

    pub fn with_reference_check(mut self, check_reference: bool) -> Self {
        self.resequencer.check_reference = check_reference;
        self
    }

    pub fn with_wild_type<S: Into<String>>(mut self, wild_type: S) -> Self {
        self.wild_type = wild_type.into();
        self
    }

    pub fn file(&self, split: Split) -> &Path {
        match split {
            Split::Train => &self.train_file,
            Split::Test => &self.test_file,
        }
    }
}

/// The hooks a dataset has to provide to be materialized split by split
pub trait DatasetBuilder {
    fn info(&self) -> DatasetInfo;

    fn split_generators(&self) -> Vec<SplitGenerator>;

    /// Feed the examples of one split file into `emit`, returning how many were emitted
    fn generate_examples<F, E>(&self, filepath: &Path, logger: &dyn Log, emit: F) -> Result<usize, E>
    where
        F: FnMut(usize, Record) -> Result<(), E>,
        E: From<DatasetError>;
}

#[derive(Debug, Clone, Default)]
pub struct Gb1 {
    config: BuilderConfig,
}

impl Gb1 {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Collect all examples of `split`
    pub fn examples(
        &self,
        split: Split,
        logger: &dyn Log,
    ) -> Result<Vec<(usize, Record)>, DatasetError> {
        let mut result = Vec::new();
        self.generate_examples(self.config.file(split), logger, |key, record| {
            result.push((key, record));
            Ok::<(), DatasetError>(())
        })?;
        Ok(result)
    }
}

impl DatasetBuilder for Gb1 {
    fn info(&self) -> DatasetInfo {
        DatasetInfo {
            description: DESCRIPTION,
            citation: CITATION,
            homepage: HOMEPAGE,
            features: vec![
                Feature {
                    name: "variant",
                    dtype: Dtype::String,
                },
                Feature {
                    name: "seq",
                    dtype: Dtype::String,
                },
                Feature {
                    name: "num_mutations",
                    dtype: Dtype::Int32,
                },
                Feature {
                    name: "labels",
                    dtype: Dtype::Float32,
                },
            ],
            supervised_keys: None,
            config_name: self.config.name.clone(),
            version: self.config.version.clone(),
        }
    }

    fn split_generators(&self) -> Vec<SplitGenerator> {
        [Split::Train, Split::Test]
            .iter()
            .map(|&split| SplitGenerator {
                split,
                filepath: self.config.file(split).to_path_buf(),
            })
            .collect()
    }

    fn generate_examples<F, E>(&self, filepath: &Path, logger: &dyn Log, emit: F) -> Result<usize, E>
    where
        F: FnMut(usize, Record) -> Result<(), E>,
        E: From<DatasetError>,
    {
        generate_examples(
            filepath,
            &self.config.wild_type,
            &self.config.resequencer,
            logger,
            emit,
        )
    }
}
