use std::path::Path;

use log::{info, Log};
use serde::{Deserialize, Serialize};
use tabfile::Tabfile;

use crate::error::{DatasetError, FileError, ParseError};
use crate::resequencer::Resequencer;

/// One example of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub variant: String,
    pub seq: String,
    pub num_mutations: i32,
    pub labels: f32,
}

/// Stream the examples of a tab separated fitness file into `emit`
///
/// The first line is a header and is skipped. Every other line needs exactly
/// five columns: variant, number of mutations, input count, selection count
/// and fitness score. Each example is keyed by its line index in the file,
/// counting the header as index 0.
///
/// The first failure stops the pass, so nothing after a bad line is emitted.
/// Returns the number of emitted examples.
pub fn generate_examples<P, F, E>(
    path: P,
    wild_type: &str,
    resequencer: &Resequencer,
    logger: &dyn Log,
    mut emit: F,
) -> Result<usize, E>
where
    P: AsRef<Path>,
    F: FnMut(usize, Record) -> Result<(), E>,
    E: From<DatasetError>,
{
    const VARIANT_IDX: usize = 0;
    const NUM_MUTATIONS_IDX: usize = 1;
    const SCORE_IDX: usize = 4;
    const COLUMNS: usize = 5;

    let path = path.as_ref();
    info!(logger: logger, "generating examples from = {}", path.display());

    // blank lines are rows too and must fail the column check
    let tabfile = match Tabfile::open(path) {
        Ok(tf) => tf.skip_empty_lines(false),
        Err(e) => return Err(DatasetError::from(FileError::io(Some(path), e)).into()),
    };
    let mut emitted = 0;
    for (i, record_result) in tabfile.into_iter().enumerate() {
        let record = match record_result {
            Ok(record) => record,
            Err(e) => return Err(DatasetError::from(FileError::io(Some(path), e)).into()),
        };
        if i == 0 {
            continue; // header
        }
        let line = record.line_number();
        let key = line.saturating_sub(1);
        let tokens = record.fields();
        if tokens.len() != COLUMNS {
            let err = ParseError::item("row", key, "5 columns", record.line().to_string());
            return Err(DatasetError::from(FileError::on_line(path, line, err)).into());
        }

        let variant = tokens[VARIANT_IDX];
        let seq = resequencer
            .reconstruct(wild_type, variant)
            .map_err(|e| DatasetError::from(FileError::on_line(path, line, e)))?;
        let num_mutations = tokens[NUM_MUTATIONS_IDX]
            .trim()
            .parse::<i32>()
            .map_err(|_| {
                ParseError::item(
                    "column",
                    NUM_MUTATIONS_IDX,
                    "an integer number of mutations",
                    tokens[NUM_MUTATIONS_IDX].to_string(),
                )
            })
            .map_err(|e| DatasetError::from(FileError::on_line(path, line, e)))?;
        let labels = tokens[SCORE_IDX]
            .trim()
            .parse::<f32>()
            .map_err(|_| {
                ParseError::item(
                    "column",
                    SCORE_IDX,
                    "a floating point fitness score",
                    tokens[SCORE_IDX].to_string(),
                )
            })
            .map_err(|e| DatasetError::from(FileError::on_line(path, line, e)))?;

        emit(
            key,
            Record {
                variant: variant.to_string(),
                seq,
                num_mutations,
                labels,
            },
        )?;
        emitted += 1;
    }
    info!(logger: logger, "generated {} examples from {}", emitted, path.display());
    Ok(emitted)
}

/// Collect all examples of a fitness file
pub fn read_examples_from_file<P: AsRef<Path>>(
    path: P,
    wild_type: &str,
    resequencer: &Resequencer,
    logger: &dyn Log,
) -> Result<Vec<(usize, Record)>, DatasetError> {
    let mut result = Vec::new();
    generate_examples(path, wild_type, resequencer, logger, |key, record| {
        result.push((key, record));
        Ok::<(), DatasetError>(())
    })?;
    Ok(result)
}
