//! Labeled example files
//!
//! One JSON object per line: `{"text": "...", "label": 1}`. The label may be
//! `null` or omitted for examples that still need labeling. Blank lines and
//! lines starting with `#` are skipped.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    #[serde(default)]
    pub label: Option<f64>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: label {value} is not 0 or 1")]
    InvalidLabel { line: usize, value: f64 },
}

pub fn load_examples(path: &Path) -> Result<Vec<LabeledExample>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_examples(std::io::BufReader::new(file)).map_err(|err| match err {
        DatasetError::Io { source, .. } => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

pub fn parse_examples<R: BufRead>(reader: R) -> Result<Vec<LabeledExample>, DatasetError> {
    let mut examples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| DatasetError::Io {
            path: PathBuf::new(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let example: LabeledExample =
            serde_json::from_str(trimmed).map_err(|source| DatasetError::Parse {
                line: line_no,
                source,
            })?;
        if let Some(value) = example.label {
            if value != 0.0 && value != 1.0 {
                return Err(DatasetError::InvalidLabel {
                    line: line_no,
                    value,
                });
            }
        }
        examples.push(example);
    }
    Ok(examples)
}
