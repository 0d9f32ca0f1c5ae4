//! Core error taxonomy
//!
//! Every failure raised by the tree learner, the classifier and the feature
//! pipeline is represented here. All of them are local and synchronous: the
//! immediate caller receives the error and nothing inside the core retries.
//! The escalation controller is the only component that swallows them, turning
//! a fault into an error-recovery delegation.

use thiserror::Error;

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// `train` was called without any samples.
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    /// `predict`/`classify` was called before a successful `train`.
    #[error("model not trained yet")]
    ModelNotTrained,

    /// Feature extraction on empty or whitespace-only text.
    #[error("input text is empty or whitespace-only")]
    DegenerateInput,

    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("feature row {row} has width {width}, expected {expected}")]
    RaggedFeatures {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("label at row {row} is {value}, expected 0 or 1")]
    InvalidLabel { row: usize, value: f64 },

    #[error("non-finite value at row {row}, feature {feature}")]
    NonFiniteFeature { row: usize, feature: usize },

    #[error("split references feature {index} but input has width {width}")]
    FeatureIndexOutOfRange { index: usize, width: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no recorded sample at index {0}")]
    UnknownSample(usize),
}

impl CoreError {
    /// Machine-readable code, used in diagnostic traces.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::ModelNotTrained => "MODEL_NOT_TRAINED",
            Self::DegenerateInput => "DEGENERATE_INPUT",
            Self::LengthMismatch { .. } => "LENGTH_MISMATCH",
            Self::RaggedFeatures { .. } => "RAGGED_FEATURES",
            Self::InvalidLabel { .. } => "INVALID_LABEL",
            Self::NonFiniteFeature { .. } => "NON_FINITE_FEATURE",
            Self::FeatureIndexOutOfRange { .. } => "FEATURE_INDEX_OUT_OF_RANGE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnknownSample(_) => "UNKNOWN_SAMPLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::LengthMismatch {
            features: 3,
            labels: 2,
        };
        assert_eq!(err.to_string(), "3 feature rows but 2 labels");
        assert_eq!(
            CoreError::ModelNotTrained.to_string(),
            "model not trained yet"
        );
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            CoreError::EmptyDataset,
            CoreError::ModelNotTrained,
            CoreError::DegenerateInput,
            CoreError::InvalidConfig("x".into()),
            CoreError::UnknownSample(0),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
