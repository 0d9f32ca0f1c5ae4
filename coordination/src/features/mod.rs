//! Feature pipeline — text extraction, training history and mean imputation

pub mod extractor;
pub mod history;
pub mod imputer;

pub use extractor::{FeatureExtractor, FEATURE_COUNT, FEATURE_NAMES};
pub use history::TrainingHistory;
pub use imputer::Imputer;
