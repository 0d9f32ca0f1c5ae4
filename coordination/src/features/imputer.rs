//! Mean imputation against the training history

use super::history::TrainingHistory;

pub struct Imputer;

impl Imputer {
    /// Fill every missing position with its column mean, or 0 when the column
    /// has no recorded values. The history is only read.
    pub fn impute(vector: &[Option<f64>], history: &TrainingHistory) -> Vec<f64> {
        vector
            .iter()
            .enumerate()
            .map(|(column, value)| match value {
                Some(v) => *v,
                None => history.column_mean(column).unwrap_or(0.0),
            })
            .collect()
    }

    /// Wrap a complete vector as one with no missing values.
    pub fn observed(vector: &[f64]) -> Vec<Option<f64>> {
        vector.iter().copied().map(Some).collect()
    }
}
