//! Training History — parallel, append-only sample storage
//!
//! Feature rows may contain missing values; labels may be absent until an
//! external collaborator supplies them.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingHistory {
    features: Vec<Vec<Option<f64>>>,
    labels: Vec<Option<f64>>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample and return its index.
    pub fn push(&mut self, features: Vec<Option<f64>>, label: Option<f64>) -> usize {
        self.features.push(features);
        self.labels.push(label);
        self.features.len() - 1
    }

    /// Attach or replace the label of a recorded sample. Labels are 0 or 1.
    pub fn set_label(&mut self, index: usize, label: f64) -> CoreResult<()> {
        if label != 0.0 && label != 1.0 {
            return Err(CoreError::InvalidLabel {
                row: index,
                value: label,
            });
        }
        let slot = self
            .labels
            .get_mut(index)
            .ok_or(CoreError::UnknownSample(index))?;
        *slot = Some(label);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[Vec<Option<f64>>] {
        &self.features
    }

    pub fn labels(&self) -> &[Option<f64>] {
        &self.labels
    }

    pub fn labeled_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_some()).count()
    }

    /// Labeled samples in arrival order.
    pub fn labeled(&self) -> impl Iterator<Item = (&[Option<f64>], f64)> + '_ {
        self.features
            .iter()
            .zip(&self.labels)
            .filter_map(|(row, label)| label.map(|l| (row.as_slice(), l)))
    }

    /// Mean of the non-missing values recorded in `column`.
    pub fn column_mean(&self, column: usize) -> Option<f64> {
        let (sum, count) = self
            .features
            .iter()
            .filter_map(|row| row.get(column).copied().flatten())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut history = TrainingHistory::new();
        assert_eq!(history.push(vec![Some(1.0)], None), 0);
        assert_eq!(history.push(vec![Some(2.0)], Some(1.0)), 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.labels(), &[None, Some(1.0)]);
        assert_eq!(history.labeled_count(), 1);
    }

    #[test]
    fn test_set_label() {
        let mut history = TrainingHistory::new();
        history.push(vec![Some(1.0)], None);
        history.set_label(0, 0.0).unwrap();
        assert_eq!(history.labels()[0], Some(0.0));
        assert_eq!(history.set_label(5, 1.0), Err(CoreError::UnknownSample(5)));
    }

    #[test]
    fn test_set_label_rejects_non_binary() {
        let mut history = TrainingHistory::new();
        history.push(vec![Some(1.0)], None);
        assert!(matches!(
            history.set_label(0, 0.5),
            Err(CoreError::InvalidLabel { row: 0, .. })
        ));
        assert!(history.set_label(0, f64::NAN).is_err());
        assert_eq!(history.labels()[0], None);
    }

    #[test]
    fn test_column_mean_skips_missing() {
        let mut history = TrainingHistory::new();
        history.push(vec![Some(1.0), None], None);
        history.push(vec![Some(3.0), None], None);
        history.push(vec![None, None], None);
        assert_eq!(history.column_mean(0), Some(2.0));
        assert_eq!(history.column_mean(1), None);
        // Column beyond every row
        assert_eq!(history.column_mean(7), None);
    }

    #[test]
    fn test_labeled_iterator() {
        let mut history = TrainingHistory::new();
        history.push(vec![Some(1.0)], None);
        history.push(vec![Some(2.0)], Some(1.0));
        let labeled: Vec<_> = history.labeled().collect();
        assert_eq!(labeled.len(), 1);
        assert_eq!(labeled[0].0, &[Some(2.0)]);
        assert_eq!(labeled[0].1, 1.0);
    }
}
