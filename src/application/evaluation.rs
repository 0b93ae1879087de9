//! Held-out evaluation split used to report classifier accuracy.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::{EmployeeRecord, FeatureEncoder, FeatureVector, RetentionLabel};
use crate::ports::DatasetError;
use crate::StaywiseError;

/// Encoded rows and labels the classifier is scored against.
#[derive(Debug, Clone)]
pub struct EvaluationSplit {
    rows: Vec<FeatureVector>,
    labels: Vec<RetentionLabel>,
    train_size: usize,
}

impl EvaluationSplit {
    /// Shuffle the records with a seeded RNG and keep the tail as test set.
    ///
    /// `floor(train_fraction * n)` rows go to the (unused) training side;
    /// the rest is encoded and kept. The same seed always yields the same
    /// split.
    ///
    /// # Errors
    /// Returns error if a record cannot be encoded.
    pub fn holdout(
        records: &[EmployeeRecord],
        train_fraction: f64,
        seed: u64,
    ) -> Result<Self, StaywiseError> {
        let n = records.len();
        let train_size = ((train_fraction.clamp(0.0, 1.0)) * n as f64).floor() as usize;

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let encoder = FeatureEncoder;
        let test = &indices[train_size..];
        let mut rows = Vec::with_capacity(test.len());
        let mut labels = Vec::with_capacity(test.len());

        for &i in test {
            let record = &records[i];
            let profile = record.to_profile().ok_or_else(|| DatasetError::InvalidRow {
                row: i + 1,
                message: format!("unknown salary {:?}", record.salary),
            })?;
            let label =
                RetentionLabel::from_class(record.left).ok_or_else(|| DatasetError::InvalidRow {
                    row: i + 1,
                    message: format!("left must be 0 or 1, got {}", record.left),
                })?;

            rows.push(encoder.encode(&profile)?);
            labels.push(label);
        }

        tracing::info!(
            "Prepared evaluation split: {} train / {} test (seed={})",
            train_size,
            rows.len(),
            seed
        );

        Ok(Self {
            rows,
            labels,
            train_size,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    #[must_use]
    pub fn labels(&self) -> &[RetentionLabel] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn train_size(&self) -> usize {
        self.train_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<EmployeeRecord> {
        (0..n)
            .map(|i| EmployeeRecord {
                satisfaction_level: (i % 100) as f64 / 100.0,
                last_evaluation: 0.5,
                number_project: 2 + (i % 5) as u32,
                average_monthly_hours: 120.0 + i as f64,
                time_spend_company: 3,
                left: (i % 2) as u8,
                department: "support".into(),
                salary: "medium".into(),
            })
            .collect()
    }

    #[test]
    fn test_split_sizes() {
        let split = EvaluationSplit::holdout(&records(10), 0.8, 7).expect("Should split");
        assert_eq!(split.train_size(), 8);
        assert_eq!(split.len(), 2);
        assert_eq!(split.labels().len(), 2);

        let split = EvaluationSplit::holdout(&records(11), 0.8, 7).expect("Should split");
        assert_eq!(split.train_size(), 8);
        assert_eq!(split.len(), 3);
    }

    #[test]
    fn test_split_is_deterministic_per_seed() {
        let data = records(50);
        let a = EvaluationSplit::holdout(&data, 0.8, 42).expect("Should split");
        let b = EvaluationSplit::holdout(&data, 0.8, 42).expect("Should split");
        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.labels(), b.labels());
    }

    #[test]
    fn test_empty_dataset() {
        let split = EvaluationSplit::holdout(&[], 0.8, 1).expect("Should split");
        assert!(split.is_empty());
    }

    #[test]
    fn test_rejects_unknown_department() {
        let mut data = records(5);
        for r in data.iter_mut() {
            r.department = "engineering".into();
        }
        let err = EvaluationSplit::holdout(&data, 0.0, 1).expect_err("Should fail");
        assert!(matches!(err, StaywiseError::Encoding(_)));
    }
}
