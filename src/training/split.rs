//! Seeded stratified train/test split.
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::classification::NewsClass;
use crate::error::DetectorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Splits indices of `labels` so each class keeps its proportion on both
/// sides. Each class sends `round(test_size * count)` items to the test
/// side, clamped to `1..count`. Both returned index lists are sorted.
pub fn stratified_split(
    labels: &[NewsClass],
    test_size: f64,
    seed: u64,
) -> Result<Split, DetectorError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for class in NewsClass::ALL {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == class)
            .map(|(index, _)| index)
            .collect();
        let count = members.len();
        if count < 2 {
            return Err(DetectorError::InsufficientSamples { class, count });
        }

        members.shuffle(&mut rng);
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let n_test = ((test_size * count as f64).round() as usize).clamp(1, count - 1);
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn labels(real: usize, fake: usize) -> Vec<NewsClass> {
        let mut labels = vec![NewsClass::Real; real];
        labels.extend(vec![NewsClass::Fake; fake]);
        labels
    }

    #[test]
    fn preserves_class_proportions() {
        let labels = labels(50, 30);
        let split = stratified_split(&labels, 0.2, 42).unwrap();
        let count = |indices: &[usize], class: NewsClass| {
            indices.iter().filter(|&&i| labels[i] == class).count()
        };
        assert_eq!(count(&split.test, NewsClass::Real), 10);
        assert_eq!(count(&split.test, NewsClass::Fake), 6);
        assert_eq!(split.train.len(), 64);
    }

    #[test]
    fn partitions_every_index_once() {
        let labels = labels(13, 7);
        let split = stratified_split(&labels, 0.25, 7).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
        let test: HashSet<_> = split.test.iter().collect();
        assert!(split.train.iter().all(|i| !test.contains(i)));
    }

    #[test]
    fn same_seed_same_split() {
        let labels = labels(40, 40);
        assert_eq!(
            stratified_split(&labels, 0.2, 42).unwrap(),
            stratified_split(&labels, 0.2, 42).unwrap()
        );
        assert_ne!(
            stratified_split(&labels, 0.2, 42).unwrap(),
            stratified_split(&labels, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn tiny_classes_keep_one_on_each_side() {
        let split = stratified_split(&labels(2, 3), 0.01, 1).unwrap();
        assert_eq!(split.test.len(), 2);
        let split = stratified_split(&labels(2, 3), 0.99, 1).unwrap();
        assert_eq!(split.train.len(), 2);
    }

    #[test]
    fn singleton_class_is_rejected() {
        let err = stratified_split(&labels(5, 1), 0.2, 42).unwrap_err();
        assert!(matches!(
            err,
            DetectorError::InsufficientSamples {
                class: NewsClass::Fake,
                count: 1
            }
        ));
    }
}
