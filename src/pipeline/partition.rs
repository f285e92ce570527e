//! Seeded stratified train/evaluation partition

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::features::FeatureMatrix;
use super::target::LabelVector;
use crate::error::{OncoError, Result};

/// Train/evaluation split of a feature matrix and its labels.
///
/// `train_indices` and `eval_indices` are original row positions, ascending,
/// disjoint, and together cover every row exactly once.
#[derive(Debug, Clone)]
pub struct SplitPair {
    pub train: FeatureMatrix,
    pub eval: FeatureMatrix,
    pub train_labels: LabelVector,
    pub eval_labels: LabelVector,
    pub train_indices: Vec<usize>,
    pub eval_indices: Vec<usize>,
}

/// Validate that `test_fraction` lies strictly inside (0, 1)
pub fn validate_test_fraction(test_fraction: f64) -> Result<()> {
    if test_fraction > 0.0 && test_fraction < 1.0 {
        Ok(())
    } else {
        Err(OncoError::validation(format!(
            "test_fraction must be in (0, 1) exclusive, got {}",
            test_fraction
        )))
    }
}

/// Compute stratified train/eval row indices from per-row class keys.
///
/// Classes are visited in sorted key order. Within each class the members
/// are shuffled by a `ChaCha8Rng` seeded with `seed`, and
/// `round(test_fraction * class_size)` of them, clamped to
/// `[1, class_size - 1]`, go to evaluation.
///
/// # Errors
/// `OncoError::Validation` for an out-of-range fraction, no rows, or any
/// class with fewer than 2 members.
pub fn stratified_indices(
    class_keys: &[String],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    validate_test_fraction(test_fraction)?;
    if class_keys.is_empty() {
        return Err(OncoError::validation("Cannot partition an empty dataset"));
    }

    let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (row, key) in class_keys.iter().enumerate() {
        by_class.entry(key.as_str()).or_default().push(row);
    }

    if let Some((class, members)) = by_class.iter().find(|(_, members)| members.len() < 2) {
        return Err(OncoError::validation(format!(
            "Class '{}' has {} member(s); stratification needs at least 2 per class",
            class,
            members.len()
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(class_keys.len());
    let mut eval = Vec::new();

    for members in by_class.values_mut() {
        members.shuffle(&mut rng);
        let n = members.len();
        let n_eval = ((test_fraction * n as f64).round() as usize).clamp(1, n - 1);
        eval.extend_from_slice(&members[..n_eval]);
        train.extend_from_slice(&members[n_eval..]);
    }

    train.sort_unstable();
    eval.sort_unstable();
    Ok((train, eval))
}

/// Deterministic stratified partition of `features`/`labels`.
///
/// # Errors
/// `OncoError::Validation` when lengths differ, `test_fraction` is outside
/// (0, 1), or a class has fewer than 2 members.
pub fn stratified_partition(
    features: &FeatureMatrix,
    labels: &LabelVector,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitPair> {
    if features.n_rows() != labels.len() {
        return Err(OncoError::validation(format!(
            "Feature matrix has {} rows but label vector has {}",
            features.n_rows(),
            labels.len()
        )));
    }

    let keys = labels.class_keys()?;
    let (train_indices, eval_indices) = stratified_indices(&keys, test_fraction, seed)?;

    log::info!(
        "partitioned {} rows into {} train / {} eval (seed {})",
        keys.len(),
        train_indices.len(),
        eval_indices.len(),
        seed
    );

    Ok(SplitPair {
        train: features.take_rows(&train_indices)?,
        eval: features.take_rows(&eval_indices)?,
        train_labels: labels.take_rows(&train_indices)?,
        eval_labels: labels.take_rows(&eval_indices)?,
        train_indices,
        eval_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(counts: &[(&str, usize)]) -> Vec<String> {
        counts.iter()
            .flat_map(|(k, n)| std::iter::repeat(k.to_string()).take(*n))
            .collect()
    }

    #[test]
    fn test_indices_cover_all_rows() {
        let labels = keys(&[("B", 30), ("M", 20)]);
        let (train, eval) = stratified_indices(&labels, 0.2, 42).unwrap();

        assert_eq!(train.len() + eval.len(), 50);
        let mut all: Vec<usize> = train.iter().chain(eval.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_per_class_eval_counts() {
        let labels = keys(&[("B", 30), ("M", 20)]);
        let (_, eval) = stratified_indices(&labels, 0.2, 7).unwrap();

        let eval_b = eval.iter().filter(|&&i| labels[i] == "B").count();
        let eval_m = eval.iter().filter(|&&i| labels[i] == "M").count();
        assert_eq!(eval_b, 6);
        assert_eq!(eval_m, 4);
    }

    #[test]
    fn test_small_class_keeps_one_on_each_side() {
        let labels = keys(&[("B", 10), ("M", 2)]);
        let (train, eval) = stratified_indices(&labels, 0.1, 1).unwrap();

        assert_eq!(train.iter().filter(|&&i| labels[i] == "M").count(), 1);
        assert_eq!(eval.iter().filter(|&&i| labels[i] == "M").count(), 1);
    }

    #[test]
    fn test_singleton_class_rejected() {
        let labels = keys(&[("B", 10), ("M", 1)]);
        let err = stratified_indices(&labels, 0.2, 1).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(validate_test_fraction(0.0).is_err());
        assert!(validate_test_fraction(1.0).is_err());
        assert!(validate_test_fraction(-0.5).is_err());
        assert!(validate_test_fraction(f64::NAN).is_err());
        assert!(validate_test_fraction(0.25).is_ok());
    }

    #[test]
    fn test_seed_changes_assignment() {
        let labels = keys(&[("B", 50), ("M", 50)]);
        let (_, eval_a) = stratified_indices(&labels, 0.3, 1).unwrap();
        let (_, eval_b) = stratified_indices(&labels, 0.3, 2).unwrap();
        let (_, eval_a2) = stratified_indices(&labels, 0.3, 1).unwrap();

        assert_eq!(eval_a, eval_a2);
        assert_ne!(eval_a, eval_b);
    }
}
