use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field};

use feature_prep::dataset::Dataset;
use feature_prep::exceptions::{FeaturePrepError, FeaturePrepResult};
use feature_prep::transformers::categorical_encoding::{
    RareLabelEncoder, TargetMeanEncoder, RARE_LABEL,
};

/// Creates a dataset with a single Utf8 column named "garage_type".
fn garage_dataset(values: Vec<Option<&str>>) -> Dataset {
    Dataset::try_new(
        vec![Field::new("garage_type", DataType::Utf8, true)],
        vec![Arc::new(StringArray::from(values)) as ArrayRef],
    )
    .unwrap()
}

fn assert_garage_values(dataset: &Dataset, expected: &[Option<&str>]) {
    let garage = dataset.str_column("garage_type").unwrap();
    for (i, exp) in expected.iter().enumerate() {
        let value = if garage.is_null(i) {
            None
        } else {
            Some(garage.value(i))
        };
        assert_eq!(value, *exp, "row {}: expected {:?}, got {:?}", i, exp, value);
    }
}

#[test]
fn test_rare_label_encoding() -> FeaturePrepResult<()> {
    // "attached" appears in 3 of 4 rows (75%), "detached" in 1 of 4 (25%).
    // With a tolerance of 0.5, only "attached" is kept as frequent.
    let train = garage_dataset(vec![
        Some("attached"),
        Some("attached"),
        Some("attached"),
        Some("detached"),
    ]);

    let mut encoder = RareLabelEncoder::with_tolerance("garage_type", 0.5);
    encoder.fit(&train, None)?;

    let fresh = garage_dataset(vec![Some("attached"), Some("detached"), Some("carport")]);
    let transformed = encoder.transform(&fresh)?;
    assert_garage_values(
        &transformed,
        &[Some("attached"), Some(RARE_LABEL), Some(RARE_LABEL)],
    );
    Ok(())
}

#[test]
fn test_rare_label_default_tolerance() -> FeaturePrepResult<()> {
    // At the default tolerance of 0.05, every label at 25% frequency is frequent.
    let train = garage_dataset(vec![
        Some("attached"),
        Some("detached"),
        Some("carport"),
        Some("basement"),
    ]);

    let mut encoder = RareLabelEncoder::new("garage_type");
    encoder.fit(&train, None)?;
    let transformed = encoder.transform(&train)?;
    assert_garage_values(
        &transformed,
        &[
            Some("attached"),
            Some("detached"),
            Some("carport"),
            Some("basement"),
        ],
    );
    Ok(())
}

#[test]
fn test_rare_label_encodes_missing_values_as_rare() -> FeaturePrepResult<()> {
    let train = garage_dataset(vec![Some("attached"), Some("attached")]);

    let mut encoder = RareLabelEncoder::with_tolerance("garage_type", 0.5);
    encoder.fit(&train, None)?;

    let fresh = garage_dataset(vec![None, Some("attached")]);
    let transformed = encoder.transform(&fresh)?;
    assert_garage_values(&transformed, &[Some(RARE_LABEL), Some("attached")]);
    Ok(())
}

#[test]
fn test_rare_label_requires_fit() {
    let dataset = garage_dataset(vec![Some("attached")]);

    let encoder = RareLabelEncoder::new("garage_type");
    let err = encoder.transform(&dataset).unwrap_err();
    assert!(matches!(err, FeaturePrepError::FitNotCalled));
}

#[test]
fn test_rare_label_rejects_empty_training_data() {
    let train = garage_dataset(Vec::new());

    let mut encoder = RareLabelEncoder::new("garage_type");
    let err = encoder.fit(&train, None).unwrap_err();
    assert!(matches!(err, FeaturePrepError::InvalidParameter(_)));
}

#[test]
fn test_rare_label_rejects_tolerance_outside_unit_interval() {
    let train = garage_dataset(vec![Some("attached")]);

    let mut encoder = RareLabelEncoder::with_tolerance("garage_type", 1.5);
    let err = encoder.fit(&train, None).unwrap_err();
    assert!(matches!(err, FeaturePrepError::InvalidParameter(_)));

    let mut encoder = RareLabelEncoder::with_tolerance("garage_type", -0.1);
    let err = encoder.fit(&train, None).unwrap_err();
    assert!(matches!(err, FeaturePrepError::InvalidParameter(_)));
}

#[test]
fn test_target_mean_encoding_ranks_by_mean() -> FeaturePrepResult<()> {
    // Mean target: "attached" = 15.0, "detached" = 1.5.
    // Ranks follow ascending mean order: "detached" -> 0, "attached" -> 1.
    let train = garage_dataset(vec![
        Some("attached"),
        Some("detached"),
        Some("attached"),
        Some("detached"),
    ]);
    let target = Float64Array::from(vec![10.0, 1.0, 20.0, 2.0]);

    let mut encoder = TargetMeanEncoder::new("garage_type");
    encoder.fit(&train, Some(&target))?;

    let fresh = garage_dataset(vec![Some("attached"), Some("detached")]);
    let transformed = encoder.transform(&fresh)?;

    // The encoded column is Int64 now.
    let garage = transformed.i64_column("garage_type")?;
    let expected = vec![1, 0];
    for (i, exp) in expected.iter().enumerate() {
        assert_eq!(
            garage.value(i),
            *exp,
            "row {}: expected {:?}, got {:?}",
            i,
            exp,
            garage.value(i)
        );
    }
    Ok(())
}

#[test]
fn test_target_mean_unseen_label_is_an_encoding_gap() -> FeaturePrepResult<()> {
    let train = garage_dataset(vec![Some("attached"), Some("detached")]);
    let target = Float64Array::from(vec![10.0, 1.0]);

    let mut encoder = TargetMeanEncoder::new("garage_type");
    encoder.fit(&train, Some(&target))?;

    // "carport" was never seen during fit, so there is no rank for it.
    let fresh = garage_dataset(vec![Some("carport")]);
    let err = encoder.transform(&fresh).unwrap_err();
    match err {
        FeaturePrepError::EncodingGap { columns } => {
            assert_eq!(columns, vec!["garage_type".to_string()]);
        }
        other => panic!("expected EncodingGap, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_target_mean_missing_value_is_an_encoding_gap() -> FeaturePrepResult<()> {
    let train = garage_dataset(vec![Some("attached"), Some("detached")]);
    let target = Float64Array::from(vec![10.0, 1.0]);

    let mut encoder = TargetMeanEncoder::new("garage_type");
    encoder.fit(&train, Some(&target))?;

    let fresh = garage_dataset(vec![None, Some("attached")]);
    let err = encoder.transform(&fresh).unwrap_err();
    assert!(matches!(err, FeaturePrepError::EncodingGap { .. }));
    Ok(())
}

#[test]
fn test_target_mean_requires_a_target() {
    let train = garage_dataset(vec![Some("attached")]);

    let mut encoder = TargetMeanEncoder::new("garage_type");
    let err = encoder.fit(&train, None).unwrap_err();
    assert!(matches!(err, FeaturePrepError::InvalidParameter(_)));
}

#[test]
fn test_target_mean_rejects_misaligned_target() {
    let train = garage_dataset(vec![Some("attached"), Some("detached")]);
    let target = Float64Array::from(vec![10.0]);

    let mut encoder = TargetMeanEncoder::new("garage_type");
    let err = encoder.fit(&train, Some(&target)).unwrap_err();
    assert!(matches!(err, FeaturePrepError::InvalidParameter(_)));
}

#[test]
fn test_target_mean_breaks_ties_lexically() -> FeaturePrepResult<()> {
    // Both labels have the same mean target, so ranks follow label order.
    let train = garage_dataset(vec![Some("detached"), Some("attached")]);
    let target = Float64Array::from(vec![5.0, 5.0]);

    let mut encoder = TargetMeanEncoder::new("garage_type");
    encoder.fit(&train, Some(&target))?;

    let transformed = encoder.transform(&train)?;
    let garage = transformed.i64_column("garage_type")?;
    assert_eq!(garage.value(0), 1, "detached should rank after attached");
    assert_eq!(garage.value(1), 0, "attached should rank first");
    Ok(())
}

#[test]
fn test_target_mean_requires_fit() {
    let dataset = garage_dataset(vec![Some("attached")]);

    let encoder = TargetMeanEncoder::new("garage_type");
    let err = encoder.transform(&dataset).unwrap_err();
    assert!(matches!(err, FeaturePrepError::FitNotCalled));
}
