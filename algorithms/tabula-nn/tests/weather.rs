use approx::assert_abs_diff_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tabula::metrics::ToConfusionMatrix;
use tabula::prelude::*;
use tabula_datasets::{weather_nominal, weather_numeric};
use tabula_nn::{KnnClassifier, Result};

#[test]
fn one_neighbour_reproduces_training_labels() -> Result<()> {
    let dataset = weather_numeric();
    let model = KnnClassifier::params("play").k(1).fit(&dataset)?;

    let cm = model
        .predict_dataset(&dataset)
        .confusion_matrix(dataset.targets("play")?)?;
    assert_abs_diff_eq!(cm.accuracy(), 1.0);

    Ok(())
}

#[test]
fn nominal_attributes_only() -> Result<()> {
    let dataset = weather_nominal();
    let model = KnnClassifier::params("play").k(1).fit(&dataset)?;

    // all training instances are distinct
    for (idx, instance) in dataset.instances().enumerate() {
        assert_eq!(model.k_nearest(&instance)[0], (idx, 0.0));
    }

    Ok(())
}

#[test]
fn held_out_predictions_are_known_classes() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(42);
    let (train, valid) = weather_numeric().shuffle(&mut rng).split_with_ratio(0.7);

    let model = KnnClassifier::params("play").fit(&train)?;
    let predictions = model.predict_dataset(&valid);

    assert_eq!(predictions.len(), valid.nsamples());
    assert!(predictions.iter().all(|x| x == "yes" || x == "no"));

    Ok(())
}

#[test]
fn out_of_range_query_is_clamped() -> Result<()> {
    let dataset = weather_numeric();
    let model = KnnClassifier::params("play").k(1).fit(&dataset)?;

    // hotter than any day in the training data behaves like the hottest day
    let hot = Instance::new()
        .with("outlook", "sunny")
        .with("temperature", Value::numeric(120.0))
        .with("humidity", Value::numeric(85.0))
        .with("windy", "FALSE");
    let hottest = Instance::new()
        .with("outlook", "sunny")
        .with("temperature", Value::numeric(85.0))
        .with("humidity", Value::numeric(85.0))
        .with("windy", "FALSE");

    assert_eq!(model.k_nearest(&hot), model.k_nearest(&hottest));
    assert_eq!(model.predict(&hot), "no");

    Ok(())
}
