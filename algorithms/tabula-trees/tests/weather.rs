use approx::assert_abs_diff_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tabula::metrics::ToConfusionMatrix;
use tabula::prelude::*;
use tabula_datasets::{weather_nominal, weather_numeric};
use tabula_trees::DecisionTree;

#[test]
fn weather_tree_structure() -> Result<()> {
    let dataset = weather_nominal();
    let model = DecisionTree::params("play").fit(&dataset)?;

    assert_eq!(model.root_node().feature_name(), Some("outlook"));
    assert_eq!(model.features(), vec!["outlook", "humidity", "windy"]);
    assert_eq!(model.num_leaves(), 5);
    assert_eq!(model.max_depth(), 2);
    assert_eq!(model.fallback(), "yes");

    let overcast = model.root_node().child("overcast").unwrap();
    assert!(overcast.is_leaf());
    assert_eq!(overcast.prediction(), "yes");

    let importance = model.feature_importance();
    assert_eq!(importance.len(), 4);
    assert_abs_diff_eq!(importance.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    // temperature is never used
    assert_abs_diff_eq!(importance[1], 0.0);

    Ok(())
}

#[test]
fn weather_tree_training_accuracy() -> Result<()> {
    let dataset = weather_nominal();
    let model = DecisionTree::params("play").fit(&dataset)?;

    let cm = model
        .predict_dataset(&dataset)
        .confusion_matrix(dataset.targets("play")?)?;
    assert_abs_diff_eq!(cm.accuracy(), 1.0);

    Ok(())
}

#[test]
fn weather_tree_export() -> Result<()> {
    let dataset = weather_nominal();
    let model = DecisionTree::params("play").fit(&dataset)?;
    let text = model.export_text().to_string();

    assert!(text.starts_with("Split on outlook\nIf outlook = sunny:\n  Split on humidity\n"));
    assert!(text.contains("If outlook = overcast:\n  Predict: yes\n"));
    assert!(text.contains("  If windy = TRUE:\n    Predict: no\n"));

    Ok(())
}

#[test]
fn shuffled_split_predicts_every_instance() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(42);
    let (train, valid) = weather_nominal().shuffle(&mut rng).split_with_ratio(0.7);

    let model = DecisionTree::params("play")
        .min_samples(2)
        .max_depth(3)
        .fit(&train)?;
    let predictions = model.predict_dataset(&valid);

    assert_eq!(predictions.len(), valid.nsamples());
    assert!(predictions.iter().all(|x| x == "yes" || x == "no"));

    Ok(())
}

#[test]
fn numeric_weather_is_rejected() {
    let dataset = weather_numeric();

    assert_eq!(
        DecisionTree::params("play").fit(&dataset),
        Err(Error::NumericAttribute("temperature".into()))
    );
}
