use approx::assert_abs_diff_eq;
use tabula::metrics::ToConfusionMatrix;
use tabula::prelude::*;
use tabula_bayes::{CategoricalNb, Result};
use tabula_datasets::{weather_nominal, weather_numeric};

fn windy_sunny_day() -> Instance<f64> {
    Instance::new()
        .with("outlook", "sunny")
        .with("temperature", "cool")
        .with("humidity", "high")
        .with("windy", "TRUE")
}

#[test]
fn smoothed_weather_prediction() -> Result<()> {
    let dataset = weather_nominal();
    let model = CategoricalNb::params("play").fit(&dataset)?;

    assert_eq!(model.classes(), &["yes", "no"]);
    assert_abs_diff_eq!(model.prior("yes").unwrap(), 10.0 / 16.0);
    assert_abs_diff_eq!(
        model.conditional_probability("no", "outlook", "overcast").unwrap(),
        1.0 / 8.0
    );

    let day = windy_sunny_day();
    assert_eq!(model.predict(&day), "no");

    let proba = model.predict_proba(&day);
    assert!(proba[1] > proba[0]);
    assert_abs_diff_eq!(proba.sum(), 1.0, epsilon = 1e-12);

    Ok(())
}

#[test]
fn exact_weather_estimates() -> Result<()> {
    let dataset = weather_nominal();
    let model = CategoricalNb::params("play").laplace(false).fit(&dataset)?;

    // overcast days were always played
    assert_abs_diff_eq!(
        model.conditional_probability("no", "outlook", "overcast").unwrap(),
        0.0
    );
    let overcast = Instance::new().with("outlook", "overcast");
    assert_eq!(model.predict(&overcast), "yes");
    assert_eq!(model.joint_log_likelihood(&overcast)[1], f64::NEG_INFINITY);

    Ok(())
}

#[test]
fn weather_training_accuracy() -> Result<()> {
    let dataset = weather_nominal();
    let model = CategoricalNb::params("play").fit(&dataset)?;

    let cm = model
        .predict_dataset(&dataset)
        .confusion_matrix(dataset.targets("play")?)?;
    // Naive Bayes does not separate the weather data perfectly
    assert!(cm.accuracy() > 0.85);

    Ok(())
}

#[test]
fn numeric_attributes_are_categories() -> Result<()> {
    let dataset = weather_numeric();
    let model = CategoricalNb::params("play").laplace(false).fit(&dataset)?;

    // a temperature of 85 was observed once, on a day without play
    assert_abs_diff_eq!(
        model.conditional_probability("no", "temperature", "85").unwrap(),
        1.0 / 5.0
    );
    assert!(model.conditional_probability("no", "temperature", "86").is_none());

    Ok(())
}
