use tabula::metrics::ToConfusionMatrix;
use tabula::prelude::*;
use tabula_trees::DecisionTree;

fn main() -> Result<()> {
    let dataset = tabula_datasets::weather_nominal();

    println!("Training ID3 on {} days...", dataset.nsamples());
    let model = DecisionTree::params("play")
        .max_depth(10)
        .min_samples(2)
        .fit(&dataset)?;

    print!("{}", model.export_text());

    let cm = model
        .predict_dataset(&dataset)
        .confusion_matrix(dataset.targets("play")?)?;

    println!("{:?}", cm);
    println!("Training accuracy: {:.1}%", 100.0 * cm.accuracy());

    let day = Instance::new()
        .with("outlook", "sunny")
        .with("temperature", "cool")
        .with("humidity", "high")
        .with("windy", "TRUE");
    println!("Play on a cool, humid and windy sunny day? {}", model.predict(&day));

    Ok(())
}
