use candle_core::Device;
use candle_sentiment::error::Result;
use candle_sentiment::models::{analyze_ml, LinearModel, ModelArtifact, ARTIFACT_VERSION};
use candle_sentiment::sentiment::{Label, SentimentPipelineBuilder, StrategyState};
use candle_sentiment::training::{load_tsv, train, TrainingOptions};

const DEMO_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/demo_train.tsv");

#[test]
fn demo_data_loads() -> Result<()> {
    let dataset = load_tsv(DEMO_DATA)?;
    assert_eq!(dataset.len(), 90);
    assert_eq!(dataset.label_counts(), [30, 30, 30]);
    Ok(())
}

#[test]
fn train_save_load_predict() -> Result<()> {
    let dataset = load_tsv(DEMO_DATA)?;
    let (artifact, report) = train(&dataset, &TrainingOptions::default())?;

    assert_eq!(report.train_size, 72);
    assert_eq!(report.validation_size, 18);
    assert!((0.0..=1.0).contains(&report.accuracy));
    assert!((0.0..=1.0).contains(&report.macro_f1));
    assert!(report.to_string().starts_with("Validation: Accuracy="));

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sentiment.json");
    artifact.save(&path)?;

    let loaded = ModelArtifact::load(&path)?;
    assert_eq!(loaded.version, ARTIFACT_VERSION);
    assert_eq!(loaded.labels, Label::ALL.to_vec());

    let model = LinearModel::from_artifact(loaded, &Device::Cpu)?;
    let probs = model.predict_proba("I love this!")?;
    assert!((probs.negative + probs.neutral + probs.positive - 1.0).abs() < 1e-4);

    assert!(analyze_ml(&model, "I love this amazing product!")? > 0.10);
    assert!(analyze_ml(&model, "This is terrible and awful")? < -0.10);
    for text in ["excellent", "bad", "okay", "I love this!", "I hate this!"] {
        let score = analyze_ml(&model, text)?;
        assert!((-1.0..=1.0).contains(&score), "{text}: {score}");
    }

    let pipeline = SentimentPipelineBuilder::new().model_path(&path).build()?;
    assert_eq!(pipeline.analyze("I love pizza")?, Label::Positive);
    assert_eq!(pipeline.analyze("This is terrible")?, Label::Negative);
    assert_eq!(pipeline.state(), StrategyState::ModelLoaded);
    Ok(())
}

#[test]
fn training_is_deterministic() -> Result<()> {
    let dataset = load_tsv(DEMO_DATA)?;
    let mut options = TrainingOptions::default();
    options.logistic.epochs = 20;

    let (a, report_a) = train(&dataset, &options)?;
    let (b, report_b) = train(&dataset, &options)?;
    assert_eq!(report_a, report_b);
    assert_eq!(a.vectorizer.vocabulary, b.vectorizer.vocabulary);
    for (row_a, row_b) in a.classifier.weights.iter().zip(&b.classifier.weights) {
        for (x, y) in row_a.iter().zip(row_b) {
            assert!((x - y).abs() < 1e-5);
        }
    }
    Ok(())
}
