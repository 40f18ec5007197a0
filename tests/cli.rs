use std::path::Path;
use std::process::{Command, Output};

fn sentiment(args: &[&str], model: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sentiment"))
        .args(args)
        .arg("--model")
        .arg(model)
        .env_remove("ENABLE_HTTP")
        .env_remove("PORT")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run sentiment binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn prints_labels() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("absent.json");

    for (text, expected) in [
        ("I love pizza!", "positive"),
        ("This is terrible", "negative"),
        ("It works fine", "neutral"),
    ] {
        let output = sentiment(&[text], &model);
        assert!(output.status.success(), "{text}: {output:?}");
        assert_eq!(stdout(&output), expected);
        assert!(output.stderr.is_empty(), "{text}: {output:?}");
    }
}

#[test]
fn score_mode_prints_three_decimals() {
    let dir = tempfile::tempdir().unwrap();
    let output = sentiment(&["--score", "I love this!"], &dir.path().join("absent.json"));
    assert!(output.status.success());

    let text = stdout(&output);
    let score: f32 = text.parse().unwrap();
    assert!((-1.0..=1.0).contains(&score));
    assert!(score > 0.0);
    assert_eq!(text.split('.').nth(1).map(str::len), Some(3), "{text}");
}

#[test]
fn missing_text_prints_usage_and_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = sentiment(&[], &dir.path().join("absent.json"));
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("sentiment.toml");
    std::fs::write(&config, "[thresholds]\npositive = 5.0\n").unwrap();

    let output = sentiment(
        &["--config", config.to_str().unwrap(), "hello"],
        &dir.path().join("absent.json"),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("thresholds.positive"));
}

#[test]
fn config_thresholds_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("sentiment.toml");
    std::fs::write(&config, "[thresholds]\npositive = 0.9\nnegative = -0.9\n").unwrap();

    let output = sentiment(
        &["--config", config.to_str().unwrap(), "I love pizza!"],
        &dir.path().join("absent.json"),
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "neutral");
}
