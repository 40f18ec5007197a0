//! Labelled training data in `text<TAB>label` form.

use std::path::Path;
use tracing::warn;

use crate::error::{PipelineError, Result};
use crate::label::Label;

#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub text: String,
    pub label: Label,
}

/// An ordered collection of labelled texts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub examples: Vec<Example>,
}

impl Dataset {
    /// Parse TSV content. Malformed lines are logged and skipped.
    pub fn from_tsv_str(content: &str) -> Self {
        let mut examples = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let Some((text, label)) = line.split_once('\t') else {
                warn!(line = line_no, "Skipping line without a tab separator");
                continue;
            };
            let text = text.trim();
            if text.is_empty() {
                warn!(line = line_no, "Skipping line with empty text");
                continue;
            }
            match label.parse::<Label>() {
                Ok(label) => examples.push(Example {
                    text: text.to_string(),
                    label,
                }),
                Err(e) => warn!(line = line_no, error = %e, "Skipping line with unknown label"),
            }
        }
        Self { examples }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.examples.iter().map(|e| e.text.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.examples.iter().map(|e| e.label).collect()
    }

    /// Example count per label, in [`Label::ALL`] order.
    pub fn label_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for e in &self.examples {
            counts[e.label.index()] += 1;
        }
        counts
    }

    /// Deterministic stratified split.
    ///
    /// Within each label, every `every`-th example (1-based, in file order)
    /// goes to the validation set; `every = 5` holds out 20%.
    pub fn split_stratified(&self, every: usize) -> (Dataset, Dataset) {
        let mut train = Vec::new();
        let mut validation = Vec::new();
        let mut seen = [0usize; 3];
        for e in &self.examples {
            let n = &mut seen[e.label.index()];
            *n += 1;
            if every > 0 && *n % every == 0 {
                validation.push(e.clone());
            } else {
                train.push(e.clone());
            }
        }
        (
            Dataset { examples: train },
            Dataset {
                examples: validation,
            },
        )
    }
}

/// Read a TSV training file.
///
/// # Errors
///
/// [`PipelineError::Dataset`] if the file cannot be read or holds no usable line.
pub fn load_tsv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::Dataset(format!(
            "Failed to read training data '{}': {e}",
            path.display()
        ))
    })?;
    let dataset = Dataset::from_tsv_str(&content);
    if dataset.is_empty() {
        return Err(PipelineError::Dataset(format!(
            "No labelled examples in '{}'",
            path.display()
        )));
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_skips_bad_lines() {
        let data = "I love it\tpositive\n\
                    \n\
                    no tab here\n\
                    meh\tmaybe\n\
                    \tnegative\n\
                    awful\tnegative\r\n\
                    tabs\tin\ttext\tneutral\n";
        let ds = Dataset::from_tsv_str(data);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.examples[0].label, Label::Positive);
        assert_eq!(ds.examples[1].text, "awful");
        assert_eq!(ds.examples[1].label, Label::Negative);
    }

    #[test]
    fn split_is_stratified_and_deterministic() {
        let mut content = String::new();
        for i in 0..10 {
            content.push_str(&format!("pos {i}\tpositive\n"));
            content.push_str(&format!("neg {i}\tnegative\n"));
        }
        for i in 0..5 {
            content.push_str(&format!("neu {i}\tneutral\n"));
        }
        let ds = Dataset::from_tsv_str(&content);
        let (train, val) = ds.split_stratified(5);
        assert_eq!(val.label_counts(), [2, 1, 2]);
        assert_eq!(train.len() + val.len(), ds.len());
        assert_eq!(ds.split_stratified(5), (train, val));
    }

    #[test]
    fn missing_file_is_dataset_error() {
        let err = load_tsv("/no/such/train.tsv").unwrap_err();
        assert!(matches!(err, PipelineError::Dataset(_)));
    }

    #[test]
    fn file_without_examples_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        std::fs::write(&path, "\n\njunk\n").unwrap();
        assert!(matches!(load_tsv(&path), Err(PipelineError::Dataset(_))));
    }
}
