//! Scoring strategies and the pieces of the trained model.

pub mod artifact;
pub mod lexicon;
pub mod linear;
pub mod vectorizer;

pub use artifact::{LinearClassifier, ModelArtifact, ARTIFACT_VERSION};
pub use lexicon::{analyze_fallback, Lexicon, LexiconModel, LexiconOptions};
pub use linear::{analyze_ml, LabelScores, LinearModel};
pub use vectorizer::{TfIdfVectorizer, VectorizerOptions, MAX_NGRAM};
