//! Rule-based sentiment scoring from word lists.
//!
//! Used whenever no trained model is available. Scoring is deterministic and
//! does no I/O.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{PipelineError, Result};
use crate::pipelines::sentiment::model::SentimentModel;
use crate::text::{clamp_unit, tokenize};

const POSITIVE_WORDS: &[&str] = &[
    "love",
    "loved",
    "great",
    "amazing",
    "excellent",
    "fantastic",
    "wonderful",
    "awesome",
    "happy",
    "best",
    "enjoyed",
    "recommend",
    "perfect",
    "brilliant",
    "outstanding",
    "good",
    "nice",
    "super",
    "beautiful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "hate",
    "terrible",
    "awful",
    "horrible",
    "worst",
    "bad",
    "disappointed",
    "garbage",
    "waste",
    "broken",
    "frustrated",
    "upset",
    "poor",
    "useless",
    "disgusting",
    "pathetic",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "won't", "can't", "cannot", "isn't",
    "wasn't", "neither", "nor",
];

const BOOSTERS: &[&str] = &[
    "very",
    "extremely",
    "absolutely",
    "really",
    "so",
    "highly",
    "completely",
    "totally",
    "utterly",
];

const DAMPENERS: &[&str] = &[
    "somewhat", "slightly", "barely", "hardly", "maybe", "perhaps", "kinda", "sorta",
];

const POSITIVE_EMOJI: &[&str] = &["😊", "😀", "😃", "❤️", "👍", "🎉", "✨"];
const NEGATIVE_EMOJI: &[&str] = &["😡", "😢", "😞", "👎", "💔", "😠"];

static DEFAULT_LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| Arc::new(Lexicon::builtin()));

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Tunable constants of the lexicon scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconOptions {
    /// Magnitude contributed by one lexicon word.
    pub token_weight: f32,
    /// Multiplier applied by a booster in front of a polarity word.
    pub booster: f32,
    /// Multiplier applied by a dampener in front of a polarity word.
    pub dampener: f32,
    /// How many tokens before a polarity word (ignoring modifiers) a negator may sit.
    pub negation_window: usize,
    /// Emphasis added per `!` when the text already carries sentiment.
    pub exclamation_weight: f32,
    /// Contribution of each distinct emoji hint.
    pub emoji_weight: f32,
}

impl Default for LexiconOptions {
    fn default() -> Self {
        Self {
            token_weight: 0.7,
            booster: 1.5,
            dampener: 0.5,
            negation_window: 1,
            exclamation_weight: 0.1,
            emoji_weight: 0.3,
        }
    }
}

impl LexiconOptions {
    /// Collect every invalid field.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let checks = [
            ("lexicon.token_weight", self.token_weight),
            ("lexicon.booster", self.booster),
            ("lexicon.dampener", self.dampener),
            ("lexicon.exclamation_weight", self.exclamation_weight),
            ("lexicon.emoji_weight", self.emoji_weight),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{field} = {value} must be a finite, non-negative number"));
            }
        }
        if self.token_weight == 0.0 {
            errors.push("lexicon.token_weight must be greater than 0".to_string());
        }
        if self.negation_window == 0 {
            errors.push("lexicon.negation_window must be at least 1".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Word lists for the rule-based analyzer.
///
/// `positive` and `negative` are always disjoint, and neither overlaps the
/// modifier lists.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    negators: HashSet<String>,
    boosters: HashSet<String>,
    dampeners: HashSet<String>,
    positive_emoji: Vec<String>,
    negative_emoji: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    fn builtin() -> Self {
        Self {
            positive: to_set(POSITIVE_WORDS),
            negative: to_set(NEGATIVE_WORDS),
            negators: to_set(NEGATORS),
            boosters: to_set(BOOSTERS),
            dampeners: to_set(DAMPENERS),
            positive_emoji: POSITIVE_EMOJI.iter().map(|e| e.to_string()).collect(),
            negative_emoji: NEGATIVE_EMOJI.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// The built-in lexicon, constructed once per process.
    pub fn shared() -> Arc<Lexicon> {
        DEFAULT_LEXICON.clone()
    }

    /// Add positive words. Words are normalized like input text.
    pub fn with_positive<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.positive.extend(normalize_words(words)?);
        self.check_disjoint()?;
        Ok(self)
    }

    /// Add negative words.
    pub fn with_negative<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.negative.extend(normalize_words(words)?);
        self.check_disjoint()?;
        Ok(self)
    }

    /// Add negation markers.
    pub fn with_negators<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.negators.extend(normalize_words(words)?);
        self.check_disjoint()?;
        Ok(self)
    }

    /// Add booster words.
    pub fn with_boosters<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.boosters.extend(normalize_words(words)?);
        self.check_disjoint()?;
        Ok(self)
    }

    /// Add dampener words.
    pub fn with_dampeners<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dampeners.extend(normalize_words(words)?);
        self.check_disjoint()?;
        Ok(self)
    }

    fn check_disjoint(&self) -> Result<()> {
        let groups = [
            ("positive", &self.positive),
            ("negative", &self.negative),
            ("negator", &self.negators),
            ("booster", &self.boosters),
            ("dampener", &self.dampeners),
        ];
        for (i, (a_name, a)) in groups.iter().enumerate() {
            for (b_name, b) in groups.iter().skip(i + 1) {
                let mut overlap: Vec<&String> = a.intersection(b).collect();
                if !overlap.is_empty() {
                    overlap.sort();
                    return Err(PipelineError::Config(format!(
                        "Lexicon {a_name} and {b_name} lists overlap: {}",
                        overlap
                            .iter()
                            .map(|s| s.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of positive and negative words.
    pub fn word_counts(&self) -> (usize, usize) {
        (self.positive.len(), self.negative.len())
    }

    fn polarity(&self, token: &str) -> f32 {
        if self.positive.contains(token) {
            1.0
        } else if self.negative.contains(token) {
            -1.0
        } else {
            0.0
        }
    }

    fn modifier(&self, token: &str, options: &LexiconOptions) -> Option<f32> {
        if self.boosters.contains(token) {
            Some(options.booster)
        } else if self.dampeners.contains(token) {
            Some(options.dampener)
        } else {
            None
        }
    }

    /// Score `text` in `[-1, 1]`.
    ///
    /// Returns exactly `0.0` when nothing in the text carries polarity.
    pub fn score(&self, text: &str, options: &LexiconOptions) -> f32 {
        let tokens = tokenize(text);
        let mut sum = 0.0f32;
        let mut signals = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let polarity = self.polarity(token);
            if polarity == 0.0 {
                continue;
            }
            signals += 1;

            let mut contribution = polarity * options.token_weight;

            // Contiguous modifiers directly in front of the word.
            let mut start = i;
            while start > 0 {
                match self.modifier(&tokens[start - 1], options) {
                    Some(factor) => {
                        contribution *= factor;
                        start -= 1;
                    }
                    None => break,
                }
            }

            let window_start = start.saturating_sub(options.negation_window);
            if tokens[window_start..start]
                .iter()
                .any(|t| self.negators.contains(t))
            {
                contribution = -contribution;
            }

            sum += contribution;
        }

        for emoji in &self.positive_emoji {
            if text.contains(emoji.as_str()) {
                sum += options.emoji_weight;
                signals += 1;
            }
        }
        for emoji in &self.negative_emoji {
            if text.contains(emoji.as_str()) {
                sum -= options.emoji_weight;
                signals += 1;
            }
        }

        if signals == 0 {
            return 0.0;
        }

        if sum != 0.0 {
            let exclamations = text.matches('!').count() as f32;
            sum += exclamations * options.exclamation_weight * sum.signum();
        }

        let n = tokens.len() as f32;
        if tokens.len() > 3 {
            sum /= n.sqrt();
        } else if !tokens.is_empty() {
            sum /= (n * 0.6).max(1.0);
        }

        clamp_unit(sum)
    }
}

/// Each entry must normalize to exactly one token; the scorer never matches phrases.
fn normalize_words<I, S>(words: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| {
            let raw = w.as_ref();
            let mut tokens = tokenize(raw);
            match tokens.len() {
                1 => Ok(tokens.remove(0)),
                0 => Err(PipelineError::Config(format!(
                    "Lexicon entry '{raw}' is empty after normalization"
                ))),
                _ => Err(PipelineError::Config(format!(
                    "Lexicon entry '{raw}' is not a single word"
                ))),
            }
        })
        .collect()
}

/// Score `text` with the built-in lexicon and default options.
pub fn analyze_fallback(text: &str) -> f32 {
    DEFAULT_LEXICON.score(text, &LexiconOptions::default())
}

/// The rule-based scoring strategy.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    lexicon: Arc<Lexicon>,
    options: LexiconOptions,
}

impl LexiconModel {
    /// Wrap a lexicon and the options used to score with it.
    pub fn new(lexicon: Arc<Lexicon>, options: LexiconOptions) -> Self {
        Self { lexicon, options }
    }

    /// The word lists in use.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The scoring constants in use.
    pub fn options(&self) -> &LexiconOptions {
        &self.options
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new(Lexicon::shared(), LexiconOptions::default())
    }
}

impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str) -> Result<f32> {
        Ok(self.lexicon.score(text, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;

    fn label(text: &str) -> Label {
        Label::from_score(analyze_fallback(text))
    }

    #[test]
    fn builtin_lists_are_disjoint() {
        Lexicon::builtin().check_disjoint().unwrap();
    }

    #[test]
    fn empty_and_noise_score_zero() {
        assert_eq!(analyze_fallback(""), 0.0);
        assert_eq!(analyze_fallback("   "), 0.0);
        assert_eq!(analyze_fallback("?!?!..."), 0.0);
        assert_eq!(analyze_fallback("the quick brown fox"), 0.0);
        assert_eq!(analyze_fallback("wow!!!"), 0.0);
    }

    #[test]
    fn positive_texts() {
        assert_eq!(label("I love this!"), Label::Positive);
        assert_eq!(label("This is great and amazing"), Label::Positive);
        assert_eq!(label("Excellent work"), Label::Positive);
        assert_eq!(label("wonderful experience"), Label::Positive);
    }

    #[test]
    fn negative_texts() {
        assert_eq!(label("I hate this"), Label::Negative);
        assert_eq!(label("This is terrible"), Label::Negative);
        assert_eq!(label("awful experience"), Label::Negative);
        assert_eq!(label("worst product ever"), Label::Negative);
    }

    #[test]
    fn neutral_texts() {
        assert_eq!(label("This is a thing"), Label::Neutral);
        assert_eq!(label("It exists"), Label::Neutral);
        assert_eq!(label("okay I guess"), Label::Neutral);
        assert_eq!(label("It works fine"), Label::Neutral);
    }

    #[test]
    fn negation_flips_sign() {
        assert!(analyze_fallback("great") > 0.0);
        assert!(analyze_fallback("not great") <= 0.0);
        assert_eq!(label("not good"), Label::Negative);
        assert_eq!(label("don't love it"), Label::Negative);
        assert_eq!(label("not bad"), Label::Positive);
        assert_eq!(label("not terrible"), Label::Positive);
    }

    #[test]
    fn negation_skips_modifier_run() {
        assert!(analyze_fallback("not very good") < 0.0);
    }

    #[test]
    fn negation_window_is_exact() {
        // Window of one: the negator two tokens back is out of scope.
        assert!(analyze_fallback("not a good") > 0.0);

        let wide = LexiconOptions {
            negation_window: 2,
            ..LexiconOptions::default()
        };
        assert!(Lexicon::builtin().score("not a good", &wide) < 0.0);
    }

    #[test]
    fn boosters_amplify() {
        assert!(analyze_fallback("very good") > analyze_fallback("good"));
        assert!(analyze_fallback("extremely bad") < analyze_fallback("bad"));
    }

    #[test]
    fn dampeners_reduce() {
        let plain = analyze_fallback("great");
        let dampened = analyze_fallback("somewhat great");
        assert!(dampened.abs() < plain.abs());
        assert!(dampened > 0.0);
    }

    #[test]
    fn custom_multipliers() {
        let options = LexiconOptions {
            booster: 1.0,
            ..LexiconOptions::default()
        };
        let lexicon = Lexicon::builtin();
        assert_eq!(
            lexicon.score("very good", &options),
            lexicon.score("much good", &options)
        );
    }

    #[test]
    fn emoji_hints() {
        assert_eq!(label("This is okay 😊"), Label::Positive);
        assert_eq!(label("👍"), Label::Positive);
        assert_eq!(label("This is okay 😡"), Label::Negative);
        assert_eq!(label("👎"), Label::Negative);
    }

    #[test]
    fn exclamation_emphasis_follows_sign() {
        assert!(analyze_fallback("good!") > analyze_fallback("good"));
        assert!(analyze_fallback("bad!") < analyze_fallback("bad"));
    }

    #[test]
    fn scores_stay_in_unit_range() {
        let score =
            analyze_fallback("I love love love this amazing wonderful excellent product!!!");
        assert!((-1.0..=1.0).contains(&score));
        let score = analyze_fallback("hate hate hate awful terrible worst garbage!!!!!!!!");
        assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn adding_positive_words_never_lowers_score() {
        let mut text = String::from("the delivery was late and the box was bad");
        let mut previous = analyze_fallback(&text);
        for word in ["good", "great", "nice", "love", "perfect", "best"] {
            text.push(' ');
            text.push_str(word);
            let current = analyze_fallback(&text);
            assert!(current >= previous, "{text}: {current} < {previous}");
            previous = current;
        }
    }

    #[test]
    fn extensions_keep_lists_disjoint() {
        let lexicon = Lexicon::builtin().with_positive(["Stellar"]).unwrap();
        assert!(lexicon.score("stellar", &LexiconOptions::default()) > 0.0);

        let err = Lexicon::builtin().with_negative(["great"]).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn extensions_take_single_words_only() {
        let options = LexiconOptions::default();
        let builtin = Lexicon::builtin();

        let err = Lexicon::builtin().with_dampeners(["sort of"]).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        let err = Lexicon::builtin().with_positive(["good day"]).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        let err = Lexicon::builtin().with_boosters(["!!!"]).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        // Punctuation and case are normalized away, the word itself is kept whole.
        let lexicon = Lexicon::builtin().with_dampeners(["Sorta-ish"]);
        assert!(lexicon.is_err());
        let lexicon = Lexicon::builtin().with_dampeners(["Meh!"]).unwrap();
        assert_eq!(
            lexicon.score("a lot of good", &options),
            builtin.score("a lot of good", &options)
        );
        assert!(lexicon.score("meh good", &options) < builtin.score("good", &options));
    }

    #[test]
    fn options_validation_collects_all() {
        let options = LexiconOptions {
            token_weight: 0.0,
            booster: -1.0,
            negation_window: 0,
            ..LexiconOptions::default()
        };
        let errors = options.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
