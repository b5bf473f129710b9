//! # Analysis Collaborators
//!
//! Sentiment scoring and keyword extraction are collaborators of the write
//! path, specified at their interfaces only. The built-in implementations
//! are deliberately simple and deterministic; anything honoring the range
//! contracts can replace them through the traits.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Output of [`SentimentAnalyzer::analyze`].
///
/// `polarity` lies in `[-1.0, 1.0]`, `subjectivity` in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub polarity: f64,
    pub subjectivity: f64,
    pub word_count: usize,
}

pub trait SentimentAnalyzer {
    fn analyze(&self, text: &str) -> TextMetrics;
}

/// Extracts the most frequent keywords, descending by count.
pub trait KeywordExtractor {
    fn extract(&self, text: &str, n: usize) -> Vec<(String, usize)>;
}

static STOPWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "the", "and", "that", "have", "for", "not", "with", "this", "but", "just", "was", "are",
        "had", "she", "his", "her", "him", "you", "all", "they", "from", "what", "when", "out",
    ]
});

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for word in [
        "good", "great", "happy", "love", "loved", "wonderful", "calm", "grateful", "proud",
        "excited", "fun", "beautiful", "better", "best", "hope", "peaceful", "joy",
    ] {
        m.insert(word, 1.0);
    }
    for word in [
        "bad", "sad", "angry", "hate", "hated", "terrible", "awful", "tired", "stressed",
        "anxious", "worse", "worst", "afraid", "lonely", "pain", "fail", "failed",
    ] {
        m.insert(word, -1.0);
    }
    m
});

// Opinion markers bump subjectivity even when they carry no polarity.
static SUBJECTIVE_MARKERS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "feel", "felt", "think", "thought", "believe", "seems", "maybe", "really", "very",
        "probably", "wish", "want",
    ]
});

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Word-lexicon sentiment scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> TextMetrics {
        let word_count = text.split_whitespace().count();
        let words = words(text);
        if words.is_empty() {
            return TextMetrics {
                word_count,
                ..TextMetrics::default()
            };
        }

        let mut scored = 0usize;
        let mut score = 0.0f64;
        let mut subjective = 0usize;
        for word in &words {
            if let Some(weight) = LEXICON.get(word.as_str()) {
                scored += 1;
                subjective += 1;
                score += weight;
            } else if SUBJECTIVE_MARKERS.contains(&word.as_str()) {
                subjective += 1;
            }
        }

        let polarity = if scored == 0 {
            0.0
        } else {
            (score / scored as f64).clamp(-1.0, 1.0)
        };
        // Scale against a short window so brief, opinionated entries still
        // register as subjective.
        let subjectivity = (subjective as f64 / (words.len().min(50)) as f64).clamp(0.0, 1.0);

        TextMetrics {
            polarity,
            subjectivity,
            word_count,
        }
    }
}

/// Frequency-based keyword extractor: words of three or more characters,
/// lowercased, stopwords removed, counted, top `n` by count.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyExtractor;

impl KeywordExtractor for FrequencyExtractor {
    fn extract(&self, text: &str, n: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in words(text) {
            if word.chars().count() < 3 || STOPWORDS.contains(&word.as_str()) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        // Alphabetical tiebreak keeps the output stable across runs.
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}
