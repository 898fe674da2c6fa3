//! Rule-based lexicon scorer for short English quotations.

use crate::types::{PolarityScorer, SentimentScores};

/// Word valences on a `[-4.0, 4.0]` scale.
///
/// Keys are lowercase single words. Positive values carry positive polarity.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loving", 2.9),
    ("happy", 2.7),
    ("happiness", 2.6),
    ("joy", 2.8),
    ("good", 1.9),
    ("great", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("wonderful", 2.7),
    ("beautiful", 2.9),
    ("brilliant", 2.8),
    ("fantastic", 2.6),
    ("nice", 1.8),
    ("kind", 2.4),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("peace", 2.5),
    ("free", 2.3),
    ("freedom", 3.2),
    ("wisdom", 2.4),
    ("wise", 2.1),
    ("success", 2.7),
    ("win", 2.8),
    ("smile", 1.5),
    ("laugh", 2.6),
    ("friend", 2.2),
    ("friends", 2.1),
    ("strong", 2.3),
    ("brave", 2.4),
    ("courage", 2.2),
    ("trust", 2.3),
    ("grateful", 2.0),
    ("glad", 2.0),
    ("fun", 2.3),
    ("inspire", 2.4),
    ("perfect", 2.7),
    ("calm", 1.3),
    ("enjoy", 2.2),
    ("welcome", 2.0),
    // Negative signals
    ("hate", -2.7),
    ("hated", -3.2),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("sad", -2.1),
    ("sadness", -1.9),
    ("angry", -2.3),
    ("anger", -2.7),
    ("fear", -2.2),
    ("afraid", -2.2),
    ("pain", -2.3),
    ("hurt", -2.4),
    ("cry", -2.1),
    ("death", -2.9),
    ("die", -2.9),
    ("dead", -3.3),
    ("kill", -3.7),
    ("war", -2.9),
    ("evil", -3.4),
    ("ugly", -2.3),
    ("stupid", -2.4),
    ("fail", -2.5),
    ("failure", -2.3),
    ("lose", -1.3),
    ("lost", -1.3),
    ("wrong", -2.1),
    ("lonely", -2.0),
    ("enemy", -2.5),
    ("poor", -2.1),
    ("problem", -1.7),
    ("sick", -2.3),
    ("boring", -1.3),
    ("disappointed", -1.9),
    ("tired", -1.9),
    ("weak", -1.9),
    ("worry", -1.9),
    ("doubt", -1.5),
    ("regret", -1.8),
    ("shame", -2.1),
    ("suffer", -2.5),
    ("suffering", -2.1),
    ("despair", -2.4),
    ("cruel", -2.8),
    ("nasty", -2.6),
    ("disgusting", -2.4),
];

/// Words that flip the polarity of a sentiment word up to three tokens later.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "cannot", "can't",
    "cant", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't",
    "wasnt", "aren't", "arent", "weren't", "won't", "wont", "wouldn't", "shouldn't",
    "couldn't", "ain't", "without",
];

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;

/// Intensity modifiers and the increment they apply to the next sentiment word.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("highly", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("truly", BOOST_INCREMENT),
    ("utterly", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("barely", BOOST_DECREMENT),
    ("hardly", BOOST_DECREMENT),
    ("kinda", BOOST_DECREMENT),
    ("marginally", BOOST_DECREMENT),
    ("slightly", BOOST_DECREMENT),
    ("somewhat", BOOST_DECREMENT),
];

const NEGATION_SCALAR: f64 = -0.74;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
const BEFORE_BUT_WEIGHT: f64 = 0.5;
const AFTER_BUT_WEIGHT: f64 = 1.5;
/// Approximates the maximum expected raw sum when normalizing to `[-1, 1]`.
const NORMALIZATION_ALPHA: f64 = 15.0;
/// Damping applied to a booster one, two and three tokens away.
const BOOSTER_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

/// Default [`PolarityScorer`]: a fixed valence lexicon with negation,
/// intensity, capitalization, contrast and punctuation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity_scores(&self, text: &str) -> SentimentScores {
        polarity_scores(text)
    }
}

#[derive(Debug)]
struct Token {
    lower: String,
    is_upper: bool,
}

/// Score `text` with the built-in lexicon.
///
/// Returns [`SentimentScores::NEUTRAL`] for empty or whitespace-only text.
#[must_use]
pub fn polarity_scores(text: &str) -> SentimentScores {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return SentimentScores::NEUTRAL;
    }

    // Capitalization only signals emphasis when the text is not shouted throughout.
    let caps_emphasis = tokens.iter().any(|t| t.is_upper) && !tokens.iter().all(|t| t.is_upper);

    let mut sentiments: Vec<f64> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| word_valence(&tokens, i, token, caps_emphasis))
        .collect();

    if let Some(but) = tokens.iter().position(|t| t.lower == "but") {
        for (i, s) in sentiments.iter_mut().enumerate() {
            if i < but {
                *s *= BEFORE_BUT_WEIGHT;
            } else if i > but {
                *s *= AFTER_BUT_WEIGHT;
            }
        }
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0_f64;
    let mut neg_sum = 0.0_f64;
    let mut neu_count = 0.0_f64;
    for &s in &sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    if total <= 0.0 {
        return SentimentScores::NEUTRAL;
    }

    SentimentScores {
        neg: round_to(neg_sum.abs() / total, 3),
        neu: round_to(neu_count / total, 3),
        pos: round_to(pos_sum / total, 3),
        compound: round_to(compound, 4),
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let word = raw
                .replace('\u{2019}', "'")
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .trim_matches('\'')
                .to_string();
            if word.is_empty() {
                return None;
            }
            let has_alpha = word.chars().any(char::is_alphabetic);
            Some(Token {
                is_upper: has_alpha && word.chars().all(|c| !c.is_lowercase()),
                lower: word.to_lowercase(),
            })
        })
        .collect()
}

fn lookup(table: &[(&str, f64)], word: &str) -> Option<f64> {
    table.iter().find(|(w, _)| *w == word).map(|&(_, v)| v)
}

fn word_valence(tokens: &[Token], index: usize, token: &Token, caps_emphasis: bool) -> f64 {
    let Some(base) = lookup(LEXICON, &token.lower) else {
        return 0.0;
    };

    let mut valence = base;
    if caps_emphasis && token.is_upper {
        valence += CAPS_INCREMENT.copysign(valence);
    }

    let mut negated = false;
    for (distance, damping) in BOOSTER_DAMPING.iter().enumerate() {
        let Some(prev) = index.checked_sub(distance + 1).map(|i| &tokens[i]) else {
            break;
        };
        if let Some(boost) = lookup(BOOSTERS, &prev.lower) {
            // Boosters act in the direction of the word they modify.
            let mut scalar = if valence < 0.0 { -boost } else { boost };
            if caps_emphasis && prev.is_upper {
                scalar += CAPS_INCREMENT.copysign(valence);
            }
            valence += scalar * damping;
        }
        if NEGATIONS.contains(&prev.lower.as_str()) {
            negated = true;
        }
    }

    if negated {
        valence *= NEGATION_SCALAR;
    }
    valence
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    #[allow(clippy::cast_precision_loss)]
    let exclamation = exclamations as f64 * EXCLAMATION_INCREMENT;
    #[allow(clippy::cast_precision_loss)]
    let question = if questions > 1 {
        (questions as f64 * QUESTION_INCREMENT).min(MAX_QUESTION_EMPHASIS)
    } else {
        0.0
    };
    exclamation + question
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
