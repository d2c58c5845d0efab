//! # Entities Module
//!
//! Candidate entity extraction from raw text.
//!
//! Three cheap heuristics, no model:
//! - capitalized bigrams/unigrams ("Donald Trump", "America")
//! - a fixed list of well-known political figures
//! - four-digit years in the 1900s and 2000s
//!
//! Output uses ordered sets so the result is stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Political figures recognized by name regardless of capitalization.
pub const KNOWN_FIGURES: &[&str] = &["Trump", "Biden", "Obama", "Harris", "Putin", "Xi Jinping"];

/// Entities found in one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    /// Capitalized bigrams and unigrams.
    pub candidates: BTreeSet<String>,
    /// Known figures mentioned anywhere in the text.
    pub people: BTreeSet<String>,
    /// Year mentions, in order of appearance.
    pub years: Vec<String>,
}

impl Entities {
    /// True when nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.people.is_empty() && self.years.is_empty()
    }

    /// Union of candidates and people.
    #[must_use]
    pub fn all(&self) -> BTreeSet<String> {
        self.candidates.union(&self.people).cloned().collect()
    }
}

/// Extract candidate entities from `text`.
#[must_use]
pub fn extract_entities(text: &str) -> Entities {
    Entities {
        candidates: capitalized_candidates(text),
        people: known_people(text),
        years: years(text),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip everything but word characters from a whitespace-separated word.
fn clean_word(word: &str) -> String {
    word.chars().filter(|c| is_word_char(*c)).collect()
}

fn is_capitalized(word: &str) -> bool {
    word.chars().count() > 1 && word.chars().next().is_some_and(char::is_uppercase)
}

fn capitalized_candidates(text: &str) -> BTreeSet<String> {
    let words: Vec<String> = text.split_whitespace().map(clean_word).collect();
    let mut out = BTreeSet::new();

    for (i, word) in words.iter().enumerate() {
        if !is_capitalized(word) {
            continue;
        }
        match words.get(i + 1) {
            Some(next) if is_capitalized(next) => {
                out.insert(format!("{} {}", word, next));
            }
            _ => {
                out.insert(word.clone());
            }
        }
    }

    out
}

fn known_people(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    KNOWN_FIGURES
        .iter()
        .filter(|name| lower.contains(&name.to_lowercase()))
        .map(|name| (*name).to_string())
        .collect()
}

fn years(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| {
            token.len() == 4
                && token.chars().all(|c| c.is_ascii_digit())
                && (token.starts_with("19") || token.starts_with("20"))
        })
        .map(str::to_string)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
