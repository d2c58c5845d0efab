//! # Rules Module
//!
//! Declarative fact rules and the single engine that evaluates them.
//!
//! A rule is data: a [`Predicate`] over the lowercased text plus a
//! [`ClaimTemplate`] emitted when the predicate holds. Adding a checkable
//! fact means adding a rule record, either to [`RuleTable::builtin`] or to a
//! JSON rule file loaded with [`RuleTable::from_json_path`].
//!
//! Rules are independent. Every rule whose predicate holds fires, in table
//! order, with no deduplication. Predicates are pure keyword tests, so a
//! negated statement ("X is not president") fires the same rule as the
//! positive one.

use crate::entities::{Entities, extract_entities};
use crate::{ClaimStatus, ClaimVerification};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while building or loading a rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid rule file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule table is empty")]
    Empty,

    #[error("rule at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate rule id '{0}'")]
    DuplicateId(String),

    #[error("rule '{0}' contains an empty keyword")]
    EmptyKeyword(String),

    #[error("rule '{rule}' has word '{word}', which no token can equal")]
    UnmatchableWord { rule: String, word: String },
}

/// Why a keyword was rejected during normalization.
enum KeywordError {
    Empty,
    Unmatchable(String),
}

// =============================================================================
// PREDICATES
// =============================================================================

/// A keyword test over the lowercased input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Substring anywhere in the text.
    Contains { text: String },
    /// Whole alphanumeric token.
    Word { word: String },
    /// Extracted entity (candidate or known person), case-insensitive.
    Entity { name: String },
    /// At least one sub-predicate holds. Empty is false.
    Any { of: Vec<Predicate> },
    /// Every sub-predicate holds. Empty is true.
    All { of: Vec<Predicate> },
    /// The sub-predicate does not hold.
    Not { predicate: Box<Predicate> },
}

impl Predicate {
    pub fn contains(text: &str) -> Self {
        Self::Contains {
            text: text.to_string(),
        }
    }

    pub fn word(word: &str) -> Self {
        Self::Word {
            word: word.to_string(),
        }
    }

    pub fn entity(name: &str) -> Self {
        Self::Entity {
            name: name.to_string(),
        }
    }

    pub fn any(of: Vec<Predicate>) -> Self {
        Self::Any { of }
    }

    /// Any of several substrings.
    pub fn any_contains(texts: &[&str]) -> Self {
        Self::Any {
            of: texts.iter().map(|t| Self::contains(t)).collect(),
        }
    }

    pub fn all(of: Vec<Predicate>) -> Self {
        Self::All { of }
    }

    pub fn not(predicate: Predicate) -> Self {
        Self::Not {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate against prepared input.
    #[must_use]
    pub fn eval(&self, input: &MatchInput) -> bool {
        match self {
            Self::Contains { text } => input.lower.contains(text.as_str()),
            Self::Word { word } => input.words.contains(word.as_str()),
            Self::Entity { name } => input.entities.contains(name.as_str()),
            Self::Any { of } => of.iter().any(|p| p.eval(input)),
            Self::All { of } => of.iter().all(|p| p.eval(input)),
            Self::Not { predicate } => !predicate.eval(input),
        }
    }

    /// Lowercase every keyword in place.
    ///
    /// Fails on the first empty keyword, or on a `word` that the tokenizer
    /// can never produce. Abbreviations are stored in their token form
    /// (`"u.s"` becomes `"u.s."`).
    fn normalize(&mut self) -> Result<(), KeywordError> {
        match self {
            Self::Contains { text: s } | Self::Entity { name: s } => {
                let lowered = s.trim().to_lowercase();
                if lowered.is_empty() {
                    return Err(KeywordError::Empty);
                }
                *s = lowered;
                Ok(())
            }
            Self::Word { word } => {
                let lowered = word.trim().to_lowercase();
                if lowered.is_empty() {
                    return Err(KeywordError::Empty);
                }
                *word = canonical_word(&lowered).ok_or(KeywordError::Unmatchable(lowered))?;
                Ok(())
            }
            Self::Any { of } | Self::All { of } => of.iter_mut().try_for_each(Self::normalize),
            Self::Not { predicate } => predicate.normalize(),
        }
    }
}

/// Text prepared once per analysis and shared by every predicate.
#[derive(Debug, Clone, Default)]
pub struct MatchInput {
    lower: String,
    words: BTreeSet<String>,
    entities: BTreeSet<String>,
}

impl MatchInput {
    /// Prepare `text` together with its extracted entities.
    #[must_use]
    pub fn new(text: &str, entities: &Entities) -> Self {
        let lower = text.to_lowercase();
        let words = lower
            .split(|c: char| !c.is_alphanumeric() && c != '.')
            .flat_map(chunk_words)
            .collect();
        let entities = entities.all().iter().map(|e| e.to_lowercase()).collect();
        Self {
            lower,
            words,
            entities,
        }
    }
}

/// Words of one `.`-bearing chunk: every alphanumeric run, plus the whole
/// chunk as `a.b.` when it is a dotted abbreviation like "u.s." or "d.c".
fn chunk_words(chunk: &str) -> Vec<String> {
    let parts: Vec<&str> = chunk.split('.').filter(|p| !p.is_empty()).collect();
    let mut words: Vec<String> = parts.iter().map(|p| (*p).to_string()).collect();
    if parts.len() > 1 {
        words.push(format!("{}.", parts.join(".")));
    }
    words
}

/// The single token a `word` keyword matches, or `None` when the tokenizer
/// can never produce it (spaces, hyphens, other punctuation).
fn canonical_word(keyword: &str) -> Option<String> {
    if !keyword.chars().all(|c| c.is_alphanumeric() || c == '.') {
        return None;
    }
    let parts: Vec<&str> = keyword.split('.').filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [] => None,
        [single] => Some((*single).to_string()),
        _ => Some(format!("{}.", parts.join("."))),
    }
}

// =============================================================================
// RULES
// =============================================================================

/// The claim record a rule emits when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimTemplate {
    pub claim: String,
    pub status: ClaimStatus,
    pub confidence: u8,
    pub source: String,
    pub details: String,
}

impl ClaimTemplate {
    /// Build the claim record.
    #[must_use]
    pub fn instantiate(&self) -> ClaimVerification {
        ClaimVerification::new(
            self.claim.clone(),
            self.status,
            self.confidence,
            self.source.clone(),
            self.details.clone(),
        )
    }
}

/// One declarative fact rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier, e.g. `sun-sets-east`.
    pub id: String,
    /// When the rule fires.
    pub predicate: Predicate,
    /// What it emits.
    pub template: ClaimTemplate,
}

/// Short description of a rule for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub id: String,
    pub claim: String,
    pub status: ClaimStatus,
    pub source: String,
}

#[derive(Deserialize)]
struct RuleFile {
    rules: Vec<Rule>,
}

/// An ordered, validated rule table. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Validate and normalize a list of rules.
    ///
    /// Ids must be non-empty and unique; keywords must be non-empty and are
    /// lowercased.
    pub fn new(mut rules: Vec<Rule>) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::Empty);
        }

        let mut seen = BTreeSet::new();
        for (position, rule) in rules.iter_mut().enumerate() {
            rule.id = rule.id.trim().to_string();
            if rule.id.is_empty() {
                return Err(RuleError::EmptyId(position));
            }
            if !seen.insert(rule.id.clone()) {
                return Err(RuleError::DuplicateId(rule.id.clone()));
            }
            rule.predicate.normalize().map_err(|e| match e {
                KeywordError::Empty => RuleError::EmptyKeyword(rule.id.clone()),
                KeywordError::Unmatchable(word) => RuleError::UnmatchableWord {
                    rule: rule.id.clone(),
                    word,
                },
            })?;
        }

        Ok(Self { rules })
    }

    /// Parse a JSON rule file body: `{"rules": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, RuleError> {
        let file: RuleFile = serde_json::from_str(json)?;
        Self::new(file.rules)
    }

    /// Load a JSON rule file from disk.
    pub fn from_json_path(path: &Path) -> Result<Self, RuleError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize in the same shape [`RuleTable::from_json_str`] accepts.
    pub fn to_json_pretty(&self) -> Result<String, RuleError> {
        let value = serde_json::json!({ "rules": self.rules });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// The rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Listing of every rule.
    #[must_use]
    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.rules
            .iter()
            .map(|r| RuleSummary {
                id: r.id.clone(),
                claim: r.template.claim.clone(),
                status: r.template.status,
                source: r.template.source.clone(),
            })
            .collect()
    }

    /// Rules whose predicate holds, in table order.
    #[must_use]
    pub fn fired<'a>(&'a self, text: &str, entities: &Entities) -> Vec<&'a Rule> {
        let input = MatchInput::new(text, entities);
        self.rules
            .iter()
            .filter(|rule| rule.predicate.eval(&input))
            .collect()
    }

    /// Extract entities from `text` and run the table over it.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Vec<ClaimVerification> {
        match_claims(self, text, &extract_entities(text))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Evaluate every rule against `text` and collect the claims of those that
/// fire, preserving table order. An empty result means no checkable fact was
/// found, not an error.
#[must_use]
pub fn match_claims(table: &RuleTable, text: &str, entities: &Entities) -> Vec<ClaimVerification> {
    table
        .fired(text, entities)
        .into_iter()
        .map(|rule| rule.template.instantiate())
        .collect()
}

// =============================================================================
// BUILTIN TABLE
// =============================================================================

const CURRENT_PRESIDENT: &str = "Donald Trump";
const INAUGURATED: &str = "2025-01-20";

const PRESIDENT_KEYWORDS: &[&str] = &["president", "potus", "commander in chief", "leader"];
const US_PHRASES: &[&str] = &["america", "united states"];
const US_WORDS: &[&str] = &["us", "usa", "u.s."];

/// (keyword, full name, actual role) for people wrongly named as president.
const NOT_PRESIDENT: &[(&str, &str, &str)] = &[
    ("biden", "Joe Biden", "served as president 2021-2025"),
    ("obama", "Barack Obama", "served as president 2009-2017"),
    ("bush", "George W. Bush", "served as president 2001-2009"),
    ("clinton", "Bill Clinton", "served as president 1993-2001"),
    ("harris", "Kamala Harris", "served as Vice President 2021-2025"),
    ("pence", "Mike Pence", "served as Vice President 2017-2021"),
];

fn about_us_president() -> Vec<Predicate> {
    vec![
        Predicate::any_contains(PRESIDENT_KEYWORDS),
        Predicate::any(
            std::iter::once(Predicate::any_contains(US_PHRASES))
                .chain(US_WORDS.iter().map(|w| Predicate::word(w)))
                .collect(),
        ),
    ]
}

fn template(
    claim: impl Into<String>,
    status: ClaimStatus,
    source: &str,
    details: impl Into<String>,
) -> ClaimTemplate {
    ClaimTemplate {
        claim: claim.into(),
        status,
        confidence: 100,
        source: source.to_string(),
        details: details.into(),
    }
}

fn rule(id: impl Into<String>, predicate: Predicate, template: ClaimTemplate) -> Rule {
    Rule {
        id: id.into(),
        predicate,
        template,
    }
}

impl RuleTable {
    /// The hand-maintained table of checkable facts.
    #[must_use]
    pub fn builtin() -> Self {
        let mut rules = Vec::new();

        // US presidency
        let mut current = about_us_president();
        current.push(Predicate::word("trump"));
        rules.push(rule(
            "president-current",
            Predicate::all(current),
            template(
                format!("{} is currently the US President", CURRENT_PRESIDENT),
                ClaimStatus::Verified,
                "Official US Government Records (2025)",
                format!(
                    "{} was inaugurated on {} and is currently serving.",
                    CURRENT_PRESIDENT, INAUGURATED
                ),
            ),
        ));

        for (keyword, name, role) in NOT_PRESIDENT {
            let mut preds = about_us_president();
            preds.push(Predicate::word(keyword));
            rules.push(rule(
                format!("president-false-{}", keyword),
                Predicate::all(preds),
                template(
                    format!("{} is the US President", name),
                    ClaimStatus::False,
                    "Official US Government Records",
                    format!(
                        "{} {}. Current president: {} (since Jan 20, 2025)",
                        name, role, CURRENT_PRESIDENT
                    ),
                ),
            ));
        }

        // Sun direction
        let sun_sets = || {
            vec![
                Predicate::word("sun"),
                Predicate::any_contains(&["sets", "setting"]),
            ]
        };
        let sun_rises = || vec![Predicate::word("sun"), Predicate::contains("rise")];

        let mut sets_east = sun_sets();
        sets_east.push(Predicate::contains("east"));
        rules.push(rule(
            "sun-sets-east",
            Predicate::all(sets_east),
            template(
                "Sun sets in the east",
                ClaimStatus::False,
                "Basic astronomy",
                "The sun sets in the WEST. It rises in the east and sets in the west due to Earth's rotation.",
            ),
        ));

        let mut sets_west = sun_sets();
        sets_west.push(Predicate::contains("west"));
        sets_west.push(Predicate::not(Predicate::contains("east")));
        rules.push(rule(
            "sun-sets-west",
            Predicate::all(sets_west),
            template(
                "Sun sets in the west",
                ClaimStatus::Verified,
                "Basic astronomy",
                "Correct. The sun sets in the west due to Earth's rotation.",
            ),
        ));

        let mut rises_east = sun_rises();
        rises_east.push(Predicate::contains("east"));
        rules.push(rule(
            "sun-rises-east",
            Predicate::all(rises_east),
            template(
                "Sun rises in the east",
                ClaimStatus::Verified,
                "Basic astronomy",
                "Correct. The sun rises in the east.",
            ),
        ));

        let mut rises_west = sun_rises();
        rises_west.push(Predicate::contains("west"));
        rises_west.push(Predicate::not(Predicate::contains("east")));
        rules.push(rule(
            "sun-rises-west",
            Predicate::all(rises_west),
            template(
                "Sun rises in the west",
                ClaimStatus::False,
                "Basic astronomy",
                "The sun rises in the EAST, not the west.",
            ),
        ));

        // Earth shape
        rules.push(rule(
            "earth-flat",
            Predicate::all(vec![
                Predicate::contains("earth"),
                Predicate::contains("flat"),
            ]),
            template(
                "Earth is flat",
                ClaimStatus::False,
                "NASA, scientific consensus",
                "Earth is an oblate spheroid, proven by satellite imagery and physics.",
            ),
        ));

        // Water boiling point
        rules.push(rule(
            "water-boils-100",
            Predicate::all(vec![
                Predicate::contains("water"),
                Predicate::contains("boil"),
                Predicate::any_contains(&["100", "hundred"]),
            ]),
            template(
                "Water boils at 100°C",
                ClaimStatus::Verified,
                "Physics (at sea level)",
                "At standard pressure (1 atm), water boils at 100°C (212°F).",
            ),
        ));

        Self { rules }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> Vec<ClaimVerification> {
        RuleTable::builtin().match_text(text)
    }

    fn fired_ids(text: &str) -> Vec<String> {
        let table = RuleTable::builtin();
        table
            .fired(text, &extract_entities(text))
            .into_iter()
            .map(|r| r.id.clone())
            .collect()
    }

    #[test]
    fn builtin_table_is_valid() {
        let table = RuleTable::builtin();
        assert!(RuleTable::new(table.rules().to_vec()).is_ok());
        assert_eq!(table.len(), 13);
    }

    #[test]
    fn trump_as_president_is_verified() {
        let claims = check("Donald Trump is the president of America");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::Verified);
        assert!(claims[0].claim.contains("Donald Trump"));
    }

    #[test]
    fn biden_as_president_is_false() {
        let claims = check("Joe Biden is currently the president of the United States");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::False);
        assert!(claims[0].details.contains("Donald Trump"));
        assert!(claims[0].details.contains("2021-2025"));
    }

    #[test]
    fn trump_and_biden_both_fire_in_table_order() {
        let ids = fired_ids("Trump, not Biden, is the US president");
        assert_eq!(ids, vec!["president-current", "president-false-biden"]);
    }

    #[test]
    fn president_needs_a_us_mention() {
        assert!(check("Trump is president of the golf club").is_empty());
    }

    #[test]
    fn short_us_keyword_matches_whole_word_only() {
        assert!(check("Trump is president because of business").is_empty());
        assert_eq!(check("Trump is the president of us all").len(), 1);
    }

    #[test]
    fn unrelated_headline_fires_nothing() {
        assert!(check("Government announces new infrastructure bill").is_empty());
    }

    #[test]
    fn sun_rules() {
        assert_eq!(fired_ids("The sun sets in the east"), vec!["sun-sets-east"]);
        assert_eq!(fired_ids("The sun sets in the west"), vec!["sun-sets-west"]);
        assert_eq!(fired_ids("The sun rises in the east"), vec!["sun-rises-east"]);
        assert_eq!(fired_ids("The sun rises in the west"), vec!["sun-rises-west"]);
        assert!(fired_ids("Sunday sales set records in the east").is_empty());
    }

    #[test]
    fn names_and_short_country_words_match_whole_words_only() {
        assert!(fired_ids("The American president played a trumpet solo").is_empty());
        assert!(fired_ids("Trump is president, causal usage aside").is_empty());
        assert_eq!(fired_ids("Trump is the USA president"), vec!["president-current"]);
    }

    #[test]
    fn dotted_abbreviations_are_words() {
        assert_eq!(
            fired_ids("Trump is the U.S. president"),
            vec!["president-current"]
        );

        let input = MatchInput::new("Protest held in Washington D.C. today.", &Entities::default());
        assert!(Predicate::word("today").eval(&input));
        assert!(Predicate::word("d").eval(&input));
        assert!(Predicate::word("d.c.").eval(&input));
        assert!(!Predicate::word("d.c").eval(&input));
    }

    #[test]
    fn abbreviation_keywords_load_in_token_form() {
        let json = r#"{"rules": [{
            "id": "dc-protest",
            "predicate": {"op": "all", "of": [
                {"op": "word", "word": "D.C"},
                {"op": "word", "word": "protest"}
            ]},
            "template": {
                "claim": "A protest took place in Washington D.C.",
                "status": "UNCERTAIN",
                "confidence": 50,
                "source": "test",
                "details": "d"
            }
        }]}"#;
        let table = RuleTable::from_json_str(json).unwrap_or_default();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.match_text("Protest held in Washington D.C. today").len(),
            1
        );
        assert_eq!(table.match_text("Protest held in Washington d.c").len(), 1);
        assert!(table.match_text("Protest held in Washington DC").is_empty());
    }

    #[test]
    fn independent_rules_fire_together() {
        let ids = fired_ids("Trump is the US president and the earth is flat");
        assert_eq!(ids, vec!["president-current", "earth-flat"]);
    }

    #[test]
    fn water_boiling() {
        let claims = check("Water boils at 100 degrees");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::Verified);
        assert!(check("Water boils at 90 degrees").is_empty());
    }

    #[test]
    fn negation_is_not_detected() {
        // Known limitation: keyword rules ignore negation.
        let claims = check("Trump is NOT the president of America");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::Verified);
    }

    #[test]
    fn entity_predicate_uses_extracted_entities() {
        let table = RuleTable::new(vec![rule(
            "mentions-nasa",
            Predicate::entity("NASA"),
            template("NASA mentioned", ClaimStatus::Uncertain, "test", "d"),
        )])
        .unwrap_or_else(|_| RuleTable::builtin());
        assert_eq!(table.match_text("A NASA report").len(), 1);
        assert!(table.match_text("a nasa report").is_empty());
        assert!(match_claims(&table, "A NASA report", &Entities::default()).is_empty());
    }

    #[test]
    fn empty_any_is_false_and_empty_all_is_true() {
        let input = MatchInput::new("anything", &Entities::default());
        assert!(!Predicate::any(Vec::new()).eval(&input));
        assert!(Predicate::all(Vec::new()).eval(&input));
    }

    #[test]
    fn table_validation() {
        assert!(matches!(RuleTable::new(Vec::new()), Err(RuleError::Empty)));

        let r = rule(
            "dup",
            Predicate::contains("x"),
            template("c", ClaimStatus::False, "s", "d"),
        );
        assert!(matches!(
            RuleTable::new(vec![r.clone(), r.clone()]),
            Err(RuleError::DuplicateId(id)) if id == "dup"
        ));

        let mut blank = r.clone();
        blank.id = "  ".to_string();
        assert!(matches!(
            RuleTable::new(vec![blank]),
            Err(RuleError::EmptyId(0))
        ));

        let mut empty_kw = r.clone();
        empty_kw.predicate = Predicate::all(vec![Predicate::word(" ")]);
        assert!(matches!(
            RuleTable::new(vec![empty_kw]),
            Err(RuleError::EmptyKeyword(_))
        ));

        for unmatchable in ["new york", "covid-19", "..."] {
            let mut phrase = r.clone();
            phrase.predicate = Predicate::any(vec![Predicate::word(unmatchable)]);
            assert!(matches!(
                RuleTable::new(vec![phrase]),
                Err(RuleError::UnmatchableWord { rule, .. }) if rule == "dup"
            ));
        }
    }

    #[test]
    fn keywords_are_lowercased_on_load() {
        let json = r#"{"rules": [{
            "id": "moon-cheese",
            "predicate": {"op": "all", "of": [
                {"op": "word", "word": "Moon"},
                {"op": "contains", "text": "CHEESE"}
            ]},
            "template": {
                "claim": "The moon is made of cheese",
                "status": "FALSE",
                "confidence": 100,
                "source": "Apollo samples",
                "details": "Lunar rock is mostly silicate."
            }
        }]}"#;
        let table = RuleTable::from_json_str(json);
        assert!(table.is_ok());
        let table = table.unwrap_or_default();
        let claims = table.match_text("The Moon is made of green cheese");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::False);
    }

    #[test]
    fn json_roundtrip_preserves_table() {
        let table = RuleTable::builtin();
        let json = table.to_json_pretty().unwrap_or_default();
        let reloaded = RuleTable::from_json_str(&json);
        assert!(matches!(reloaded, Ok(ref t) if *t == table));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            RuleTable::from_json_str("{not json"),
            Err(RuleError::Json(_))
        ));
    }
}
