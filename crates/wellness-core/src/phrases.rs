/// Keyword tiers used by the concern scorer.
///
/// The table is data, not code: hosts may load a JSON table to change the
/// wording or locale without touching the scorer. Tiers are checked in list
/// order per answer and the first tier with a matching phrase wins.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A group of phrases that each contribute `weight` severity points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTier {
    pub weight: u32,
    pub phrases: Vec<String>,
}

impl PhraseTier {
    /// Returns the first phrase of this tier contained in `answer`.
    pub fn first_match(&self, answer: &str) -> Option<&str> {
        self.phrases
            .iter()
            .map(String::as_str)
            .find(|phrase| answer.contains(phrase))
    }
}

/// Severity cut-offs. Severity at or above `high` is "High Concern",
/// at or above `moderate` is "Moderate Concern".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcernThresholds {
    pub moderate: u32,
    pub high: u32,
}

impl Default for ConcernThresholds {
    fn default() -> Self {
        Self {
            moderate: 2,
            high: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTable {
    pub tiers: Vec<PhraseTier>,
    #[serde(default)]
    pub thresholds: ConcernThresholds,
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                PhraseTier {
                    weight: 2,
                    phrases: to_owned(&[
                        "Terrible",
                        "Nearly every day",
                        "Almost constantly",
                        "Almost completely",
                        "Severe difficulty",
                    ]),
                },
                PhraseTier {
                    weight: 1,
                    phrases: to_owned(&[
                        "Not great",
                        "More than half the days",
                        "Frequently",
                        "Considerably",
                        "Moderate difficulty",
                    ]),
                },
            ],
            thresholds: ConcernThresholds::default(),
        }
    }
}

impl PhraseTable {
    /// Parse and validate a table from JSON of the form
    /// `{"tiers": [{"weight": 2, "phrases": [...]}, ...], "thresholds": {"moderate": 2, "high": 4}}`.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let table: PhraseTable = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.tiers.is_empty() {
            return Err(CoreError::InvalidPhraseTable(
                "at least one tier is required".to_string(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (idx, tier) in self.tiers.iter().enumerate() {
            if tier.weight == 0 {
                return Err(CoreError::InvalidPhraseTable(format!(
                    "tier {idx} has zero weight"
                )));
            }
            if tier.phrases.is_empty() {
                return Err(CoreError::InvalidPhraseTable(format!(
                    "tier {idx} has no phrases"
                )));
            }
            for phrase in &tier.phrases {
                if phrase.is_empty() {
                    return Err(CoreError::InvalidPhraseTable(format!(
                        "tier {idx} contains an empty phrase"
                    )));
                }
                if !seen.insert(phrase.as_str()) {
                    return Err(CoreError::InvalidPhraseTable(format!(
                        "phrase '{phrase}' appears in more than one tier"
                    )));
                }
            }
        }

        if self.thresholds.moderate > self.thresholds.high {
            return Err(CoreError::InvalidPhraseTable(format!(
                "moderate threshold {} exceeds high threshold {}",
                self.thresholds.moderate, self.thresholds.high
            )));
        }

        Ok(())
    }

    /// Returns `(phrase, weight)` for the first tier matching `answer`.
    pub fn classify<'a>(&'a self, answer: &str) -> Option<(&'a str, u32)> {
        self.tiers
            .iter()
            .find_map(|tier| tier.first_match(answer).map(|phrase| (phrase, tier.weight)))
    }

    pub fn phrase_count(&self) -> usize {
        self.tiers.iter().map(|t| t.phrases.len()).sum()
    }
}

fn to_owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let table = PhraseTable::default();
        table.validate().expect("default table should validate");
        assert_eq!(table.phrase_count(), 10);
        assert_eq!(table.thresholds, ConcernThresholds { moderate: 2, high: 4 });
    }

    #[test]
    fn higher_tier_wins_when_both_match() {
        let table = PhraseTable::default();
        let hit = table.classify("Not great, honestly Terrible");
        assert_eq!(hit, Some(("Terrible", 2)));
    }

    #[test]
    fn classify_is_case_sensitive() {
        let table = PhraseTable::default();
        assert_eq!(table.classify("terrible"), None);
        assert_eq!(table.classify("Frequently tired"), Some(("Frequently", 1)));
    }

    #[test]
    fn parse_custom_table_with_default_thresholds() {
        let json = r#"{"tiers": [{"weight": 3, "phrases": ["Horrible"]}]}"#;
        let table = PhraseTable::from_json(json).expect("valid table");
        assert_eq!(table.classify("Horrible week"), Some(("Horrible", 3)));
        assert_eq!(table.thresholds, ConcernThresholds::default());
    }

    #[test]
    fn reject_overlapping_tiers() {
        let json = r#"{"tiers": [
            {"weight": 2, "phrases": ["Bad"]},
            {"weight": 1, "phrases": ["Bad"]}
        ]}"#;
        let err = PhraseTable::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPhraseTable(_)));
    }

    #[test]
    fn reject_inverted_thresholds() {
        let json = r#"{"tiers": [{"weight": 1, "phrases": ["Meh"]}],
                       "thresholds": {"moderate": 5, "high": 3}}"#;
        assert!(PhraseTable::from_json(json).is_err());
    }

    #[test]
    fn reject_empty_and_zero_weight_tiers() {
        assert!(PhraseTable::from_json(r#"{"tiers": []}"#).is_err());
        assert!(PhraseTable::from_json(r#"{"tiers": [{"weight": 0, "phrases": ["x"]}]}"#).is_err());
        assert!(PhraseTable::from_json(r#"{"tiers": [{"weight": 1, "phrases": []}]}"#).is_err());
        assert!(PhraseTable::from_json(r#"{"tiers": [{"weight": 1, "phrases": [""]}]}"#).is_err());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = PhraseTable::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }
}
