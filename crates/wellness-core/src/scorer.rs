/// Questionnaire scoring.
///
/// Maps free-text check-in answers to a coarse concern label by summing the
/// weights of keyword tiers found in each answer. This is a wording
/// heuristic, not a validated clinical instrument.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::phrases::{ConcernThresholds, PhraseTable};

/// Question id to answer. Only string answers are inspected.
pub type AnswerSet = BTreeMap<String, Value>;

pub const HEURISTIC_DISCLAIMER: &str =
    "Keyword heuristic over check-in answers; not a clinical assessment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcernLabel {
    #[serde(rename = "Awaiting Check-in")]
    AwaitingCheckIn,
    #[serde(rename = "Feeling Okay")]
    FeelingOkay,
    #[serde(rename = "Moderate Concern")]
    ModerateConcern,
    #[serde(rename = "High Concern")]
    HighConcern,
}

impl ConcernLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernLabel::AwaitingCheckIn => "Awaiting Check-in",
            ConcernLabel::FeelingOkay => "Feeling Okay",
            ConcernLabel::ModerateConcern => "Moderate Concern",
            ConcernLabel::HighConcern => "High Concern",
        }
    }

    pub fn from_severity(severity: u32, thresholds: &ConcernThresholds) -> Self {
        if severity >= thresholds.high {
            ConcernLabel::HighConcern
        } else if severity >= thresholds.moderate {
            ConcernLabel::ModerateConcern
        } else {
            ConcernLabel::FeelingOkay
        }
    }
}

impl fmt::Display for ConcernLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcernLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ConcernLabel::AwaitingCheckIn,
            ConcernLabel::FeelingOkay,
            ConcernLabel::ModerateConcern,
            ConcernLabel::HighConcern,
        ]
        .into_iter()
        .find(|label| label.as_str() == s)
        .ok_or_else(|| CoreError::UnknownLabel(s.to_string()))
    }
}

/// One answer that contributed to the severity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub question: String,
    pub phrase: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub label: ConcernLabel,
    pub severity: u32,
    /// Sorted by question id.
    pub matches: Vec<PhraseMatch>,
}

#[derive(Debug, Clone, Default)]
pub struct ConcernScorer {
    table: PhraseTable,
}

impl ConcernScorer {
    pub fn new(table: PhraseTable) -> Self {
        Self { table }
    }

    pub fn score(&self, answers: &AnswerSet) -> ConcernLabel {
        self.assess(answers).label
    }

    pub fn assess(&self, answers: &AnswerSet) -> Assessment {
        if answers.is_empty() {
            return Assessment {
                label: ConcernLabel::AwaitingCheckIn,
                severity: 0,
                matches: Vec::new(),
            };
        }

        let mut severity: u32 = 0;
        let mut matches = Vec::new();

        for (question, answer) in answers {
            let Value::String(text) = answer else {
                continue;
            };
            if let Some((phrase, weight)) = self.table.classify(text) {
                severity = severity.saturating_add(weight);
                matches.push(PhraseMatch {
                    question: question.clone(),
                    phrase: phrase.to_string(),
                    weight,
                });
            }
        }

        let label = ConcernLabel::from_severity(severity, &self.table.thresholds);
        tracing::debug!(
            answers = answers.len(),
            severity,
            label = %label,
            "scored check-in"
        );

        Assessment {
            label,
            severity,
            matches,
        }
    }
}

/// Scores `answers` against the built-in English phrase table.
pub fn score(answers: &AnswerSet) -> ConcernLabel {
    ConcernScorer::default().score(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answers(pairs: &[(&str, Value)]) -> AnswerSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_answers_await_check_in() {
        assert_eq!(score(&AnswerSet::new()), ConcernLabel::AwaitingCheckIn);
    }

    #[test]
    fn two_high_tier_answers_are_high_concern() {
        let a = answers(&[
            ("mood", json!("Terrible")),
            ("sleep", json!("Nearly every day")),
        ]);
        assert_eq!(score(&a), ConcernLabel::HighConcern);
    }

    #[test]
    fn high_plus_moderate_is_moderate_concern() {
        let a = answers(&[("q1", json!("Terrible")), ("q2", json!("Not great"))]);
        let assessment = ConcernScorer::default().assess(&a);
        assert_eq!(assessment.severity, 3);
        assert_eq!(assessment.label, ConcernLabel::ModerateConcern);
    }

    #[test]
    fn single_moderate_answer_is_feeling_okay() {
        let a = answers(&[("q1", json!("Frequently"))]);
        assert_eq!(score(&a), ConcernLabel::FeelingOkay);
    }

    #[test]
    fn unmatched_answers_are_feeling_okay() {
        let a = answers(&[("q1", json!("Pretty good")), ("q2", json!("Rarely"))]);
        let assessment = ConcernScorer::default().assess(&a);
        assert_eq!(assessment.severity, 0);
        assert!(assessment.matches.is_empty());
        assert_eq!(assessment.label, ConcernLabel::FeelingOkay);
    }

    #[test]
    fn answer_matching_both_tiers_counts_once_at_high_weight() {
        let a = answers(&[("q1", json!("Not great, Terrible really"))]);
        let assessment = ConcernScorer::default().assess(&a);
        assert_eq!(assessment.severity, 2);
        assert_eq!(assessment.matches[0].phrase, "Terrible");
        assert_eq!(assessment.label, ConcernLabel::ModerateConcern);
    }

    #[test]
    fn non_string_answers_contribute_nothing() {
        let a = answers(&[
            ("q1", json!(7)),
            ("q2", json!(null)),
            ("q3", json!(["Terrible"])),
            ("q4", json!({"text": "Terrible"})),
        ]);
        let assessment = ConcernScorer::default().assess(&a);
        assert_eq!(assessment.severity, 0);
        assert_eq!(assessment.label, ConcernLabel::FeelingOkay);
    }

    #[test]
    fn result_is_independent_of_insertion_order() {
        let values = [
            ("a", json!("Terrible")),
            ("b", json!("Considerably")),
            ("c", json!("Moderate difficulty")),
            ("d", json!("fine")),
        ];
        let forward = answers(&values);
        let mut reversed_pairs = values.to_vec();
        reversed_pairs.reverse();
        let reversed = answers(&reversed_pairs);
        // Same values under permuted keys.
        let permuted = answers(&[
            ("a", json!("fine")),
            ("b", json!("Moderate difficulty")),
            ("c", json!("Terrible")),
            ("d", json!("Considerably")),
        ]);

        let expected = score(&forward);
        assert_eq!(expected, ConcernLabel::HighConcern);
        assert_eq!(score(&reversed), expected);
        assert_eq!(score(&permuted), expected);
    }

    #[test]
    fn matches_are_sorted_by_question() {
        let a = answers(&[("z", json!("Frequently")), ("a", json!("Terrible"))]);
        let assessment = ConcernScorer::default().assess(&a);
        let questions: Vec<&str> = assessment.matches.iter().map(|m| m.question.as_str()).collect();
        assert_eq!(questions, vec!["a", "z"]);
    }

    #[test]
    fn custom_table_changes_thresholds() {
        let table = PhraseTable::from_json(
            r#"{"tiers": [{"weight": 1, "phrases": ["Mal"]}],
                "thresholds": {"moderate": 1, "high": 2}}"#,
        )
        .expect("valid table");
        let scorer = ConcernScorer::new(table);
        let a = answers(&[("q1", json!("Mal"))]);
        assert_eq!(scorer.score(&a), ConcernLabel::ModerateConcern);
    }

    #[test]
    fn label_strings_round_trip() {
        for label in [
            ConcernLabel::AwaitingCheckIn,
            ConcernLabel::FeelingOkay,
            ConcernLabel::ModerateConcern,
            ConcernLabel::HighConcern,
        ] {
            assert_eq!(label.to_string().parse::<ConcernLabel>().unwrap(), label);
            assert_eq!(
                serde_json::to_value(label).unwrap(),
                json!(label.as_str())
            );
        }
        assert!("Fine".parse::<ConcernLabel>().is_err());
    }
}
