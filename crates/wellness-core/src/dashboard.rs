use serde::{Deserialize, Serialize};

use crate::scorer::ConcernLabel;

pub const MAX_RECENT_ACTIVITY: usize = 5;
pub const CHECK_IN_TITLE: &str = "Completed Wellness Check-in";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Milliseconds since the Unix epoch at which the activity was recorded.
    pub id: u64,
    pub title: String,
    pub description: String,
}

/// Per-user dashboard state. The host owns persistence; this type only
/// describes transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default)]
    pub mental_state: Option<ConcernLabel>,
    /// Newest first, at most [`MAX_RECENT_ACTIVITY`] entries.
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
}

impl DashboardState {
    pub fn current_label(&self) -> ConcernLabel {
        self.mental_state.unwrap_or(ConcernLabel::AwaitingCheckIn)
    }

    pub fn complete_check_in(self, label: ConcernLabel, recorded_at_ms: u64) -> Self {
        let entry = ActivityEntry {
            id: recorded_at_ms,
            title: CHECK_IN_TITLE.to_string(),
            description: format!("You reported feeling {label}"),
        };

        let mut recent_activity = Vec::with_capacity(MAX_RECENT_ACTIVITY);
        recent_activity.push(entry);
        recent_activity.extend(
            self.recent_activity
                .into_iter()
                .take(MAX_RECENT_ACTIVITY - 1),
        );

        Self {
            mental_state: Some(label),
            recent_activity,
        }
    }
}

pub fn greeting(hour: u8) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_awaits_check_in() {
        let state = DashboardState::default();
        assert_eq!(state.current_label(), ConcernLabel::AwaitingCheckIn);
        assert!(state.recent_activity.is_empty());
    }

    #[test]
    fn check_in_sets_label_and_prepends_activity() {
        let state = DashboardState::default()
            .complete_check_in(ConcernLabel::FeelingOkay, 10)
            .complete_check_in(ConcernLabel::HighConcern, 20);

        assert_eq!(state.current_label(), ConcernLabel::HighConcern);
        assert_eq!(state.recent_activity.len(), 2);
        assert_eq!(state.recent_activity[0].id, 20);
        assert_eq!(
            state.recent_activity[0].description,
            "You reported feeling High Concern"
        );
        assert_eq!(state.recent_activity[1].id, 10);
    }

    #[test]
    fn activity_is_capped() {
        let mut state = DashboardState::default();
        for ts in 0..8 {
            state = state.complete_check_in(ConcernLabel::ModerateConcern, ts);
        }
        let ids: Vec<u64> = state.recent_activity.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn greeting_by_hour() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }

    #[test]
    fn state_serializes_label_as_text() {
        let state = DashboardState::default().complete_check_in(ConcernLabel::FeelingOkay, 1);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["mental_state"], "Feeling Okay");
        let back: DashboardState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
