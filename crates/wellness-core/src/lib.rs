pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod model;
pub mod phrases;
pub mod scorer;

pub use catalog::ResourceCatalog;
pub use dashboard::{greeting, ActivityEntry, DashboardState};
pub use error::CoreError;
pub use filter::{filter, FilterState, ALL_CATEGORIES};
pub use model::{CategorySummary, Resource};
pub use phrases::{ConcernThresholds, PhraseTable, PhraseTier};
pub use scorer::{
    score, AnswerSet, Assessment, ConcernLabel, ConcernScorer, PhraseMatch, HEURISTIC_DISCLAIMER,
};
