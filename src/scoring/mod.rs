pub mod config;
pub mod engine;
pub mod factors;
pub mod rank;
pub mod validation;
pub mod weights;

pub use config::ScoringConfig;
pub use engine::{score_row, CriterionScore, ScoreBreakdown, ScoredCandidate};
pub use factors::TransportKind;
pub use rank::{partition_matched, rank, CategoryResult};
pub use validation::validate_scoring;
