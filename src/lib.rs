//! Eco-friendly travel recommendations.
//!
//! Rows from a travel knowledge graph are scored per criterion (energy,
//! certification, biodiversity, budget, carbon, ...), combined into weighted
//! composite scores conditioned on the user's eco profile, ranked, and folded
//! into a travel plan with an overall eco-score and carbon estimate.

pub mod config;
pub mod output;
pub mod preferences;
pub mod recommend;
pub mod scoring;
pub mod store;

pub use preferences::{EcoProfile, UserPreferenceContext};
pub use recommend::{FilterCriteria, Recommender, TravelPlan};
pub use scoring::{CategoryResult, ScoredCandidate, ScoringConfig};
pub use store::{InMemoryStore, KnowledgeStore, ResultRow};
