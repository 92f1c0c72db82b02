pub mod filter;
pub mod plan;

pub use filter::{EntityComparison, FilterCriteria};
pub use plan::{PlanRecommendations, TravelPlan};

use anyhow::Result;

use crate::preferences::UserPreferenceContext;
use crate::scoring::{partition_matched, rank, score_row, CategoryResult, ScoredCandidate, ScoringConfig};
use crate::store::{Category, CategoryQuery, KnowledgeStore, ResultRow};

/// Category recommenders over a knowledge store.
///
/// Holds no request state: every call queries the store afresh and scores
/// the returned rows against the caller's preferences.
pub struct Recommender<S> {
    store: S,
    scoring: ScoringConfig,
}

impl<S: KnowledgeStore> Recommender<S> {
    pub fn new(store: S, scoring: ScoringConfig) -> Self {
        Self { store, scoring }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    fn fetch_and_score(
        &self,
        query: &CategoryQuery,
        prefs: &UserPreferenceContext,
    ) -> Result<Vec<ScoredCandidate>> {
        let category = query.category();
        let rows = self.store.query(query)?;
        tracing::debug!(%category, rows = rows.len(), "scoring knowledge store rows");

        Ok(rows
            .into_iter()
            .map(|row| score_row(category, row, prefs, &self.scoring))
            .collect())
    }

    /// Destinations ranked by composite score. When the user gave free-text
    /// preferences, destinations whose name, location or biodiversity text
    /// mention a preference come first.
    pub fn recommend_destinations(
        &self,
        prefs: &UserPreferenceContext,
        limit: Option<usize>,
    ) -> Result<CategoryResult> {
        let scored = self.fetch_and_score(&CategoryQuery::Destinations, prefs)?;
        let mut ranked = rank(scored, None).0;

        if prefs.has_preferences() {
            let tokens = prefs.tokens();
            ranked = partition_matched(ranked, |c| {
                let texts: Vec<&str> = ["destination", "localisation", "biodiversite"]
                    .iter()
                    .filter_map(|f| c.row.text(f))
                    .collect();
                crate::preferences::matches_any(&tokens, &texts)
            });
        }

        ranked.truncate(limit.unwrap_or_else(|| self.scoring.limit()));
        Ok(CategoryResult(ranked))
    }

    pub fn recommend_accommodations(
        &self,
        prefs: &UserPreferenceContext,
        limit: Option<usize>,
    ) -> Result<CategoryResult> {
        let scored = self.fetch_and_score(&CategoryQuery::Accommodations, prefs)?;
        Ok(rank(scored, Some(limit.unwrap_or_else(|| self.scoring.limit()))))
    }

    pub fn recommend_activities(
        &self,
        destination: &str,
        prefs: &UserPreferenceContext,
        limit: Option<usize>,
    ) -> Result<CategoryResult> {
        let query = CategoryQuery::Activities {
            destination: destination.to_string(),
        };
        let scored = self.fetch_and_score(&query, prefs)?;
        Ok(rank(scored, Some(limit.unwrap_or_else(|| self.scoring.limit()))))
    }

    /// Every transport option, best first. Transport is never truncated.
    pub fn recommend_transport(
        &self,
        origin: &str,
        destination: &str,
        prefs: &UserPreferenceContext,
    ) -> Result<CategoryResult> {
        let query = CategoryQuery::Transport {
            origin: origin.to_string(),
            destination: destination.to_string(),
        };
        let scored = self.fetch_and_score(&query, prefs)?;
        Ok(rank(scored, None))
    }

    /// Eco score breakdown of a single accommodation, looked up by name.
    pub fn eco_score_for(&self, name: &str) -> Result<Option<ScoredCandidate>> {
        let rows = self.store.query(&CategoryQuery::Accommodations)?;
        let found = rows.into_iter().find(|row: &ResultRow| {
            row.text(Category::Accommodation.name_field())
                .is_some_and(|n| n.eq_ignore_ascii_case(name.trim()))
        });

        Ok(found.map(|row| {
            score_row(
                Category::Accommodation,
                row,
                &UserPreferenceContext::default(),
                &self.scoring,
            )
        }))
    }
}
