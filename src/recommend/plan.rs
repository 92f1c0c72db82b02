use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Recommender;
use crate::preferences::UserPreferenceContext;
use crate::scoring::factors::round2;
use crate::scoring::rank::mean;
use crate::scoring::CategoryResult;
use crate::store::KnowledgeStore;

const PLAN_DESTINATIONS: usize = 3;
const PLAN_ACCOMMODATIONS: usize = 3;
const PLAN_ACTIVITIES: usize = 5;

/// Origin used for transport when a plan is generated without one.
pub const DEFAULT_ORIGIN: &str = "Origin";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanRecommendations {
    pub destinations: CategoryResult,
    pub accommodations: CategoryResult,
    pub activities: CategoryResult,
    pub transport: CategoryResult,
}

/// Terminal artifact of one plan request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelPlan {
    pub user_profile: UserPreferenceContext,
    pub recommendations: PlanRecommendations,
    pub total_eco_score: f64,
    pub estimated_carbon_footprint: f64,
    pub generated_at: DateTime<Utc>,
}

impl TravelPlan {
    fn empty(prefs: &UserPreferenceContext) -> Self {
        Self {
            user_profile: prefs.clone(),
            recommendations: PlanRecommendations::default(),
            total_eco_score: 0.0,
            estimated_carbon_footprint: 0.0,
            generated_at: Utc::now(),
        }
    }

    /// Name of the destination the rest of the plan was built around.
    pub fn top_destination(&self) -> Option<String> {
        self.recommendations.destinations.top().map(|c| c.name())
    }
}

/// Mean of the category summaries that exist: mean accommodation eco score,
/// mean activity final score and the top transport eco score. Missing
/// categories are left out of the mean rather than counted as zero.
pub fn total_eco_score(recommendations: &PlanRecommendations) -> f64 {
    let terms = [
        recommendations.accommodations.mean_score("eco_score"),
        recommendations.activities.mean_final_score(),
        recommendations
            .transport
            .top()
            .and_then(|t| t.score("eco_score")),
    ];
    mean(terms.into_iter().flatten()).map_or(0.0, round2)
}

pub fn estimated_carbon_footprint(recommendations: &PlanRecommendations) -> f64 {
    recommendations
        .transport
        .top()
        .and_then(|t| t.score("estimated_carbon"))
        .unwrap_or(0.0)
}

impl<S: KnowledgeStore> Recommender<S> {
    /// Build a complete plan around the best destination.
    ///
    /// No destination yields an empty plan with zero scores. Knowledge store
    /// failures are returned to the caller.
    pub fn generate_travel_plan(&self, prefs: &UserPreferenceContext) -> Result<TravelPlan> {
        self.generate_travel_plan_from(DEFAULT_ORIGIN, prefs)
    }

    pub fn generate_travel_plan_from(
        &self,
        origin: &str,
        prefs: &UserPreferenceContext,
    ) -> Result<TravelPlan> {
        let destinations = self.recommend_destinations(prefs, Some(PLAN_DESTINATIONS))?;

        let Some(top_destination) = destinations.top().map(|d| d.name()) else {
            tracing::debug!("no destination found, returning empty plan");
            return Ok(TravelPlan::empty(prefs));
        };
        tracing::debug!(destination = %top_destination, "building plan around top destination");

        let recommendations = PlanRecommendations {
            accommodations: self.recommend_accommodations(prefs, Some(PLAN_ACCOMMODATIONS))?,
            activities: self.recommend_activities(&top_destination, prefs, Some(PLAN_ACTIVITIES))?,
            transport: self.recommend_transport(origin, &top_destination, prefs)?,
            destinations,
        };

        Ok(TravelPlan {
            user_profile: prefs.clone(),
            total_eco_score: total_eco_score(&recommendations),
            estimated_carbon_footprint: estimated_carbon_footprint(&recommendations),
            recommendations,
            generated_at: Utc::now(),
        })
    }
}
