use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::config::ScoringConfig;
use super::factors::{self, round2, TransportKind};
use super::weights::{
    TransportWeights, ACCOMMODATION_WEIGHTS, ACTIVITY_WEIGHTS, DESTINATION_WEIGHTS,
    TRANSPORT_COST_RATIO,
};
use crate::preferences::UserPreferenceContext;
use crate::store::{Category, ResultRow};

#[derive(Debug, Clone, PartialEq)]
pub struct CriterionScore {
    pub name: &'static str, // e.g. "eco_score", "budget_score"
    pub value: f64,         // Rounded to two decimals
}

/// Per-criterion scores of one candidate, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub criteria: Vec<CriterionScore>,
}

impl ScoreBreakdown {
    fn push(&mut self, name: &'static str, value: f64) {
        self.criteria.push(CriterionScore {
            name,
            value: round2(value),
        });
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.criteria
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }
}

/// A result row with its criterion scores and weighted composite.
///
/// `final_score` may exceed 100: the destination preference bonus lifts its
/// criterion above the base range.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub category: Category,
    pub row: ResultRow,
    pub breakdown: ScoreBreakdown,
    pub final_score: f64,
}

impl ScoredCandidate {
    /// Look up a criterion score by name (e.g. `"eco_score"`).
    pub fn score(&self, name: &str) -> Option<f64> {
        self.breakdown.get(name)
    }

    /// Display name taken from the category's name field.
    pub fn name(&self) -> String {
        self.row
            .display(self.category.name_field())
            .unwrap_or_else(|| "(unnamed)".to_string())
    }
}

/// Serialized as the original row with the scores injected alongside.
impl Serialize for ScoredCandidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.row.len() + self.breakdown.criteria.len() + 1;
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in self.row.iter() {
            map.serialize_entry(name, value)?;
        }
        for criterion in &self.breakdown.criteria {
            map.serialize_entry(criterion.name, &criterion.value)?;
        }
        map.serialize_entry("final_score", &self.final_score)?;
        map.end()
    }
}

fn finish(category: Category, row: ResultRow, breakdown: ScoreBreakdown, final_score: f64) -> ScoredCandidate {
    ScoredCandidate {
        category,
        row,
        breakdown,
        final_score: round2(final_score),
    }
}

pub fn score_accommodation(
    row: ResultRow,
    prefs: &UserPreferenceContext,
    config: &ScoringConfig,
) -> ScoredCandidate {
    let energie = row.number("energie");
    let eco = factors::eco_score(energie, row.text("certification"), row.text("niveau"));

    let estimated_price = energie.unwrap_or_else(|| config.fallback_energy()) * config.price_factor();
    let budget = factors::budget_score(estimated_price, prefs.budget());

    let eco_preference = if prefs.is_eco_responsible() { eco } else { 100.0 };

    let w = ACCOMMODATION_WEIGHTS;
    let final_score = eco * w.eco + budget * w.budget + eco_preference * w.eco_preference;

    let mut breakdown = ScoreBreakdown::default();
    breakdown.push("eco_score", eco);
    breakdown.push("budget_score", budget);
    breakdown.push("eco_preference_score", eco_preference);
    finish(Category::Accommodation, row, breakdown, final_score)
}

pub fn score_destination(
    row: ResultRow,
    prefs: &UserPreferenceContext,
    config: &ScoringConfig,
) -> ScoredCandidate {
    let biodiversity_text = row.text("biodiversite");

    let energy = factors::destination_energy_score(row.number("energieMoyenne"));
    let biodiversity =
        factors::biodiversity_score(biodiversity_text.is_some(), config.biodiversity_absent());
    let infrastructure = factors::infrastructure_score(row.number("nbHebergements"));
    let preference = factors::preference_score(&prefs.tokens(), biodiversity_text);

    let w = DESTINATION_WEIGHTS;
    let final_score = energy * w.energy
        + biodiversity * w.biodiversity
        + infrastructure * w.infrastructure
        + preference * w.preference;

    let mut breakdown = ScoreBreakdown::default();
    breakdown.push("energy_score", energy);
    breakdown.push("biodiversity_score", biodiversity);
    breakdown.push("infrastructure_score", infrastructure);
    breakdown.push("preference_score", preference);
    finish(Category::Destination, row, breakdown, final_score)
}

pub fn score_activity(row: ResultRow) -> ScoredCandidate {
    let impact = factors::impact_score(row.text("impact"));
    let authenticity = factors::authenticity_score(row.is_present("authenticite"));
    let community = factors::community_score(row.is_present("initiative"));

    let w = ACTIVITY_WEIGHTS;
    let final_score = impact * w.impact + authenticity * w.authenticity + community * w.community;

    let mut breakdown = ScoreBreakdown::default();
    breakdown.push("impact_score", impact);
    breakdown.push("authenticity_score", authenticity);
    breakdown.push("community_score", community);
    finish(Category::Activity, row, breakdown, final_score)
}

pub fn score_transport(
    row: ResultRow,
    prefs: &UserPreferenceContext,
    config: &ScoringConfig,
) -> ScoredCandidate {
    let kind = row.text("typeTransport").and_then(TransportKind::parse);

    let carbon = factors::carbon_footprint(kind, config.distance_km());
    let eco = factors::transport_eco_score(carbon);
    let comfort = factors::comfort_score(kind);
    let cost = eco * TRANSPORT_COST_RATIO;

    let w = TransportWeights::for_profile(prefs.is_eco_responsible());
    let final_score = eco * w.eco + comfort * w.comfort + cost * w.cost();

    let mut breakdown = ScoreBreakdown::default();
    breakdown.push("estimated_carbon", carbon);
    breakdown.push("eco_score", eco);
    breakdown.push("comfort_score", comfort);
    breakdown.push("cost_score", cost);
    finish(Category::Transport, row, breakdown, final_score)
}

/// Score a row with the scorer of its category.
pub fn score_row(
    category: Category,
    row: ResultRow,
    prefs: &UserPreferenceContext,
    config: &ScoringConfig,
) -> ScoredCandidate {
    match category {
        Category::Destination => score_destination(row, prefs, config),
        Category::Accommodation => score_accommodation(row, prefs, config),
        Category::Activity => score_activity(row),
        Category::Transport => score_transport(row, prefs, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::EcoProfile;
    use pretty_assertions::assert_eq;

    fn eco_prefs() -> UserPreferenceContext {
        UserPreferenceContext::new()
            .with_budget(Some(2000.0))
            .with_profile(Some(EcoProfile::EcoResponsible))
            .with_preferences("nature")
    }

    #[test]
    fn test_accommodation_missing_energy_defaults() {
        let row = ResultRow::new().with("hebergement", "Refuge");
        let scored = score_accommodation(row, &UserPreferenceContext::new(), &ScoringConfig::default());
        assert_eq!(scored.score("eco_score"), Some(100.0));
        assert_eq!(scored.score("budget_score"), Some(100.0));
        assert_eq!(scored.final_score, 100.0);
    }

    #[test]
    fn test_accommodation_budget_boundary() {
        let prefs = UserPreferenceContext::new().with_budget(Some(100.0));
        let config = ScoringConfig::default();

        let at_budget = score_accommodation(ResultRow::new().with("energie", 50.0), &prefs, &config);
        assert_eq!(at_budget.score("budget_score"), Some(100.0));

        let over_budget = score_accommodation(ResultRow::new().with("energie", 60.0), &prefs, &config);
        assert_eq!(over_budget.score("budget_score"), Some(98.0));
    }

    #[test]
    fn test_accommodation_eco_profile_path() {
        let row = ResultRow::new().with("hebergement", "EcoLodge").with("energie", 80.0);
        let config = ScoringConfig::default();

        let eco = score_accommodation(row.clone(), &eco_prefs(), &config);
        assert_eq!(eco.score("eco_score"), Some(60.0));
        assert_eq!(eco.score("eco_preference_score"), Some(60.0));
        // 60*0.5 + 100*0.3 + 60*0.2
        assert_eq!(eco.final_score, 72.0);

        let flexible = UserPreferenceContext::new().with_profile(Some(EcoProfile::Flexible));
        let other = score_accommodation(row, &flexible, &config);
        assert_eq!(other.score("eco_preference_score"), Some(100.0));
        assert_eq!(other.final_score, 80.0);
    }

    #[test]
    fn test_destination_nature_preference() {
        let row = ResultRow::new()
            .with("destination", "Vercors")
            .with("biodiversite", "forêt nature")
            .with("nbHebergements", 2.0)
            .with("energieMoyenne", 60.0);
        let scored = score_destination(row, &eco_prefs(), &ScoringConfig::default());

        assert_eq!(scored.score("preference_score"), Some(120.0));
        assert_eq!(scored.score("energy_score"), Some(70.0));
        assert_eq!(scored.score("biodiversity_score"), Some(80.0));
        assert_eq!(scored.score("infrastructure_score"), Some(40.0));
        // 70*0.35 + 80*0.25 + 40*0.2 + 120*0.2
        assert_eq!(scored.final_score, 76.5);
    }

    #[test]
    fn test_destination_biodiversity_default_is_configurable() {
        let row = ResultRow::new().with("destination", "Beauce");
        let config = ScoringConfig {
            biodiversity_absent_score: Some(40.0),
            ..ScoringConfig::default()
        };
        let scored = score_destination(row, &UserPreferenceContext::new(), &config);
        assert_eq!(scored.score("biodiversity_score"), Some(40.0));
    }

    #[test]
    fn test_activity_scores() {
        let row = ResultRow::new()
            .with("activite", "Randonnée")
            .with("impact", "Faible")
            .with("authenticite", true)
            .with("initiative", "Sentiers propres");
        let scored = score_activity(row);
        assert_eq!(scored.score("impact_score"), Some(100.0));
        assert_eq!(scored.score("authenticity_score"), Some(90.0));
        assert_eq!(scored.score("community_score"), Some(100.0));
        assert_eq!(scored.final_score, 97.0);
    }

    #[test]
    fn test_activity_zero_flags_are_absent() {
        let row = ResultRow::new()
            .with("activite", "Visite")
            .with("authenticite", 0.0)
            .with("initiative", 0.0);
        let scored = score_activity(row);
        assert_eq!(scored.score("authenticity_score"), Some(50.0));
        assert_eq!(scored.score("community_score"), Some(50.0));
        assert_eq!(scored.final_score, 70.0);
    }

    #[test]
    fn test_transport_eco_weight() {
        let row = ResultRow::new()
            .with("transport", "TGV Lyon")
            .with("typeTransport", "Train")
            .with("co2", 20.0);
        let config = ScoringConfig::default();

        let scored = score_transport(row.clone(), &eco_prefs(), &config);
        assert_eq!(scored.score("estimated_carbon"), Some(20.5));
        assert_eq!(scored.score("eco_score"), Some(89.75));
        assert_eq!(scored.score("comfort_score"), Some(90.0));
        // 89.75*0.6 + 90*0.25 + 71.8*0.15 = 53.85 + 22.5 + 10.77
        assert_eq!(scored.final_score, 87.12);

        let moderate = UserPreferenceContext::new().with_profile(Some(EcoProfile::Moderate));
        let scored = score_transport(row.clone(), &moderate, &config);
        // 89.75*0.3 + 90*0.25 + 71.8*0.45 is 81.735 on paper but 81.734999...
        // in f64, just below the half, so it rounds down.
        assert_eq!(scored.final_score, 81.73);

        // Near spellings of the eco label take the same path as Modéré.
        let loose: UserPreferenceContext =
            serde_json::from_str(r#"{"eco_profile":"eco"}"#).unwrap();
        let scored = score_transport(row, &loose, &config);
        assert_eq!(scored.final_score, 81.73);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let row = ResultRow::new()
            .with("destination", "Camargue")
            .with("biodiversite", "zones humides");
        let config = ScoringConfig::default();
        let first = score_destination(row.clone(), &eco_prefs(), &config);
        let second = score_destination(row, &eco_prefs(), &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialize_injects_scores() {
        let row = ResultRow::new().with("activite", "Kayak");
        let scored = score_activity(row);
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["activite"], "Kayak");
        assert_eq!(json["impact_score"], 100.0);
        // 100*0.4 + 50*0.3 + 50*0.3
        assert_eq!(json["final_score"], 70.0);
    }
}
