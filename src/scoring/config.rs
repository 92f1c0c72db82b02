use serde::{Deserialize, Serialize};

pub const DEFAULT_DISTANCE_KM: f64 = 500.0;
pub const DEFAULT_PRICE_PER_ENERGY_UNIT: f64 = 2.0;
pub const DEFAULT_FALLBACK_ENERGY: f64 = 100.0;
pub const DEFAULT_BIODIVERSITY_ABSENT_SCORE: f64 = 50.0;
pub const DEFAULT_LIMIT: usize = 5;

/// Tunable placeholders of the scoring model.
///
/// Weights are part of the product and are not configurable; these values
/// are domain stand-ins (no measured distances or prices exist in the graph).
///
/// Example YAML:
/// ```yaml
/// scoring:
///   estimated_distance_km: 800
///   price_per_energy_unit: 2.5
///   biodiversity_absent_score: 40
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Trip distance used for carbon estimates (default: 500 km)
    #[serde(default)]
    pub estimated_distance_km: Option<f64>,

    /// Price proxy: estimated price = energy x this factor (default: 2.0)
    #[serde(default)]
    pub price_per_energy_unit: Option<f64>,

    /// Energy assumed for pricing when a stay has no energy figure (default: 100)
    #[serde(default)]
    pub fallback_energy: Option<f64>,

    /// Biodiversity score of a destination without biodiversity facts (default: 50)
    #[serde(default)]
    pub biodiversity_absent_score: Option<f64>,

    /// Default number of candidates returned per category (default: 5)
    #[serde(default)]
    pub default_limit: Option<usize>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            estimated_distance_km: Some(DEFAULT_DISTANCE_KM),
            price_per_energy_unit: Some(DEFAULT_PRICE_PER_ENERGY_UNIT),
            fallback_energy: Some(DEFAULT_FALLBACK_ENERGY),
            biodiversity_absent_score: Some(DEFAULT_BIODIVERSITY_ABSENT_SCORE),
            default_limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl ScoringConfig {
    pub fn distance_km(&self) -> f64 {
        self.estimated_distance_km.unwrap_or(DEFAULT_DISTANCE_KM)
    }

    pub fn price_factor(&self) -> f64 {
        self.price_per_energy_unit
            .unwrap_or(DEFAULT_PRICE_PER_ENERGY_UNIT)
    }

    pub fn fallback_energy(&self) -> f64 {
        self.fallback_energy.unwrap_or(DEFAULT_FALLBACK_ENERGY)
    }

    pub fn biodiversity_absent(&self) -> f64 {
        self.biodiversity_absent_score
            .unwrap_or(DEFAULT_BIODIVERSITY_ABSENT_SCORE)
    }

    pub fn limit(&self) -> usize {
        self.default_limit.unwrap_or(DEFAULT_LIMIT)
    }
}
