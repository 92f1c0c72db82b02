//! Single-criterion score functions.
//!
//! Every function is total: missing inputs resolve to a documented default
//! instead of an error, so scoring a row can never fail.

use std::fmt;

/// Round to two decimals, the precision attached to every published score.
/// Halves round away from zero (`f64::round`), so 0.125 becomes 0.13.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Accommodation energy score. Missing consumption carries no penalty.
pub fn energy_score(energie: Option<f64>) -> f64 {
    match energie {
        Some(kwh) => 100.0 - (kwh / 2.0).min(50.0),
        None => 100.0,
    }
}

/// Bonus granted by an eco-certification, read from its level text.
pub fn certification_bonus(certification: Option<&str>, level: Option<&str>) -> f64 {
    if certification.is_none() {
        return 0.0;
    }
    let level = level.unwrap_or("").trim().to_lowercase();
    if level.contains("gold") || level.contains("or") {
        20.0
    } else if level.contains("silver") || level.contains("argent") {
        10.0
    } else if !level.is_empty() {
        5.0
    } else {
        0.0
    }
}

/// Base ecological quality of an accommodation, clamped to 0..=100.
pub fn eco_score(energie: Option<f64>, certification: Option<&str>, level: Option<&str>) -> f64 {
    (energy_score(energie) + certification_bonus(certification, level)).clamp(0.0, 100.0)
}

/// Budget fit with linear decay of 1 point per 10 currency units over budget.
pub fn budget_score(estimated_price: f64, max_budget: Option<f64>) -> f64 {
    match max_budget {
        Some(budget) if estimated_price > budget => {
            (100.0 - (estimated_price - budget) / 10.0).max(0.0)
        }
        _ => 100.0,
    }
}

/// Destination score from the mean energy use of its accommodations.
pub fn destination_energy_score(mean_energy: Option<f64>) -> f64 {
    match mean_energy {
        Some(kwh) => (100.0 - kwh / 2.0).max(0.0),
        None => 100.0,
    }
}

pub fn biodiversity_score(has_biodiversity: bool, absent_score: f64) -> f64 {
    if has_biodiversity {
        80.0
    } else {
        absent_score
    }
}

/// 20 points per accommodation offered, capped at 100.
pub fn infrastructure_score(accommodation_count: Option<f64>) -> f64 {
    let count = accommodation_count.unwrap_or(0.0).trunc().max(0.0);
    (count * 20.0).min(100.0)
}

/// Free-text preference match against a destination's biodiversity facts.
///
/// A nature match outranks a culture interest; both need biodiversity text.
pub fn preference_score(tokens: &[String], biodiversity: Option<&str>) -> f64 {
    let Some(biodiversity) = biodiversity else {
        return 100.0;
    };
    let wants = |word: &str| tokens.iter().any(|t| t.contains(word));

    if wants("nature") && biodiversity.to_lowercase().contains("nature") {
        120.0
    } else if wants("culture") {
        110.0
    } else {
        100.0
    }
}

/// Environmental impact of an activity. Unknown impact is not penalized.
pub fn impact_score(impact: Option<&str>) -> f64 {
    let Some(impact) = impact else {
        return 100.0;
    };
    let impact = impact.to_lowercase();
    if impact.contains("faible") || impact.contains("low") {
        100.0
    } else if impact.contains("moyen") || impact.contains("medium") {
        60.0
    } else {
        30.0
    }
}

pub fn authenticity_score(is_authentic: bool) -> f64 {
    if is_authentic {
        90.0
    } else {
        50.0
    }
}

pub fn community_score(has_initiative: bool) -> f64 {
    if has_initiative {
        100.0
    } else {
        50.0
    }
}

/// Emission factor (kg CO2/km) applied to transport types outside the table.
pub const UNKNOWN_EMISSION_FACTOR: f64 = 0.15;
/// Comfort score of transport types outside the table.
pub const UNKNOWN_COMFORT_SCORE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Plane,
    Car,
    Train,
    PublicTransport,
    Bike,
    Carpool,
}

impl TransportKind {
    pub const ALL: [TransportKind; 6] = [
        TransportKind::Plane,
        TransportKind::Car,
        TransportKind::Train,
        TransportKind::PublicTransport,
        TransportKind::Bike,
        TransportKind::Carpool,
    ];

    /// Parse a transport class name, in English or French, optionally as a
    /// graph URI. Returns `None` for unknown classes.
    pub fn parse(s: &str) -> Option<Self> {
        let name = crate::store::types::local_name(s.trim()).to_lowercase();
        match name.as_str() {
            "plane" | "avion" => Some(TransportKind::Plane),
            "car" | "voiture" => Some(TransportKind::Car),
            "train" => Some(TransportKind::Train),
            "publictransport" | "transportpublic" => Some(TransportKind::PublicTransport),
            "bike" | "vélo" | "velo" => Some(TransportKind::Bike),
            "carpool" | "covoiturage" => Some(TransportKind::Carpool),
            _ => None,
        }
    }

    /// kg CO2 per km.
    pub fn emission_factor(&self) -> f64 {
        match self {
            TransportKind::Plane => 0.255,
            TransportKind::Car => 0.192,
            TransportKind::Train => 0.041,
            TransportKind::PublicTransport => 0.089,
            TransportKind::Bike => 0.0,
            TransportKind::Carpool => 0.096,
        }
    }

    pub fn comfort_score(&self) -> f64 {
        match self {
            TransportKind::Train => 90.0,
            TransportKind::Plane => 85.0,
            TransportKind::PublicTransport => 70.0,
            TransportKind::Carpool => 75.0,
            TransportKind::Bike => 60.0,
            TransportKind::Car => UNKNOWN_COMFORT_SCORE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransportKind::Plane => "Plane",
            TransportKind::Car => "Car",
            TransportKind::Train => "Train",
            TransportKind::PublicTransport => "PublicTransport",
            TransportKind::Bike => "Bike",
            TransportKind::Carpool => "Carpool",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Estimated kg CO2 for a trip of `distance_km`.
pub fn carbon_footprint(kind: Option<TransportKind>, distance_km: f64) -> f64 {
    let factor = kind.map_or(UNKNOWN_EMISSION_FACTOR, |k| k.emission_factor());
    distance_km * factor
}

pub fn transport_eco_score(carbon_kg: f64) -> f64 {
    (100.0 - carbon_kg / 2.0).max(0.0)
}

pub fn comfort_score(kind: Option<TransportKind>) -> f64 {
    kind.map_or(UNKNOWN_COMFORT_SCORE, |k| k.comfort_score())
}
