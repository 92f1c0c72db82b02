//! Fixed category weights. Changing these changes product behavior.

#[derive(Debug, Clone, Copy)]
pub struct AccommodationWeights {
    pub eco: f64,
    pub budget: f64,
    pub eco_preference: f64,
}

pub const ACCOMMODATION_WEIGHTS: AccommodationWeights = AccommodationWeights {
    eco: 0.5,
    budget: 0.3,
    eco_preference: 0.2,
};

#[derive(Debug, Clone, Copy)]
pub struct DestinationWeights {
    pub energy: f64,
    pub biodiversity: f64,
    pub infrastructure: f64,
    pub preference: f64,
}

pub const DESTINATION_WEIGHTS: DestinationWeights = DestinationWeights {
    energy: 0.35,
    biodiversity: 0.25,
    infrastructure: 0.20,
    preference: 0.20,
};

#[derive(Debug, Clone, Copy)]
pub struct ActivityWeights {
    pub impact: f64,
    pub authenticity: f64,
    pub community: f64,
}

pub const ACTIVITY_WEIGHTS: ActivityWeights = ActivityWeights {
    impact: 0.4,
    authenticity: 0.3,
    community: 0.3,
};

/// Transport weights depend on the eco profile; cost takes what eco and
/// comfort leave.
#[derive(Debug, Clone, Copy)]
pub struct TransportWeights {
    pub eco: f64,
    pub comfort: f64,
}

pub const TRANSPORT_WEIGHTS_ECO: TransportWeights = TransportWeights {
    eco: 0.6,
    comfort: 0.25,
};

pub const TRANSPORT_WEIGHTS_DEFAULT: TransportWeights = TransportWeights {
    eco: 0.3,
    comfort: 0.25,
};

/// Cost is estimated as a fraction of the eco score.
pub const TRANSPORT_COST_RATIO: f64 = 0.8;

impl AccommodationWeights {
    pub fn sum(&self) -> f64 {
        self.eco + self.budget + self.eco_preference
    }
}

impl DestinationWeights {
    pub fn sum(&self) -> f64 {
        self.energy + self.biodiversity + self.infrastructure + self.preference
    }
}

impl ActivityWeights {
    pub fn sum(&self) -> f64 {
        self.impact + self.authenticity + self.community
    }
}

impl TransportWeights {
    pub fn for_profile(eco_responsible: bool) -> Self {
        if eco_responsible {
            TRANSPORT_WEIGHTS_ECO
        } else {
            TRANSPORT_WEIGHTS_DEFAULT
        }
    }

    pub fn cost(&self) -> f64 {
        1.0 - self.eco - self.comfort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((ACCOMMODATION_WEIGHTS.sum() - 1.0).abs() < 1e-9);
        assert!((DESTINATION_WEIGHTS.sum() - 1.0).abs() < 1e-9);
        assert!((ACTIVITY_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn transport_cost_weight_is_remainder() {
        assert!((TransportWeights::for_profile(true).cost() - 0.15).abs() < 1e-9);
        assert!((TransportWeights::for_profile(false).cost() - 0.45).abs() < 1e-9);
    }
}
