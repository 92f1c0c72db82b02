use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(distance) = config.estimated_distance_km {
        if !distance.is_finite() || distance < 0.0 {
            errors.push("scoring.estimated_distance_km: must be a non-negative number".to_string());
        }
    }

    if let Some(factor) = config.price_per_energy_unit {
        if !factor.is_finite() || factor <= 0.0 {
            errors.push("scoring.price_per_energy_unit: must be positive".to_string());
        }
    }

    if let Some(energy) = config.fallback_energy {
        if !energy.is_finite() || energy < 0.0 {
            errors.push("scoring.fallback_energy: must be non-negative".to_string());
        }
    }

    if let Some(score) = config.biodiversity_absent_score {
        if !(0.0..=100.0).contains(&score) {
            errors.push(format!(
                "scoring.biodiversity_absent_score: {} is outside 0-100",
                score
            ));
        }
    }

    if config.default_limit == Some(0) {
        errors.push("scoring.default_limit: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config() -> ScoringConfig {
        ScoringConfig {
            estimated_distance_km: None,
            price_per_energy_unit: None,
            fallback_energy: None,
            biodiversity_absent_score: None,
            default_limit: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&empty_config()).is_ok());
    }

    #[test]
    fn test_negative_distance() {
        let config = ScoringConfig {
            estimated_distance_km: Some(-1.0),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("estimated_distance_km"));
    }

    #[test]
    fn test_zero_price_factor() {
        let config = ScoringConfig {
            price_per_energy_unit: Some(0.0),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("price_per_energy_unit"));
    }

    #[test]
    fn test_biodiversity_out_of_range() {
        let config = ScoringConfig {
            biodiversity_absent_score: Some(120.0),
            ..empty_config()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("biodiversity_absent_score"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            estimated_distance_km: Some(-5.0), // Error 1
            price_per_energy_unit: None,
            fallback_energy: Some(-1.0), // Error 2
            biodiversity_absent_score: None,
            default_limit: Some(0), // Error 3
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
