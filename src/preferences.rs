use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Coarse user segmentation that shifts weights toward ecological criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcoProfile {
    EcoResponsible,
    Moderate,
    Flexible,
    Other(String),
}

impl EcoProfile {
    /// Parse a profile label. Only the exact labels are recognized; any other
    /// value, including near spellings, is kept as `Other` and carries no
    /// weight shift.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Éco-responsable" => EcoProfile::EcoResponsible,
            "Modéré" => EcoProfile::Moderate,
            "Flexible" => EcoProfile::Flexible,
            other => EcoProfile::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EcoProfile::EcoResponsible => "Éco-responsable",
            EcoProfile::Moderate => "Modéré",
            EcoProfile::Flexible => "Flexible",
            EcoProfile::Other(s) => s,
        }
    }
}

impl fmt::Display for EcoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EcoProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EcoProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EcoProfile::parse(&s))
    }
}

/// Immutable input of one recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferenceContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eco_profile: Option<EcoProfile>,
    #[serde(default)]
    pub preferences: String,
}

impl UserPreferenceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the budget. Non-positive or non-finite budgets mean "no budget".
    pub fn with_budget(mut self, max_budget: Option<f64>) -> Self {
        self.max_budget = max_budget.filter(|b| b.is_finite() && *b > 0.0);
        self
    }

    pub fn with_profile(mut self, profile: Option<EcoProfile>) -> Self {
        self.eco_profile = profile;
        self
    }

    pub fn with_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = preferences.into();
        self
    }

    /// Effective budget, ignoring values that cannot be a budget.
    pub fn budget(&self) -> Option<f64> {
        self.max_budget.filter(|b| b.is_finite() && *b > 0.0)
    }

    pub fn is_eco_responsible(&self) -> bool {
        matches!(self.eco_profile, Some(EcoProfile::EcoResponsible))
    }

    pub fn has_preferences(&self) -> bool {
        !self.preferences.trim().is_empty()
    }

    /// Lowercased whitespace tokens of the free-text preferences.
    pub fn tokens(&self) -> Vec<String> {
        tokenize(&self.preferences)
    }

    /// True when any preference token occurs in any of `texts`.
    pub fn matches_text(&self, texts: &[&str]) -> bool {
        matches_any(&self.tokens(), texts)
    }
}

/// Lowercased whitespace tokens with surrounding ASCII punctuation removed,
/// so "nature, randonnée" yields `nature` and `randonnée`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Case-insensitive substring match of any token against any text.
pub fn matches_any(tokens: &[String], texts: &[&str]) -> bool {
    let haystacks: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
    tokens
        .iter()
        .any(|token| haystacks.iter().any(|h| h.contains(token.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profiles() {
        assert_eq!(EcoProfile::parse("Éco-responsable"), EcoProfile::EcoResponsible);
        assert_eq!(EcoProfile::parse(" Éco-responsable "), EcoProfile::EcoResponsible);
        assert_eq!(EcoProfile::parse("Modéré"), EcoProfile::Moderate);
        assert_eq!(EcoProfile::parse("Flexible"), EcoProfile::Flexible);
        assert_eq!(
            EcoProfile::parse("Aventurier"),
            EcoProfile::Other("Aventurier".to_string())
        );
    }

    #[test]
    fn test_near_spellings_are_other() {
        for label in ["eco", "eco-responsible", "ecoresponsable", "éco-responsable"] {
            assert_eq!(EcoProfile::parse(label), EcoProfile::Other(label.to_string()));
        }
        let prefs: UserPreferenceContext = serde_json::from_str(r#"{"eco_profile":"eco"}"#).unwrap();
        assert!(!prefs.is_eco_responsible());
        assert_eq!(prefs.eco_profile, Some(EcoProfile::Other("eco".to_string())));
    }

    #[test]
    fn test_tokens_strip_punctuation() {
        let prefs = UserPreferenceContext::new().with_preferences("nature, randonnée ; (culture)");
        assert_eq!(prefs.tokens(), vec!["nature", "randonnée", "culture"]);
        assert!(prefs.matches_text(&["forêt nature"]));
    }

    #[test]
    fn test_tokens_are_lowercased() {
        let prefs = UserPreferenceContext::new().with_preferences("Nature  Culture");
        assert_eq!(prefs.tokens(), vec!["nature", "culture"]);
    }

    #[test]
    fn test_empty_preferences_never_match() {
        let prefs = UserPreferenceContext::new();
        assert!(!prefs.has_preferences());
        assert!(!prefs.matches_text(&["forêt nature"]));
    }

    #[test]
    fn test_matches_text_substring() {
        let prefs = UserPreferenceContext::new().with_preferences("montagne");
        assert!(prefs.matches_text(&["Alpes", "Haute-Montagne"]));
        assert!(!prefs.matches_text(&["Bretagne", "littoral"]));
    }

    #[test]
    fn test_non_positive_budget_is_absent() {
        let prefs = UserPreferenceContext::new().with_budget(Some(0.0));
        assert_eq!(prefs.budget(), None);
        let prefs = UserPreferenceContext::new().with_budget(Some(150.0));
        assert_eq!(prefs.budget(), Some(150.0));
    }

    #[test]
    fn test_deserialize_request_body() {
        let json = r#"{"max_budget": 2000, "eco_profile": "Éco-responsable", "preferences": "nature"}"#;
        let prefs: UserPreferenceContext = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.max_budget, Some(2000.0));
        assert!(prefs.is_eco_responsible());
        assert_eq!(prefs.preferences, "nature");
    }
}
