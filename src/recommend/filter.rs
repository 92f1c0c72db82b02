use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::Recommender;
use crate::preferences::UserPreferenceContext;
use crate::scoring::ScoredCandidate;
use crate::store::{Category, CategoryQuery, KnowledgeStore, ResultRow};

/// Most rows a filter returns.
pub const FILTER_LIMIT: usize = 200;

/// Attribute filters over knowledge store rows.
///
/// Every set criterion must hold. A criterion on a field the row lacks
/// rejects the row. Blank strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterCriteria {
    /// Upper bound on `energie`, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_energy: Option<f64>,
    /// Case-insensitive substring of `niveau`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_certification_level: Option<String>,
    /// Case-insensitive substring of `localisation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Case-insensitive substring of any field value or of the category key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<Category>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn field_contains(row: &ResultRow, field: &str, needle: &str) -> bool {
    row.text(field)
        .is_some_and(|v| v.to_lowercase().contains(needle))
}

impl FilterCriteria {
    pub fn admits(&self, category: Category) -> bool {
        self.entity_type.map_or(true, |t| t == category)
    }

    pub fn matches(&self, category: Category, row: &ResultRow) -> bool {
        if !self.admits(category) {
            return false;
        }
        if let Some(max) = self.max_energy {
            if !row.number("energie").is_some_and(|e| e <= max) {
                return false;
            }
        }
        if let Some(level) = non_blank(&self.min_certification_level) {
            if !field_contains(row, "niveau", &level) {
                return false;
            }
        }
        if let Some(location) = non_blank(&self.location) {
            if !field_contains(row, "localisation", &location) {
                return false;
            }
        }
        if let Some(text) = non_blank(&self.text) {
            let in_values = row
                .iter()
                .any(|(_, value)| value.to_string().to_lowercase().contains(&text));
            if !in_values && !category.key().contains(&text) {
                return false;
            }
        }
        true
    }
}

/// Every row named like one requested entity, scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityComparison {
    pub entity: String,
    pub matches: Vec<ScoredCandidate>,
}

impl<S: KnowledgeStore> Recommender<S> {
    /// Rows of any category that satisfy `criteria`, scored against `prefs`
    /// and kept in store order.
    pub fn filter_candidates(
        &self,
        criteria: &FilterCriteria,
        prefs: &UserPreferenceContext,
    ) -> Result<Vec<ScoredCandidate>> {
        let mut found = Vec::new();
        for category in Category::ALL {
            if !criteria.admits(category) {
                continue;
            }
            let scored = self.fetch_and_score(&CategoryQuery::every(category), prefs)?;
            found.extend(
                scored
                    .into_iter()
                    .filter(|c| criteria.matches(category, &c.row)),
            );
            if found.len() >= FILTER_LIMIT {
                break;
            }
        }
        found.truncate(FILTER_LIMIT);
        tracing::debug!(matches = found.len(), ?criteria, "filtered knowledge store rows");
        Ok(found)
    }

    /// Side-by-side view of named entities. Names are matched against each
    /// category's name field, ignoring case; an unknown name has no matches.
    pub fn compare(
        &self,
        names: &[String],
        prefs: &UserPreferenceContext,
    ) -> Result<Vec<EntityComparison>> {
        if names.len() < 2 {
            bail!("At least 2 entities required to compare, got {}", names.len());
        }

        let mut every = Vec::new();
        for category in Category::ALL {
            every.extend(self.fetch_and_score(&CategoryQuery::every(category), prefs)?);
        }

        Ok(names
            .iter()
            .map(|name| {
                let wanted = name.trim().to_lowercase();
                let matches = every
                    .iter()
                    .filter(|c| {
                        c.row
                            .text(c.category.name_field())
                            .is_some_and(|n| n.to_lowercase() == wanted)
                    })
                    .cloned()
                    .collect();
                EntityComparison {
                    entity: name.clone(),
                    matches,
                }
            })
            .collect())
    }
}
