use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::query::CategoryQuery;
use super::types::{Category, ResultRow};
use super::KnowledgeStore;

/// On-disk dataset layout. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    #[serde(default)]
    pub destinations: Vec<ResultRow>,
    #[serde(default)]
    pub accommodations: Vec<ResultRow>,
    #[serde(default)]
    pub activities: Vec<ResultRow>,
    #[serde(default)]
    pub transport: Vec<ResultRow>,
}

/// Knowledge store backed by pre-materialized result rows.
///
/// Rows are returned in the order they were loaded, which is the order the
/// ranker uses to break ties.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    dataset: Dataset,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Load a JSON dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset at {}", path.display()))?;
        let dataset: Dataset = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dataset: invalid JSON in {}", path.display()))?;

        tracing::debug!(
            destinations = dataset.destinations.len(),
            accommodations = dataset.accommodations.len(),
            activities = dataset.activities.len(),
            transport = dataset.transport.len(),
            "loaded dataset from {}",
            path.display()
        );

        Ok(Self::new(dataset))
    }

    pub fn push(&mut self, category: Category, row: ResultRow) {
        self.rows_mut(category).push(row);
    }

    pub fn rows(&self, category: Category) -> &[ResultRow] {
        match category {
            Category::Destination => &self.dataset.destinations,
            Category::Accommodation => &self.dataset.accommodations,
            Category::Activity => &self.dataset.activities,
            Category::Transport => &self.dataset.transport,
        }
    }

    fn rows_mut(&mut self, category: Category) -> &mut Vec<ResultRow> {
        match category {
            Category::Destination => &mut self.dataset.destinations,
            Category::Accommodation => &mut self.dataset.accommodations,
            Category::Activity => &mut self.dataset.activities,
            Category::Transport => &mut self.dataset.transport,
        }
    }
}

impl KnowledgeStore for InMemoryStore {
    fn query(&self, query: &CategoryQuery) -> Result<Vec<ResultRow>> {
        // Activities are not filtered by destination: the graph links
        // activities to communities, not to places.
        let wanted = query.fields();
        let rows = self
            .rows(query.category())
            .iter()
            .map(|row| {
                let mut projected = ResultRow::new();
                for (name, value) in row.iter() {
                    if wanted.contains(&name) {
                        projected.insert(name, value.clone());
                    }
                }
                projected
            })
            .collect();
        Ok(rows)
    }
}
