use super::types::Category;

/// A fixed-shape read request for one recommendation category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryQuery {
    Destinations,
    Accommodations,
    /// Activities offered around a destination.
    Activities { destination: String },
    Transport { origin: String, destination: String },
}

impl CategoryQuery {
    /// Unrestricted query for a category: activities around any destination,
    /// transport between any places.
    pub fn every(category: Category) -> Self {
        match category {
            Category::Destination => CategoryQuery::Destinations,
            Category::Accommodation => CategoryQuery::Accommodations,
            Category::Activity => CategoryQuery::Activities {
                destination: String::new(),
            },
            Category::Transport => CategoryQuery::Transport {
                origin: String::new(),
                destination: String::new(),
            },
        }
    }

    pub fn category(&self) -> Category {
        match self {
            CategoryQuery::Destinations => Category::Destination,
            CategoryQuery::Accommodations => Category::Accommodation,
            CategoryQuery::Activities { .. } => Category::Activity,
            CategoryQuery::Transport { .. } => Category::Transport,
        }
    }

    /// Fields a store is expected to return for this query. Any of them may
    /// be missing on a given row.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            CategoryQuery::Destinations => &[
                "destination",
                "localisation",
                "biodiversite",
                "nbHebergements",
                "energieMoyenne",
            ],
            CategoryQuery::Accommodations => &["hebergement", "energie", "certification", "niveau"],
            CategoryQuery::Activities { .. } => {
                &["activite", "authenticite", "impact", "communaute", "initiative"]
            }
            CategoryQuery::Transport { .. } => &["transport", "typeTransport", "co2", "reduction"],
        }
    }
}
