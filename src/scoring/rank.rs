use serde::Serialize;

use super::engine::ScoredCandidate;

/// Ranked candidates of one category, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryResult(pub Vec<ScoredCandidate>);

impl CategoryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &[ScoredCandidate] {
        &self.0
    }

    pub fn top(&self) -> Option<&ScoredCandidate> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate> {
        self.0.iter()
    }

    /// Mean of a criterion over all candidates that carry it.
    pub fn mean_score(&self, criterion: &str) -> Option<f64> {
        mean(self.0.iter().filter_map(|c| c.score(criterion)))
    }

    pub fn mean_final_score(&self) -> Option<f64> {
        mean(self.0.iter().map(|c| c.final_score))
    }
}

impl IntoIterator for CategoryResult {
    type Item = ScoredCandidate;
    type IntoIter = std::vec::IntoIter<ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Sort by final score descending and keep at most `limit` candidates.
///
/// The sort is stable: equal scores keep the order they were scored in.
pub fn rank(mut candidates: Vec<ScoredCandidate>, limit: Option<usize>) -> CategoryResult {
    candidates.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    if let Some(limit) = limit {
        candidates.truncate(limit);
    }
    CategoryResult(candidates)
}

/// Move candidates matching `is_match` ahead of the rest, keeping the
/// internal order of both groups. This is a partition, not a re-sort.
pub fn partition_matched<F>(candidates: Vec<ScoredCandidate>, is_match: F) -> Vec<ScoredCandidate>
where
    F: Fn(&ScoredCandidate) -> bool,
{
    let (mut matched, unmatched): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|c| is_match(c));
    matched.extend(unmatched);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::engine::ScoreBreakdown;
    use crate::store::{Category, ResultRow};

    fn candidate(name: &str, final_score: f64) -> ScoredCandidate {
        ScoredCandidate {
            category: Category::Activity,
            row: ResultRow::new().with("activite", name),
            breakdown: ScoreBreakdown::default(),
            final_score,
        }
    }

    fn names(result: &[ScoredCandidate]) -> Vec<String> {
        result.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank(
            vec![candidate("a", 50.0), candidate("b", 90.0), candidate("c", 70.0)],
            None,
        );
        assert_eq!(names(ranked.candidates()), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_ties_keep_scoring_order() {
        let ranked = rank(
            vec![
                candidate("first", 80.0),
                candidate("top", 95.0),
                candidate("second", 80.0),
                candidate("third", 80.0),
            ],
            None,
        );
        assert_eq!(names(ranked.candidates()), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let candidates = (0..10).map(|i| candidate(&i.to_string(), i as f64)).collect();
        let ranked = rank(candidates, Some(3));
        assert_eq!(names(ranked.candidates()), vec!["9", "8", "7"]);
    }

    #[test]
    fn test_rank_limit_larger_than_input() {
        let ranked = rank(vec![candidate("only", 10.0)], Some(5));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_partition_is_stable() {
        let candidates = vec![
            candidate("x1", 90.0),
            candidate("m1", 80.0),
            candidate("x2", 70.0),
            candidate("m2", 60.0),
        ];
        let partitioned = partition_matched(candidates, |c| c.name().starts_with('m'));
        assert_eq!(names(&partitioned), vec!["m1", "m2", "x1", "x2"]);
    }

    #[test]
    fn test_mean_scores() {
        let result = CategoryResult(vec![candidate("a", 60.0), candidate("b", 80.0)]);
        assert_eq!(result.mean_final_score(), Some(70.0));
        assert_eq!(result.mean_score("eco_score"), None);
        assert_eq!(CategoryResult::empty().mean_final_score(), None);
    }
}
