use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::recommend::{EntityComparison, TravelPlan};
use crate::scoring::ScoredCandidate;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals, dropping a trailing ".00"
pub fn format_score(score: f64) -> String {
    let formatted = format!("{:.2}", score);
    match formatted.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

/// Format a carbon estimate in kg CO2
pub fn format_carbon(kg: f64) -> String {
    format!("{} kg CO2", format_score(kg))
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Short "label value" summary of the criterion scores
fn criteria_summary(candidate: &ScoredCandidate) -> String {
    candidate
        .breakdown
        .criteria
        .iter()
        .map(|c| {
            let label = c.name.trim_end_matches("_score");
            format!("{} {}", label, format_score(c.value))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format candidates as a ranked table with columns: Index, Score, Name, Criteria
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 7 chars wide (fits "1000.00")
pub fn format_scored_table(candidates: &[ScoredCandidate], use_colors: bool) -> String {
    if candidates.is_empty() {
        return "No recommendations found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 7;
    let separator = "  ";

    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!(
                "{:>width$}",
                format_score(candidate.final_score),
                width = score_width
            );
            let summary = criteria_summary(candidate);

            let fixed_width = index_width + 1 + score_width + separator.len() * 2 + summary.chars().count();
            let name = candidate.name();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(&name, width - fixed_width),
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&name, 20),
                // No terminal (pipe), don't truncate
                None => name,
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name,
                    separator,
                    summary.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, name, separator, summary
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format candidates as tab-separated values for scripting
/// Columns: final score, name, category (no headers, no colors)
pub fn format_tsv(candidates: &[ScoredCandidate]) -> String {
    candidates
        .iter()
        .map(|c| {
            format!(
                "{}\t{}\t{}",
                format_score(c.final_score),
                c.name(),
                c.category.key()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line breakdown of one candidate's criterion scores
pub fn format_breakdown(candidate: &ScoredCandidate, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(candidate.breakdown.criteria.len() + 2);
    let name = candidate.name();
    lines.push(if use_colors {
        name.bold().to_string()
    } else {
        name
    });

    for (field, value) in candidate.row.iter() {
        if field != candidate.category.name_field() {
            lines.push(format!("  {}: {}", field, value));
        }
    }
    for criterion in &candidate.breakdown.criteria {
        lines.push(format!("  {} = {}", criterion.name, format_score(criterion.value)));
    }

    let final_line = format!("  final_score = {}", format_score(candidate.final_score));
    lines.push(if use_colors {
        final_line.green().to_string()
    } else {
        final_line
    });
    lines.join("\n")
}

fn format_section(title: &str, candidates: &[ScoredCandidate], use_colors: bool) -> String {
    let heading = format!("{} ({})", title, candidates.len());
    let heading = if use_colors {
        heading.bold().underline().to_string()
    } else {
        heading
    };
    format!(
        "{}\n{}",
        heading,
        format_scored_table(candidates, use_colors)
    )
}

/// Human-readable travel plan: one table per category then the totals
pub fn format_plan(plan: &TravelPlan, use_colors: bool) -> String {
    let recs = &plan.recommendations;
    if recs.destinations.is_empty() {
        return "No destination matches these preferences.".to_string();
    }

    let sections = [
        format_section("Destinations", recs.destinations.candidates(), use_colors),
        format_section("Accommodations", recs.accommodations.candidates(), use_colors),
        format_section("Activities", recs.activities.candidates(), use_colors),
        format_section("Transport", recs.transport.candidates(), use_colors),
    ];

    let eco = format!("Total eco-score: {}", format_score(plan.total_eco_score));
    let carbon = format!(
        "Estimated carbon footprint: {}",
        format_carbon(plan.estimated_carbon_footprint)
    );
    let totals = if use_colors {
        format!("{}\n{}", eco.green().bold(), carbon.yellow())
    } else {
        format!("{}\n{}", eco, carbon)
    };

    format!("{}\n\n{}", sections.join("\n\n"), totals)
}

/// One section per compared entity, in request order
pub fn format_comparison(comparisons: &[EntityComparison], use_colors: bool) -> String {
    comparisons
        .iter()
        .map(|c| format_section(&c.entity, &c.matches, use_colors))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::engine::{score_accommodation, score_activity};
    use crate::scoring::ScoringConfig;
    use crate::preferences::UserPreferenceContext;
    use crate::store::ResultRow;

    fn sample_stay(name: &str, energie: f64) -> ScoredCandidate {
        score_accommodation(
            ResultRow::new().with("hebergement", name).with("energie", energie),
            &UserPreferenceContext::new(),
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(72.0), "72");
        assert_eq!(format_score(87.12), "87.12");
        assert_eq!(format_score(74.5), "74.50");
        assert_eq!(format_score(0.0), "0");
    }

    #[test]
    fn test_format_carbon() {
        assert_eq!(format_carbon(20.5), "20.50 kg CO2");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Refuge", 20), "Refuge");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(truncate_name("Gîte des Hautes Fagnes", 10), "Gîte de...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Vercors", 3), "Ver");
    }

    #[test]
    fn test_format_scored_table_empty() {
        assert_eq!(format_scored_table(&[], false), "No recommendations found.");
    }

    #[test]
    fn test_format_scored_table_multiple() {
        let candidates = vec![sample_stay("EcoLodge", 20.0), sample_stay("Hotel Central", 80.0)];
        let result = format_scored_table(&candidates, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("EcoLodge"));
        assert!(lines[0].contains("eco 90"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("Hotel Central"));
    }

    #[test]
    fn test_format_tsv() {
        let candidates = vec![sample_stay("EcoLodge", 80.0)];
        assert_eq!(format_tsv(&candidates), "80\tEcoLodge\taccommodations");
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_breakdown() {
        let activity = score_activity(
            ResultRow::new()
                .with("activite", "Kayak")
                .with("impact", "Moyen"),
        );
        let result = format_breakdown(&activity, false);
        assert!(result.starts_with("Kayak"));
        assert!(result.contains("  impact: Moyen"));
        assert!(result.contains("  impact_score = 60"));
        // 60*0.4 + 50*0.3 + 50*0.3
        assert!(result.contains("  final_score = 54"));
    }

    #[test]
    fn test_format_comparison() {
        let comparisons = vec![
            EntityComparison {
                entity: "EcoLodge".to_string(),
                matches: vec![sample_stay("EcoLodge", 20.0)],
            },
            EntityComparison {
                entity: "Atlantide".to_string(),
                matches: vec![],
            },
        ];
        let result = format_comparison(&comparisons, false);
        assert!(result.starts_with("EcoLodge (1)\n 1."));
        assert!(result.contains("Atlantide (0)\nNo recommendations found."));
    }
}
