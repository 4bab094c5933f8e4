//! Rubric variants: which categories the oracle evaluates and how they are weighted.
//!
//! Two incompatible rubrics are in use and both stay selectable. `WithAchievements`
//! scores five content categories and its weights sum to 1.10; `WithoutAchievements`
//! drops Achievements, moves Certifications to 0.15 and sums to 1.00.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scoring::composite::WeightTable;

/// Weight of the document analyzer's format score, shared by every variant.
pub const FORMAT_WEIGHT: f64 = 0.10;
/// Weight of the grammar score, shared by every variant.
pub const GRAMMAR_WEIGHT: f64 = 0.05;

/// A named sub-score. Serialized with the JSON key the oracle is asked to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Skills,
    Experience,
    #[serde(rename = "Projects_Quality")]
    ProjectsQuality,
    Certifications,
    Achievements,
    #[serde(rename = "Format_Score")]
    FormatScore,
    #[serde(rename = "Grammatical_Score")]
    GrammaticalScore,
}

impl Category {
    pub fn key(self) -> &'static str {
        match self {
            Category::Skills => "Skills",
            Category::Experience => "Experience",
            Category::ProjectsQuality => "Projects_Quality",
            Category::Certifications => "Certifications",
            Category::Achievements => "Achievements",
            Category::FormatScore => "Format_Score",
            Category::GrammaticalScore => "Grammatical_Score",
        }
    }

    /// Format and grammar are supplied by the system, never judged by the oracle.
    pub fn is_system_supplied(self) -> bool {
        matches!(self, Category::FormatScore | Category::GrammaticalScore)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricVariant {
    #[default]
    WithAchievements,
    WithoutAchievements,
}

impl RubricVariant {
    /// Categories the oracle is asked to evaluate, in prompt order.
    pub fn evaluated_categories(self) -> &'static [Category] {
        match self {
            RubricVariant::WithAchievements => &[
                Category::Skills,
                Category::Experience,
                Category::ProjectsQuality,
                Category::Certifications,
                Category::Achievements,
            ],
            RubricVariant::WithoutAchievements => &[
                Category::Skills,
                Category::Experience,
                Category::ProjectsQuality,
                Category::Certifications,
            ],
        }
    }

    fn content_weights(self) -> &'static [(Category, f64)] {
        match self {
            RubricVariant::WithAchievements => &[
                (Category::Skills, 0.30),
                (Category::Experience, 0.20),
                (Category::ProjectsQuality, 0.20),
                (Category::Certifications, 0.10),
                (Category::Achievements, 0.15),
            ],
            RubricVariant::WithoutAchievements => &[
                (Category::Skills, 0.30),
                (Category::Experience, 0.20),
                (Category::ProjectsQuality, 0.20),
                (Category::Certifications, 0.15),
            ],
        }
    }

    pub fn weights(self) -> WeightTable {
        let mut entries = self.content_weights().to_vec();
        entries.push((Category::FormatScore, FORMAT_WEIGHT));
        entries.push((Category::GrammaticalScore, GRAMMAR_WEIGHT));
        WeightTable::new(entries)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RubricVariant::WithAchievements => "with_achievements",
            RubricVariant::WithoutAchievements => "without_achievements",
        }
    }
}

impl fmt::Display for RubricVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RubricVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "with_achievements" | "five_category" => Ok(RubricVariant::WithAchievements),
            "without_achievements" | "four_category" => Ok(RubricVariant::WithoutAchievements),
            other => Err(format!(
                "unknown rubric variant '{other}' (expected with_achievements or without_achievements)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_of(table: &WeightTable, category: Category) -> Option<f64> {
        table
            .entries()
            .iter()
            .find(|(c, _)| *c == category)
            .map(|&(_, w)| w)
    }

    #[test]
    fn test_category_serializes_with_oracle_keys() {
        assert_eq!(
            serde_json::to_string(&Category::ProjectsQuality).unwrap(),
            "\"Projects_Quality\""
        );
        assert_eq!(
            serde_json::to_string(&Category::GrammaticalScore).unwrap(),
            "\"Grammatical_Score\""
        );
        for category in [Category::Skills, Category::FormatScore, Category::Achievements] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }

    #[test]
    fn test_with_achievements_table() {
        let weights = RubricVariant::WithAchievements.weights();
        assert_eq!(weights.entries().len(), 7);
        assert!((weights.total() - 1.10).abs() < 1e-9);
        assert_eq!(weight_of(&weights, Category::Certifications), Some(0.10));
    }

    #[test]
    fn test_without_achievements_table() {
        let weights = RubricVariant::WithoutAchievements.weights();
        assert_eq!(weights.entries().len(), 6);
        assert!((weights.total() - 1.0).abs() < 1e-9);
        assert_eq!(weight_of(&weights, Category::Certifications), Some(0.15));
        assert!(!RubricVariant::WithoutAchievements
            .evaluated_categories()
            .contains(&Category::Achievements));
    }

    #[test]
    fn test_system_categories_are_never_oracle_evaluated() {
        for variant in [RubricVariant::WithAchievements, RubricVariant::WithoutAchievements] {
            assert!(variant
                .evaluated_categories()
                .iter()
                .all(|c| !c.is_system_supplied()));
            assert_eq!(weight_of(&variant.weights(), Category::FormatScore), Some(FORMAT_WEIGHT));
            assert_eq!(
                weight_of(&variant.weights(), Category::GrammaticalScore),
                Some(GRAMMAR_WEIGHT)
            );
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(
            "with_achievements".parse::<RubricVariant>().unwrap(),
            RubricVariant::WithAchievements
        );
        assert_eq!(
            "Without-Achievements".parse::<RubricVariant>().unwrap(),
            RubricVariant::WithoutAchievements
        );
        assert_eq!(
            "four_category".parse::<RubricVariant>().unwrap(),
            RubricVariant::WithoutAchievements
        );
        assert!("three_category".parse::<RubricVariant>().is_err());
    }

    #[test]
    fn test_variant_serde_snake_case() {
        let v: RubricVariant = serde_json::from_str("\"without_achievements\"").unwrap();
        assert_eq!(v, RubricVariant::WithoutAchievements);
        assert_eq!(RubricVariant::default(), RubricVariant::WithAchievements);
    }
}
