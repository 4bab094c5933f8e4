//! Resume evaluation reconciler.
//!
//! The oracle judges the content categories; everything numeric after that is
//! re-derived here. Sub-scores are clamped, the system-supplied format and
//! grammar scores come from the caller, and `weighted_total` is recomputed with
//! the rubric's weight table. The oracle's own total is never trusted.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::oracle::{GenerationConfig, Oracle};
use crate::scoring::composite::{composite, CompositeError};
use crate::scoring::error::EvaluationError;
use crate::scoring::normalize::{clamp_score, score_from_value};
use crate::scoring::prompts::build_evaluation_prompt;
use crate::scoring::recovery::recover_json;
use crate::scoring::rubric::{Category, RubricVariant};

const FORMAT_COMMENT: &str = "Format score supplied by the system.";
const GRAMMAR_COMMENT: &str = "Grammar score supplied by the system.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScore {
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    pub comment: String,
}

/// Whole scores serialize as integers (`80`, not `80.0`).
fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if score.fract() == 0.0 {
        serializer.serialize_u64(*score as u64)
    } else {
        serializer.serialize_f64(*score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSheet {
    #[serde(flatten)]
    pub categories: BTreeMap<Category, SubScore>,
    /// Always the locally recomputed composite.
    pub weighted_total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub rubric: RubricVariant,
    pub scores: ScoreSheet,
    /// The oracle's narrative summary, passed through verbatim.
    pub evaluation: String,
}

impl EvaluationResult {
    pub fn weighted_total(&self) -> u32 {
        self.scores.weighted_total
    }
}

/// Runs one rubric evaluation: prompt, one deterministic oracle call, reconcile.
pub async fn evaluate<F>(
    oracle: &dyn Oracle,
    resume_fields: &F,
    format_score: f64,
    grammatical_score: f64,
    variant: RubricVariant,
) -> Result<EvaluationResult, EvaluationError>
where
    F: Serialize + ?Sized,
{
    let fields_json = serde_json::to_string_pretty(resume_fields)
        .map_err(|e| EvaluationError::prompt(format!("resume fields are not serializable: {e}")))?;

    let prompt = build_evaluation_prompt(
        variant,
        &fields_json,
        clamp_score(format_score),
        clamp_score(grammatical_score),
    );

    info!(rubric = %variant, "Requesting rubric evaluation");
    let raw = oracle
        .complete(&prompt, &GenerationConfig::deterministic())
        .await?;

    let result = reconcile(&raw, format_score, grammatical_score, variant)?;
    info!(
        rubric = %variant,
        weighted_total = result.weighted_total(),
        "Evaluation reconciled"
    );
    Ok(result)
}

/// Turns a raw oracle response into an authoritative result. Pure.
pub fn reconcile(
    raw: &str,
    format_score: f64,
    grammatical_score: f64,
    variant: RubricVariant,
) -> Result<EvaluationResult, EvaluationError> {
    let recovered = recover_json(raw)?;

    let scores = recovered
        .get("scores")
        .and_then(Value::as_object)
        .ok_or_else(|| EvaluationError::validation("scores"))?;

    let mut categories = BTreeMap::new();
    for &category in variant.evaluated_categories() {
        let sub_score = read_sub_score(scores, category)?;
        categories.insert(category, sub_score);
    }
    categories.insert(
        Category::FormatScore,
        SubScore {
            score: clamp_score(format_score),
            comment: FORMAT_COMMENT.to_string(),
        },
    );
    categories.insert(
        Category::GrammaticalScore,
        SubScore {
            score: clamp_score(grammatical_score),
            comment: GRAMMAR_COMMENT.to_string(),
        },
    );

    let numeric: BTreeMap<Category, f64> =
        categories.iter().map(|(&c, s)| (c, s.score)).collect();
    let weighted_total = composite(&numeric, &variant.weights())
        .map_err(|CompositeError::MissingField(c)| EvaluationError::validation(c.key()))?;

    if let Some(reported) = scores.get("weighted_total").and_then(Value::as_f64) {
        if (reported - f64::from(weighted_total)).abs() >= 0.5 {
            warn!(
                oracle_total = reported,
                weighted_total, "Oracle weighted_total disagrees with recomputed total; overwriting"
            );
        }
    }

    let evaluation = recovered
        .get("evaluation")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(EvaluationResult {
        rubric: variant,
        scores: ScoreSheet {
            categories,
            weighted_total,
        },
        evaluation,
    })
}

/// Reads `{ "score": n, "comment": "..." }`; a bare number is accepted as the score.
fn read_sub_score(
    scores: &Map<String, Value>,
    category: Category,
) -> Result<SubScore, EvaluationError> {
    let entry = scores
        .get(category.key())
        .ok_or_else(|| EvaluationError::validation(category.key()))?;

    let (score_value, comment) = match entry {
        Value::Object(fields) => {
            let score = fields
                .get("score")
                .ok_or_else(|| EvaluationError::validation(format!("{category}.score")))?;
            let comment = fields
                .get("comment")
                .and_then(Value::as_str)
                .unwrap_or_default();
            (score, comment)
        }
        other => (other, ""),
    };

    let score = score_from_value(score_value)
        .map_err(|e| EvaluationError::validation(format!("{category}.score: {e}")))?;

    Ok(SubScore {
        score: clamp_score(score),
        comment: comment.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::ScriptedOracle;
    use crate::scoring::error::Stage;
    use serde_json::json;

    fn score_of(result: &EvaluationResult, category: Category) -> Option<f64> {
        result.scores.categories.get(&category).map(|s| s.score)
    }

    fn oracle_value(weighted_total: u32) -> Value {
        json!({
            "scores": {
                "Skills": {"score": 80, "comment": "Broad modern stack"},
                "Experience": {"score": 70, "comment": "Two relevant internships"},
                "Projects_Quality": {"score": 90, "comment": "Production-scale projects"},
                "Certifications": {"score": 60, "comment": "One cloud cert"},
                "Achievements": {"score": 50, "comment": "State-level hackathon"},
                "Format_Score": 75,
                "Grammatical_Score": 85,
                "weighted_total": weighted_total
            },
            "evaluation": "Strong projects; certifications could be stronger."
        })
    }

    fn oracle_json(weighted_total: u32) -> String {
        oracle_value(weighted_total).to_string()
    }

    #[test]
    fn test_reference_scenario_recomputes_81() {
        let result = reconcile(&oracle_json(81), 75.0, 85.0, RubricVariant::WithAchievements)
            .unwrap();
        assert_eq!(result.weighted_total(), 81);
        assert_eq!(score_of(&result, Category::ProjectsQuality), Some(90.0));
        assert_eq!(
            result.evaluation,
            "Strong projects; certifications could be stronger."
        );
    }

    #[test]
    fn test_oracle_total_is_overwritten() {
        let result = reconcile(&oracle_json(97), 75.0, 85.0, RubricVariant::WithAchievements)
            .unwrap();
        assert_eq!(result.weighted_total(), 81);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["scores"]["weighted_total"], 81);
    }

    #[test]
    fn test_missing_skills_fails_whole_evaluation() {
        let raw = json!({
            "scores": {
                "Experience": {"score": 70, "comment": ""},
                "Projects_Quality": {"score": 90, "comment": ""},
                "Certifications": {"score": 60, "comment": ""},
                "Achievements": {"score": 50, "comment": ""},
                "weighted_total": 60
            },
            "evaluation": "n/a"
        })
        .to_string();
        let err = reconcile(&raw, 75.0, 85.0, RubricVariant::WithAchievements).unwrap_err();
        match err {
            EvaluationError::Failed { stage, detail, .. } => {
                assert_eq!(stage, Stage::Validation);
                assert_eq!(detail, "Skills");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_scores_object_is_validation_failure() {
        let err = reconcile(r#"{"evaluation": "x"}"#, 0.0, 0.0, RubricVariant::default())
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Validation);
        assert!(err.to_string().ends_with("scores"));
    }

    #[test]
    fn test_non_numeric_score_is_validation_failure() {
        let mut value = oracle_value(81);
        value["scores"]["Skills"]["score"] = json!("eighty");
        let raw = value.to_string();
        let err = reconcile(&raw, 75.0, 85.0, RubricVariant::WithAchievements).unwrap_err();
        assert_eq!(err.stage(), Stage::Validation);
        assert!(err.to_string().contains("Skills.score"));
    }

    #[test]
    fn test_garbage_fails_at_recovery_with_raw_text() {
        let err = reconcile("I cannot score this resume.", 75.0, 85.0, RubricVariant::default())
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Recovery);
        assert_eq!(err.raw_response(), Some("I cannot score this resume."));
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let mut value = oracle_value(81);
        value["scores"]["Skills"]["score"] = json!(130);
        value["scores"]["Achievements"]["score"] = json!(-20);
        let raw = value.to_string();
        let result = reconcile(&raw, 150.0, -5.0, RubricVariant::WithAchievements).unwrap();
        assert_eq!(score_of(&result, Category::Skills), Some(100.0));
        assert_eq!(score_of(&result, Category::Achievements), Some(0.0));
        assert_eq!(score_of(&result, Category::FormatScore), Some(100.0));
        assert_eq!(score_of(&result, Category::GrammaticalScore), Some(0.0));
        // 30 + 14 + 18 + 6 + 0 + 10 + 0 = 78
        assert_eq!(result.weighted_total(), 78);
    }

    #[test]
    fn test_system_scores_come_from_inputs_not_oracle() {
        // Oracle echoes 75/85, caller supplied 40/20.
        let result = reconcile(&oracle_json(81), 40.0, 20.0, RubricVariant::WithAchievements)
            .unwrap();
        assert_eq!(score_of(&result, Category::FormatScore), Some(40.0));
        assert_eq!(score_of(&result, Category::GrammaticalScore), Some(20.0));
        let categories = &result.scores.categories;
        assert_eq!(
            categories[&Category::FormatScore].comment,
            "Format score supplied by the system."
        );
        assert_eq!(
            categories[&Category::GrammaticalScore].comment,
            "Grammar score supplied by the system."
        );
        // 24 + 14 + 18 + 6 + 7.5 + 4 + 1 = 74.5
        assert_eq!(result.weighted_total(), 75);
    }

    #[test]
    fn test_without_achievements_ignores_achievements() {
        let raw = json!({
            "scores": {
                "Skills": {"score": 80, "comment": ""},
                "Experience": {"score": 70, "comment": ""},
                "Projects_Quality": {"score": 90, "comment": ""},
                "Certifications": {"score": 60, "comment": ""}
            },
            "evaluation": ""
        })
        .to_string();
        let result = reconcile(&raw, 75.0, 85.0, RubricVariant::WithoutAchievements).unwrap();
        assert_eq!(result.weighted_total(), 77);
        assert!(score_of(&result, Category::Achievements).is_none());
    }

    #[test]
    fn test_bare_number_sub_score_and_missing_comment() {
        let mut value = oracle_value(81);
        value["scores"]["Skills"] = json!(80);
        value["scores"]["Experience"] = json!({"score": 70});
        let raw = value.to_string();
        let result = reconcile(&raw, 75.0, 85.0, RubricVariant::WithAchievements).unwrap();
        assert_eq!(score_of(&result, Category::Skills), Some(80.0));
        assert_eq!(result.scores.categories[&Category::Experience].comment, "");
    }

    #[test]
    fn test_missing_evaluation_summary_is_empty() {
        let mut value = oracle_value(81);
        value.as_object_mut().unwrap().remove("evaluation");
        let raw = value.to_string();
        let result = reconcile(&raw, 75.0, 85.0, RubricVariant::WithAchievements).unwrap();
        assert_eq!(result.evaluation, "");
    }

    #[test]
    fn test_output_schema_shape() {
        let result = reconcile(&oracle_json(81), 75.0, 85.0, RubricVariant::WithAchievements)
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["scores"]["Skills"]["score"], 80);
        assert_eq!(json["scores"]["Skills"]["comment"], "Broad modern stack");
        assert_eq!(json["scores"]["Format_Score"]["score"], 75);
        assert_eq!(json["scores"]["Grammatical_Score"]["score"], 85);
        assert_eq!(json["rubric"], "with_achievements");
        assert!(json["evaluation"].is_string());
    }

    #[tokio::test]
    async fn test_evaluate_uses_deterministic_generation() {
        let fenced = format!("Here you go:\n```json\n{}\n```", oracle_json(12));
        let oracle = ScriptedOracle::replying(&[fenced.as_str()]);
        let fields = json!({"Skills": {"Languages": ["Rust"]}});

        let result = evaluate(&oracle, &fields, 75.0, 85.0, RubricVariant::WithAchievements)
            .await
            .unwrap();

        assert_eq!(result.weighted_total(), 81);
        assert_eq!(oracle.call_count(), 1);
        assert_eq!(
            oracle.configs.lock().unwrap()[0],
            GenerationConfig::deterministic()
        );
        let prompts = oracle.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("\"Rust\""));
        assert!(prompt.contains("Format_Score = 75"));
    }

    #[tokio::test]
    async fn test_evaluate_surfaces_oracle_unavailable() {
        let oracle = ScriptedOracle::unavailable();
        let err = evaluate(&oracle, &json!({}), 50.0, 50.0, RubricVariant::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::OracleUnavailable(_)));
        assert_eq!(err.stage(), Stage::Oracle);
    }

    #[tokio::test]
    async fn test_evaluate_clamps_prompt_inputs() {
        let oracle = ScriptedOracle::replying(&[oracle_json(0).as_str()]);
        evaluate(&oracle, &json!({}), 180.0, -3.0, RubricVariant::default())
            .await
            .unwrap();
        let prompts = oracle.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("Format_Score = 100"));
        assert!(prompt.contains("Grammatical_Score = 0"));
    }
}
