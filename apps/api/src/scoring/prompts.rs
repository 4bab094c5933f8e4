// Prompt construction for the rubric evaluation. The schema the prompt imposes is
// the contract `reconciler::reconcile` reads back.

use crate::oracle::prompts::{JSON_ONLY_INSTRUCTION, NO_HALLUCINATION_INSTRUCTION};
use crate::scoring::rubric::{Category, RubricVariant};

const EVALUATION_PREAMBLE: &str = "\
You are the resume evaluation engine of an applicant tracking system.
Score each category below from 0 to 100.";

fn guideline(category: Category) -> &'static str {
    match category {
        Category::Skills => {
            "Breadth, depth and alignment with target roles. Reward a wide set of relevant, \
             in-demand skills."
        }
        Category::Experience => {
            "Relevance, impact, complexity, progression and concrete accomplishments. \
             Weigh internships by the selectivity of the organization, responsibility and \
             delivered impact."
        }
        Category::ProjectsQuality => {
            "Technical challenge, real-world impact, originality, stack, scale and outcome. \
             Score generic coursework or vague projects low; score complex, innovative or \
             measurable projects high."
        }
        Category::Certifications => {
            "Globally recognized issuers and industry exams (AWS, Google, Microsoft, Oracle, \
             PMP, ISACA) score high; recognized advanced course tracks score mid; entry-level \
             or unaccredited certificates score low."
        }
        Category::Achievements => {
            "Quality of the achievement, position (winner, runner-up) and level \
             (international, national, state)."
        }
        Category::FormatScore | Category::GrammaticalScore => {
            "Provided by the system. Do NOT evaluate; copy the input value."
        }
    }
}

/// Builds the evaluation prompt for `variant`. Format and grammar scores are
/// passed through for the oracle to echo; they are never read back from it.
pub fn build_evaluation_prompt(
    variant: RubricVariant,
    resume_fields_json: &str,
    format_score: f64,
    grammatical_score: f64,
) -> String {
    let weights = variant.weights();
    let supplied = |category: Category| match category {
        Category::FormatScore => format_score,
        _ => grammatical_score,
    };
    let mut prompt = String::new();

    prompt.push_str(EVALUATION_PREAMBLE);
    prompt.push_str("\n\n### Scoring guidelines\n\n");
    for (i, &(category, _)) in weights.entries().iter().enumerate() {
        prompt.push_str(&format!("{}. {}: {}\n", i + 1, category, guideline(category)));
    }
    prompt.push('\n');
    prompt.push_str(NO_HALLUCINATION_INSTRUCTION);

    prompt.push_str("\n\n### Output schema\n\n{\n  \"scores\": {\n");
    for &(category, _) in weights.entries() {
        if category.is_system_supplied() {
            prompt.push_str(&format!("    \"{}\": {},\n", category, supplied(category)));
        } else {
            prompt.push_str(&format!(
                "    \"{}\": {{\"score\": X, \"comment\": \"...\"}},\n",
                category
            ));
        }
    }
    prompt.push_str("    \"weighted_total\": X\n  },\n");
    prompt.push_str("  \"evaluation\": \"Brief summary of key strengths and areas for improvement.\"\n}\n\n");

    prompt.push_str("### Weighted formula (round the result to an integer)\n\nweighted_total = ");
    let terms: Vec<String> = weights
        .entries()
        .iter()
        .map(|(category, weight)| format!("({category} * {weight})"))
        .collect();
    prompt.push_str(&terms.join(" + "));
    prompt.push_str("\n\nAlways use exactly these weights.\n\n");

    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt.push_str("\n\n### Resume content\n\n");
    prompt.push_str(resume_fields_json);
    prompt.push_str(&format!(
        "\n\nFormat_Score = {format_score}\nGrammatical_Score = {grammatical_score}\n"
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_variant_categories_and_weights() {
        let prompt = build_evaluation_prompt(
            RubricVariant::WithAchievements,
            "{\"Skills\": {}}",
            75.0,
            85.0,
        );
        assert!(prompt.contains("\"Achievements\": {\"score\": X"));
        assert!(prompt.contains("(Skills * 0.3)"));
        assert!(prompt.contains("(Achievements * 0.15)"));
        assert!(prompt.contains("(Grammatical_Score * 0.05)"));
        assert!(prompt.contains("\"Format_Score\": 75,"));
        assert!(prompt.contains("\"Grammatical_Score\": 85,"));
        assert!(!prompt.contains("\"Format_Score\": {\"score\""));
        assert!(prompt.contains("Grammatical_Score = 85"));
        assert!(prompt.contains("{\"Skills\": {}}"));
    }

    #[test]
    fn test_prompt_without_achievements_omits_category() {
        let prompt =
            build_evaluation_prompt(RubricVariant::WithoutAchievements, "{}", 60.0, 40.0);
        assert!(!prompt.contains("Achievements"));
        assert!(prompt.contains("(Certifications * 0.15)"));
    }
}
