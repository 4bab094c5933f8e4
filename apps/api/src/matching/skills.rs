//! JD skill extraction and resume skill coverage.
//!
//! The oracle extracts weighted skills from a job description; coverage against a
//! resume is computed locally, with synonyms supplied through `SynonymLookup` so
//! the thesaurus can be swapped without touching the scoring.

use std::collections::{BTreeSet, HashMap, HashSet};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::matching::prompts::build_skills_prompt;
use crate::oracle::{GenerationConfig, Oracle};
use crate::scoring::composite::round_half_up;
use crate::scoring::normalize::{clamp, score_from_value};
use crate::scoring::recovery::recover_json;
use crate::scoring::EvaluationError;

const MIN_WEIGHT: u8 = 1;
const MAX_WEIGHT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    #[serde(rename = "Non-Technical")]
    NonTechnical,
    Soft,
}

impl SkillCategory {
    fn parse_lenient(raw: &str) -> Self {
        match letters(raw).as_str() {
            "nontechnical" => SkillCategory::NonTechnical,
            "soft" | "softskill" => SkillCategory::Soft,
            _ => SkillCategory::Technical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillPriority {
    Mandatory,
    Preferred,
    Optional,
}

impl SkillPriority {
    fn parse_lenient(raw: &str) -> Self {
        match letters(raw).as_str() {
            "mandatory" | "required" => SkillPriority::Mandatory,
            "preferred" | "plus" | "nicetohave" => SkillPriority::Preferred,
            _ => SkillPriority::Optional,
        }
    }

    /// Weight used when the oracle gives none.
    fn default_weight(self) -> u8 {
        match self {
            SkillPriority::Mandatory => 5,
            SkillPriority::Preferred => 3,
            SkillPriority::Optional => 1,
        }
    }
}

fn letters(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdSkill {
    pub name: String,
    pub category: SkillCategory,
    pub priority: SkillPriority,
    /// 1–5.
    pub weight: u8,
}

pub async fn extract_jd_skills(
    oracle: &dyn Oracle,
    job_description: &str,
) -> Result<Vec<JdSkill>, EvaluationError> {
    if job_description.trim().is_empty() {
        return Err(EvaluationError::prompt("job description is empty"));
    }

    let prompt = build_skills_prompt(job_description.trim());
    let raw = oracle
        .complete(&prompt, &GenerationConfig::deterministic())
        .await?;

    let skills = interpret_skills(&raw)?;
    info!(count = skills.len(), "JD skills extracted");
    Ok(skills)
}

/// Reads `{"skills": [...]}`. Nameless entries are dropped, duplicate names keep
/// the first occurrence. Pure.
pub fn interpret_skills(raw: &str) -> Result<Vec<JdSkill>, EvaluationError> {
    let recovered = recover_json(raw)?;
    let entries = recovered
        .get("skills")
        .and_then(Value::as_array)
        .ok_or_else(|| EvaluationError::validation("skills"))?;

    let mut seen = HashSet::new();
    let mut skills = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(fields) = entry.as_object() else {
            debug!(?entry, "Skipping non-object skill entry");
            continue;
        };
        let Some(skill) = read_skill(fields) else {
            continue;
        };
        if seen.insert(normalize_term(&skill.name)) {
            skills.push(skill);
        }
    }
    Ok(skills)
}

fn read_skill(fields: &Map<String, Value>) -> Option<JdSkill> {
    let name = fields.get("name").and_then(Value::as_str)?.trim();
    if name.is_empty() {
        return None;
    }
    let category = fields
        .get("category")
        .and_then(Value::as_str)
        .map_or(SkillCategory::Technical, SkillCategory::parse_lenient);
    let priority = fields
        .get("priority")
        .and_then(Value::as_str)
        .map_or(SkillPriority::Optional, SkillPriority::parse_lenient);
    let weight = fields
        .get("weight")
        .and_then(|w| score_from_value(w).ok())
        .map_or(priority.default_weight(), |w| {
            clamp(round_half_up(w), f64::from(MIN_WEIGHT), f64::from(MAX_WEIGHT)) as u8
        });

    Some(JdSkill {
        name: name.to_string(),
        category,
        priority,
        weight,
    })
}

/// Lowercased, trimmed, inner whitespace collapsed.
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub trait SynonymLookup: Send + Sync {
    /// Every accepted spelling of `term`, normalized. Always contains the term itself.
    fn synonyms(&self, term: &str) -> BTreeSet<String>;
}

lazy_static! {
    static ref DEFAULT_ALIASES: Vec<Vec<&'static str>> = vec![
        vec!["javascript", "js", "ecmascript"],
        vec!["typescript", "ts"],
        vec!["react", "reactjs", "react.js"],
        vec!["vue", "vuejs", "vue.js"],
        vec!["angular", "angularjs"],
        vec!["node.js", "nodejs", "node"],
        vec!["next.js", "nextjs"],
        vec!["python", "python3"],
        vec!["golang", "go"],
        vec!["c++", "cpp"],
        vec!["c#", "csharp"],
        vec!["postgresql", "postgres"],
        vec!["mongodb", "mongo"],
        vec!["kubernetes", "k8s"],
        vec!["amazon web services", "aws"],
        vec!["google cloud platform", "gcp", "google cloud"],
        vec!["microsoft azure", "azure"],
        vec!["ci/cd", "continuous integration", "continuous delivery"],
        vec!["django rest framework", "drf"],
        vec!["rest api", "restful api", "rest apis", "rest"],
        vec!["machine learning", "ml"],
        vec!["artificial intelligence", "ai"],
        vec!["natural language processing", "nlp"],
        vec!["structured query language", "sql"],
        vec!["teamwork", "team collaboration", "collaboration"],
        vec!["communication", "communication skills"],
        vec!["problem solving", "problem-solving"],
        vec!["leadership", "team leadership"],
    ];
}

/// Synonym lookup over fixed alias groups.
#[derive(Debug, Clone)]
pub struct StaticThesaurus {
    groups: Vec<BTreeSet<String>>,
    index: HashMap<String, usize>,
}

impl StaticThesaurus {
    pub fn new<G, T>(groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut thesaurus = StaticThesaurus {
            groups: Vec::new(),
            index: HashMap::new(),
        };
        for group in groups {
            let group: BTreeSet<String> = group
                .into_iter()
                .map(|t| normalize_term(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect();
            if group.is_empty() {
                continue;
            }
            let id = thesaurus.groups.len();
            for term in &group {
                thesaurus.index.entry(term.clone()).or_insert(id);
            }
            thesaurus.groups.push(group);
        }
        thesaurus
    }
}

impl Default for StaticThesaurus {
    fn default() -> Self {
        Self::new(DEFAULT_ALIASES.iter().map(|g| g.iter().copied()))
    }
}

impl SynonymLookup for StaticThesaurus {
    fn synonyms(&self, term: &str) -> BTreeSet<String> {
        let term = normalize_term(term);
        let mut found = self
            .index
            .get(&term)
            .map(|&id| self.groups[id].clone())
            .unwrap_or_default();
        found.insert(term);
        found
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCoverage {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub missing_mandatory: Vec<String>,
    /// Matched weight over total weight, 0–100. 0 when there are no JD skills.
    pub coverage_percent: u32,
}

pub fn skill_coverage<'a, I>(
    jd_skills: &[JdSkill],
    resume_skills: I,
    lookup: &dyn SynonymLookup,
) -> SkillCoverage
where
    I: IntoIterator<Item = &'a str>,
{
    let held: HashSet<String> = resume_skills
        .into_iter()
        .flat_map(|s| lookup.synonyms(s))
        .collect();

    let mut coverage = SkillCoverage {
        matched: Vec::new(),
        missing: Vec::new(),
        missing_mandatory: Vec::new(),
        coverage_percent: 0,
    };
    let mut matched_weight = 0u32;
    let mut total_weight = 0u32;

    for skill in jd_skills {
        total_weight += u32::from(skill.weight);
        if lookup.synonyms(&skill.name).iter().any(|s| held.contains(s)) {
            matched_weight += u32::from(skill.weight);
            coverage.matched.push(skill.name.clone());
        } else {
            if skill.priority == SkillPriority::Mandatory {
                coverage.missing_mandatory.push(skill.name.clone());
            }
            coverage.missing.push(skill.name.clone());
        }
    }

    if total_weight > 0 {
        let percent = f64::from(matched_weight) * 100.0 / f64::from(total_weight);
        coverage.coverage_percent = clamp(round_half_up(percent), 0.0, 100.0) as u32;
    }
    coverage
}
