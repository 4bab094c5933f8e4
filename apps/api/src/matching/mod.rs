// Job-description matching: the recruiter score and JD skill coverage.

pub mod extractor;
pub mod handlers;
pub mod jd_match;
pub mod prompts;
pub mod skills;

pub use jd_match::{match_job_description, MatchScore};
pub use skills::{
    extract_jd_skills, skill_coverage, JdSkill, SkillCoverage, StaticThesaurus, SynonymLookup,
};
