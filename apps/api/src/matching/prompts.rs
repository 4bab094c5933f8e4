// Prompts for job-description matching: the recruiter score (bare number) and
// JD skill extraction (JSON).

use crate::oracle::prompts::{JSON_ONLY_INSTRUCTION, NUMBER_ONLY_INSTRUCTION};

const MATCH_RUBRIC: &str = "\
You are an expert technical recruiter. Score this candidate from 0 to 100 against the \
job description. The same resume and job description must always receive the same score.

Follow these steps exactly and never change the weights:

STEP 1. Identify the job description's skills and label each Mandatory, Preferred or \
Optional. Normalize names (React = ReactJS).

STEP 2. Skills matching:
- +5 for each Mandatory skill the candidate has
- +3 for each Preferred skill the candidate has
- +1 for each Optional skill, or extra relevant skill not in the job description
- -2 for each Mandatory skill the candidate is missing

STEP 3. Experience and projects:
- +10 for each work experience entry that uses a required skill
- +5 for each project that uses a required skill
- -5 for each experience or project unrelated to the job description
Skills listed only in the Skills section count as used, credited evenly across entries.

STEP 4. General relevance: 0 to 10 for clarity, leadership, teamwork, problem solving \
and overall fit.

STEP 5. Start from 0, add steps 2 to 4, cap between 0 and 100, round to the nearest \
whole number.";

const SKILLS_RUBRIC: &str = "\
Extract ALL relevant skills from the job description below.

1. Include technical, non-technical and soft skills, stated or clearly implied \
(\"integrate APIs\" = \"REST API Integration\"). Expand acronyms and singularize \
(\"DRF\" = \"Django REST Framework\", \"APIs\" = \"API\").
2. Merge near-duplicates (\"React\" and \"ReactJS\") under the most standard name.
3. Label each skill's category: Technical, Non-Technical or Soft.
4. Label each skill's priority: Mandatory (required, must-have, essential, or repeated), \
Preferred (preferred, plus, nice-to-have) or Optional (mentioned in passing).
5. Weight each skill 1 to 5: 5 core and mandatory, 4 strongly preferred, 3 useful, \
2 nice-to-have, 1 bonus. Boost skills under responsibilities, required skills or tech \
stack headings; lower generic soft skills unless emphasized.

Output schema:
{\"skills\": [{\"name\": \"Skill Name\", \"category\": \"Technical\", \"priority\": \"Mandatory\", \"weight\": 5}]}";

pub fn build_match_prompt(job_description: &str, resume_fields_json: &str) -> String {
    format!(
        "{MATCH_RUBRIC}\n\n{NUMBER_ONLY_INSTRUCTION}\n\nJob Description:\n{job_description}\n\nCandidate Resume (JSON):\n{resume_fields_json}\n"
    )
}

pub fn build_skills_prompt(job_description: &str) -> String {
    format!("{SKILLS_RUBRIC}\n\n{JSON_ONLY_INSTRUCTION}\n\nJob Description:\n{job_description}\n")
}
