// Prompt for the resume parse step: structured extraction plus six quality
// sections. `resume_parser::interpret_parse` reads the schema back.

use crate::oracle::prompts::{JSON_ONLY_INSTRUCTION, NO_HALLUCINATION_INSTRUCTION};
use crate::parsing::sections::MiscSection;

const PARSE_PREAMBLE: &str = "\
You are a deterministic resume parser and evaluator. Extract the resume into the \
exact JSON structure below and score it with strict, repeatable rules. The same \
input must always produce the same output.";

const EXTRACTION_SCHEMA: &str = r#"{
  "Contact Information": {
    "name": "...",
    "email": "...",
    "phone": "...",
    "linkedin": "...",
    "location": "..."
  },
  "Summary": "1-3 sentence summary or null",
  "Education": [
    {"institution": "...", "degree": "...", "department": "...", "cgpa": "... or null", "year_of_completion": "year or null"}
  ],
  "Skills": {"Languages": ["..."], "Technologies": ["..."], "Core": ["..."]},
  "Certifications": ["..."],
  "Projects": [{"title": "...", "date": "... or null", "details": ["..."]}],
  "Work Experience": [
    {"role": "...", "organization": "...", "location": "... or null", "date": "...", "responsibilities": ["..."]}
  ],
  "Achievements": ["..."]
}
Use null for missing scalar values and [] for missing lists."#;

fn section_rubric(section: MiscSection) -> &'static str {
    match section {
        MiscSection::SectionHeadings => {
            "15 = all standard sections with exact headers; 12 = one non-standard header; \
             9 = two non-standard headers; 6 = one required section missing; \
             3 = two missing; 0 = three or more missing."
        }
        MiscSection::AtsParseRate => {
            "25 = single column, no tables or graphics; 20 = minor spacing issues; \
             15 = non-standard fonts or one or two images; 10 = single-column tables; \
             5 = multi-column layout; 0 = graphics or tables make text unparsable."
        }
        MiscSection::Repetition => {
            "Count only these action verbs in bullet points, tenses merged: managed, led, \
             developed, created, implemented, designed, improved, increased, reduced, \
             optimized, coordinated, facilitated, performed, achieved, built. \
             10 = none repeated; 8 = 1-2 repeated twice; 6 = 3-4 repeated twice; \
             4 = 5-6 repeated twice or one repeated 3+ times; 2 = 7-8 repeated twice or \
             two repeated 3+ times; 0 = 9+ repeated or three repeated 3+ times."
        }
        MiscSection::GrammarAndLanguage => {
            "15 = flawless grammar and consistent tense; 12 = 1-2 minor errors; \
             9 = 3-4 errors or one tense inconsistency; 6 = 5 errors or two tense \
             inconsistencies; 3 = 6+ errors; 0 = unreadable."
        }
        MiscSection::Buzzwords => {
            "Penalized buzzwords: team player, go-getter, self-starter, passionate. A \
             buzzword is supported only if directly followed by a measurable outcome. \
             20 = all supported; 15 = one unsupported; 10 = two; 5 = three; 0 = four or more."
        }
        MiscSection::ActiveVoice => {
            "Passive voice matches (was|were|been|being) \\w+ed. 15 = 90%+ active; \
             12 = 80-89%; 9 = 70-79%; 6 = 60-69%; 3 = 50-59%; 0 = below 50%."
        }
    }
}

pub fn build_parse_prompt(resume_text: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(PARSE_PREAMBLE);
    prompt.push_str("\n\n### Step 1: Extraction\n\n");
    prompt.push_str(EXTRACTION_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(NO_HALLUCINATION_INSTRUCTION);

    prompt.push_str("\n\n### Step 2: Quality sections (round every score down)\n\n");
    for (i, section) in MiscSection::ALL.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} ({} pts): {}\n",
            i + 1,
            section,
            section.max_points(),
            section_rubric(*section)
        ));
    }

    prompt.push_str("\n### Output schema\n\n{\n  \"Extracted Data\": { ... },\n  \"Miscellaneous Score\": {\n");
    let lines: Vec<String> = MiscSection::ALL
        .iter()
        .map(|s| format!("    \"{s}\": {{\"score\": X, \"feedback\": \"...\"}}"))
        .collect();
    prompt.push_str(&lines.join(",\n"));
    prompt.push_str(
        "\n  },\n  \"Total Score\": sum of the six section scores, capped at 100, or null if it cannot be computed\n}\n\n",
    );

    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt.push_str("\n\n### Resume\n\n");
    prompt.push_str(resume_text);
    prompt.push('\n');
    prompt
}
