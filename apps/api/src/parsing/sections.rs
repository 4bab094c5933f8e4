use std::fmt;

use serde::{Deserialize, Serialize};

/// Quality sections judged during the parse step. Maxima sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MiscSection {
    #[serde(rename = "Section Headings")]
    SectionHeadings,
    #[serde(rename = "ATS Parse Rate")]
    AtsParseRate,
    #[serde(rename = "Repetition")]
    Repetition,
    #[serde(rename = "Grammar and Language")]
    GrammarAndLanguage,
    #[serde(rename = "Buzzwords")]
    Buzzwords,
    #[serde(rename = "Active Voice")]
    ActiveVoice,
}

impl MiscSection {
    pub const ALL: [MiscSection; 6] = [
        MiscSection::SectionHeadings,
        MiscSection::AtsParseRate,
        MiscSection::Repetition,
        MiscSection::GrammarAndLanguage,
        MiscSection::Buzzwords,
        MiscSection::ActiveVoice,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MiscSection::SectionHeadings => "Section Headings",
            MiscSection::AtsParseRate => "ATS Parse Rate",
            MiscSection::Repetition => "Repetition",
            MiscSection::GrammarAndLanguage => "Grammar and Language",
            MiscSection::Buzzwords => "Buzzwords",
            MiscSection::ActiveVoice => "Active Voice",
        }
    }

    pub fn max_points(self) -> u32 {
        match self {
            MiscSection::SectionHeadings => 15,
            MiscSection::AtsParseRate => 25,
            MiscSection::Repetition => 10,
            MiscSection::GrammarAndLanguage => 15,
            MiscSection::Buzzwords => 20,
            MiscSection::ActiveVoice => 15,
        }
    }
}

impl fmt::Display for MiscSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
