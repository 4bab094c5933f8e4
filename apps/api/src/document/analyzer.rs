//! Deterministic format scoring of an extracted resume.
//!
//! Three components, summing to at most 100:
//! - font style (30): any preferred font family present, else 10
//! - bullet length (30): penalized once more than a third of lines are long bullets
//! - word count (40): full marks inside the configured range, scaled down outside it

use std::collections::BTreeSet;

use serde::Serialize;

const FONT_POINTS: u32 = 30;
const FALLBACK_FONT_POINTS: u32 = 10;
const BULLET_POINTS: u32 = 30;
const WORD_POINTS: u32 = 40;
const MIN_WORD_POINTS: u32 = 10;

const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

const PREFERRED_FONTS: [&str; 12] = [
    "Times-Roman",
    "Times New Roman",
    "Helvetica",
    "Arial",
    "Calibri",
    "Cambria",
    "Georgia",
    "Garamond",
    "Verdana",
    "Roboto",
    "Lato",
    "Open Sans",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Bullets with more words than this count as long.
    pub bullet_word_threshold: usize,
    pub word_count_min: usize,
    pub word_count_max: usize,
    pub preferred_fonts: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            bullet_word_threshold: 15,
            word_count_min: 500,
            word_count_max: 600,
            preferred_fonts: PREFERRED_FONTS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub lines: usize,
    pub words: usize,
    pub long_bullets: usize,
    pub fonts: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    pub font_score: u32,
    pub bullet_score: u32,
    pub word_score: u32,
    /// Sum of the three components, 0–100.
    pub total: u32,
    pub stats: DocumentStats,
}

/// Counts non-empty lines, words and long bullet lines.
pub fn collect_stats(text: &str, fonts: BTreeSet<String>, bullet_threshold: usize) -> DocumentStats {
    let mut stats = DocumentStats {
        fonts,
        ..DocumentStats::default()
    };

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let words = line.split_whitespace().count();
        stats.lines += 1;
        stats.words += words;
        if line.starts_with(BULLET_MARKERS) && words > bullet_threshold {
            stats.long_bullets += 1;
        }
    }

    stats
}

pub fn score_format(stats: &DocumentStats, config: &AnalyzerConfig) -> FormatReport {
    let font_score = if has_preferred_font(&stats.fonts, &config.preferred_fonts) {
        FONT_POINTS
    } else {
        FALLBACK_FONT_POINTS
    };
    let bullet_score = bullet_score(stats.long_bullets, stats.lines);
    let word_score = word_score(stats.words, config.word_count_min, config.word_count_max);

    FormatReport {
        font_score,
        bullet_score,
        word_score,
        total: font_score + bullet_score + word_score,
        stats: stats.clone(),
    }
}

fn bullet_score(long_bullets: usize, lines: usize) -> u32 {
    // ratio <= 1/3, kept in integers
    if lines == 0 || long_bullets * 3 <= lines {
        return BULLET_POINTS;
    }
    let ratio = long_bullets as f64 / lines as f64;
    (BULLET_POINTS as f64 * (1.0 - ratio)).max(0.0) as u32
}

fn word_score(words: usize, min: usize, max: usize) -> u32 {
    if (min..=max).contains(&words) {
        return WORD_POINTS;
    }
    let scaled = if words < min {
        WORD_POINTS as f64 * (words as f64 / min as f64)
    } else {
        WORD_POINTS as f64 * (max as f64 / words as f64)
    };
    (scaled as u32).max(MIN_WORD_POINTS)
}

fn has_preferred_font(fonts: &BTreeSet<String>, preferred: &[String]) -> bool {
    let preferred: Vec<String> = preferred.iter().map(|p| font_key(p)).collect();
    fonts.iter().any(|font| {
        let key = font_key(strip_subset_prefix(font));
        preferred.iter().any(|p| !p.is_empty() && key.starts_with(p.as_str()))
    })
}

/// Embedded subsets are named `ABCDEF+Family`; the tag is dropped.
pub fn strip_subset_prefix(font: &str) -> &str {
    match font.split_once('+') {
        Some((tag, family)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => {
            family
        }
        _ => font,
    }
}

fn font_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fonts(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn stats(lines: usize, words: usize, long_bullets: usize, font_names: &[&str]) -> DocumentStats {
        DocumentStats {
            lines,
            words,
            long_bullets,
            fonts: fonts(font_names),
        }
    }

    #[test]
    fn test_collect_stats_counts_lines_words_and_long_bullets() {
        let text = "Jane Doe\n\n  Experience  \n- Built a thing\n• one two three four five six\n* short";
        let s = collect_stats(text, BTreeSet::new(), 4);
        assert_eq!(s.lines, 5);
        assert_eq!(s.words, 2 + 1 + 4 + 7 + 2);
        assert_eq!(s.long_bullets, 1);
    }

    #[test]
    fn test_collect_stats_threshold_is_exclusive() {
        let s = collect_stats("- a b c", BTreeSet::new(), 4);
        assert_eq!(s.long_bullets, 0);
        let s = collect_stats("- a b c d", BTreeSet::new(), 4);
        assert_eq!(s.long_bullets, 1);
    }

    #[test]
    fn test_perfect_document_scores_100() {
        let report = score_format(&stats(60, 550, 5, &["Calibri"]), &AnalyzerConfig::default());
        assert_eq!(report.font_score, 30);
        assert_eq!(report.bullet_score, 30);
        assert_eq!(report.word_score, 40);
        assert_eq!(report.total, 100);
    }

    #[test]
    fn test_unknown_font_scores_10() {
        let report = score_format(&stats(10, 500, 0, &["ComicSans"]), &AnalyzerConfig::default());
        assert_eq!(report.font_score, 10);
        let report = score_format(&stats(10, 500, 0, &[]), &AnalyzerConfig::default());
        assert_eq!(report.font_score, 10);
    }

    #[test]
    fn test_font_family_matching() {
        let config = AnalyzerConfig::default();
        for name in ["ArialMT", "Calibri-Bold", "ABCDEF+TimesNewRomanPSMT", "OpenSans-Regular"] {
            let report = score_format(&stats(1, 500, 0, &[name]), &config);
            assert_eq!(report.font_score, 30, "{name} should match");
        }
    }

    #[test]
    fn test_strip_subset_prefix() {
        assert_eq!(strip_subset_prefix("ABCDEF+Arial"), "Arial");
        assert_eq!(strip_subset_prefix("Arial"), "Arial");
        assert_eq!(strip_subset_prefix("abc+Arial"), "abc+Arial");
    }

    #[test]
    fn test_bullet_ratio_boundary() {
        assert_eq!(bullet_score(1, 3), 30);
        // 2/4 → 30 * 0.5
        assert_eq!(bullet_score(2, 4), 15);
        assert_eq!(bullet_score(4, 4), 0);
        assert_eq!(bullet_score(0, 0), 30);
    }

    #[test]
    fn test_word_score_scaling() {
        assert_eq!(word_score(500, 500, 600), 40);
        assert_eq!(word_score(600, 500, 600), 40);
        assert_eq!(word_score(250, 500, 600), 20);
        assert_eq!(word_score(1200, 500, 600), 20);
        assert_eq!(word_score(50, 500, 600), 10);
        assert_eq!(word_score(0, 500, 600), 10);
        assert_eq!(word_score(6000, 500, 600), 10);
    }
}
