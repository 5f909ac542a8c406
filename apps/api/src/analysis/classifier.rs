//! Field Classifier & Scorer: keyword skill extraction, field prediction,
//! skill recommendations and the section-heading writing score.
//!
//! Pure and synchronous: works on already-extracted text plus the tables it
//! is given, does no I/O and has no failure modes. Empty text takes the
//! fallback path (no skills, `Undetermined`, score 0).

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use serde::Serialize;

use crate::analysis::keywords::{
    ClassifierTables, Domain, KeywordSet, Recommendations, SectionGroup, SectionWeights,
    TablesError,
};

/// Keyword count per field. Empty when no field scored anything.
pub type FieldTally = BTreeMap<Domain, u32>;

/// Everything the classifier derives from one resume text.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub matched_skills: BTreeSet<String>,
    pub predicted_field: Domain,
    pub field_tally: FieldTally,
    pub recommended_skills: Vec<String>,
    pub writing_score: u32,
    pub max_writing_score: u32,
    pub detected_sections: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skill extraction
// ────────────────────────────────────────────────────────────────────────────

/// Compiled whole-word patterns for every keyword in a `KeywordSet`.
///
/// Build once per table set; `extract_skills` is then a single pass per
/// keyword over the lowercased text.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    patterns: Vec<(String, Regex)>,
}

impl SkillMatcher {
    pub fn new(keywords: &KeywordSet) -> Result<Self, regex::Error> {
        let mut patterns: Vec<(String, Regex)> = Vec::new();
        for keyword in keywords.all_keywords() {
            let keyword = keyword.to_lowercase();
            if keyword.is_empty() || patterns.iter().any(|(k, _)| *k == keyword) {
                continue;
            }
            let regex = Regex::new(&whole_word_pattern(&keyword))?;
            patterns.push((keyword, regex));
        }
        Ok(Self { patterns })
    }

    /// Keywords that occur in `text` as whole words, ignoring case.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        if text.trim().is_empty() {
            return BTreeSet::new();
        }
        let haystack = text.to_lowercase();
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(&haystack))
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only works next to a word character, so keywords that start or end
/// with punctuation (".net", "c++") get an explicit non-word-or-edge guard.
fn whole_word_pattern(keyword: &str) -> String {
    let head = match keyword.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:^|\W)",
    };
    let tail = match keyword.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:\W|$)",
    };
    format!("{head}{}{tail}", regex::escape(keyword))
}

// ────────────────────────────────────────────────────────────────────────────
// Field classification
// ────────────────────────────────────────────────────────────────────────────

/// Counts matched skills per field and picks the field with the highest count.
///
/// A skill listed under two fields counts for both. Ties go to the field
/// declared first in `Domain` (Data Science, Web, Android, iOS, UI/UX).
/// If nothing scored, returns `Undetermined` with an empty tally.
pub fn classify_domain(
    matched: &BTreeSet<String>,
    keywords: &KeywordSet,
) -> (Domain, FieldTally) {
    let mut tally = FieldTally::new();
    for domain in Domain::FIELDS {
        let list = keywords.domain_keywords(domain);
        let count = matched
            .iter()
            .filter(|skill| {
                let skill = skill.to_lowercase();
                list.iter().any(|k| *k == skill)
            })
            .count() as u32;
        tally.insert(domain, count);
    }

    // Strict `>` keeps the earliest field on ties.
    let mut best: Option<(Domain, u32)> = None;
    for (&domain, &count) in &tally {
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((domain, count));
        }
    }

    match best {
        Some((domain, _)) => (domain, tally),
        None => (Domain::Undetermined, FieldTally::new()),
    }
}

/// Next skills to learn for a field. Falls back to the `Undetermined` list
/// when the table has no entry for `domain`.
pub fn recommend_skills(domain: Domain, recommendations: &Recommendations) -> Vec<String> {
    recommendations
        .get(&domain)
        .or_else(|| recommendations.get(&Domain::Undetermined))
        .cloned()
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Writing score
// ────────────────────────────────────────────────────────────────────────────

/// Indicators are case-sensitive plain substrings, not whole words.
fn group_present(group: &SectionGroup, text: &str) -> bool {
    group
        .indicators
        .iter()
        .any(|i| !i.is_empty() && text.contains(i.as_str()))
}

/// Labels of the section groups with at least one indicator present.
pub fn detected_sections<'a>(text: &str, weights: &'a SectionWeights) -> Vec<&'a str> {
    weights
        .groups
        .iter()
        .filter(|group| group_present(group, text))
        .map(|group| group.label.as_str())
        .collect()
}

/// Sum of the points of every detected section group. Each group counts once.
pub fn score_writing(text: &str, weights: &SectionWeights) -> u32 {
    weights
        .groups
        .iter()
        .filter(|group| group_present(group, text))
        .fold(0u32, |total, group| total.saturating_add(group.points))
}

// ────────────────────────────────────────────────────────────────────────────
// Classifier
// ────────────────────────────────────────────────────────────────────────────

/// Tables plus their compiled matcher. Shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Classifier {
    tables: ClassifierTables,
    matcher: SkillMatcher,
}

impl Classifier {
    pub fn new(tables: ClassifierTables) -> Result<Self, TablesError> {
        let tables = tables.validated()?;
        let matcher = SkillMatcher::new(&tables.keywords)?;
        Ok(Self { tables, matcher })
    }

    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.matcher.extract_skills(text)
    }

    pub fn classify_domain(&self, matched: &BTreeSet<String>) -> (Domain, FieldTally) {
        classify_domain(matched, &self.tables.keywords)
    }

    pub fn recommend_skills(&self, domain: Domain) -> Vec<String> {
        recommend_skills(domain, &self.tables.recommendations)
    }

    pub fn score_writing(&self, text: &str) -> u32 {
        score_writing(text, &self.tables.sections)
    }

    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let matched_skills = self.extract_skills(text);
        let (predicted_field, field_tally) = self.classify_domain(&matched_skills);
        AnalysisReport {
            recommended_skills: self.recommend_skills(predicted_field),
            writing_score: self.score_writing(text),
            max_writing_score: self.tables.sections.max_score(),
            detected_sections: detected_sections(text, &self.tables.sections)
                .into_iter()
                .map(String::from)
                .collect(),
            matched_skills,
            predicted_field,
            field_tally,
        }
    }
}
