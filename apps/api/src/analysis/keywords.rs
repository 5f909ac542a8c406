//! Static classifier tables: career domains, their keyword lists, the
//! recommended next skills per domain, and the section-heading weights used
//! by the writing score.
//!
//! The compiled-in defaults can be replaced at startup by a JSON file
//! (`ANALYZER_TABLES_PATH`) with the same shape as `ClassifierTables`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

// ────────────────────────────────────────────────────────────────────────────
// Domain
// ────────────────────────────────────────────────────────────────────────────

/// Career field a resume is classified into.
///
/// Declaration order is the tie-break order: when two fields score the same
/// keyword count, the one declared first wins. `Ord` follows declaration
/// order, so a `BTreeMap<Domain, _>` iterates in tie-break order too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Android Development")]
    AndroidDevelopment,
    #[serde(rename = "iOS Development")]
    IosDevelopment,
    #[serde(rename = "UI/UX Development")]
    UiUxDevelopment,
    #[serde(rename = "Undetermined")]
    Undetermined,
}

impl Domain {
    /// The five real fields, in tie-break order. `Undetermined` is excluded.
    pub const FIELDS: [Domain; 5] = [
        Domain::DataScience,
        Domain::WebDevelopment,
        Domain::AndroidDevelopment,
        Domain::IosDevelopment,
        Domain::UiUxDevelopment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::DataScience => "Data Science",
            Domain::WebDevelopment => "Web Development",
            Domain::AndroidDevelopment => "Android Development",
            Domain::IosDevelopment => "iOS Development",
            Domain::UiUxDevelopment => "UI/UX Development",
            Domain::Undetermined => "Undetermined",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Table types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("Failed to read classifier tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid classifier tables JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Keyword lists cannot be assigned to the Undetermined domain")]
    UndeterminedKeywords,

    #[error("Section group '{0}' has no indicators")]
    EmptySectionGroup(String),

    #[error("Keyword pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Recommendations must include an entry for {0}")]
    MissingRecommendations(Domain),

    #[error("Section weights overflow: total points exceed {}", u32::MAX)]
    WeightOverflow,
}

/// Recommended next skills per domain. Must contain `Undetermined`.
pub type Recommendations = BTreeMap<Domain, Vec<String>>;

/// Keyword lists per domain plus a soft-skill list tied to no domain.
/// Keywords are stored lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSet {
    pub domains: BTreeMap<Domain, Vec<String>>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
}

impl KeywordSet {
    /// Lowercases and trims every keyword, dropping blanks and duplicates
    /// within a list while keeping first-seen order.
    pub fn normalized(self) -> Result<Self, TablesError> {
        if self.domains.contains_key(&Domain::Undetermined) {
            return Err(TablesError::UndeterminedKeywords);
        }
        let domains = self
            .domains
            .into_iter()
            .map(|(domain, list)| (domain, normalize_list(list)))
            .collect();
        Ok(Self {
            domains,
            soft_skills: normalize_list(self.soft_skills),
        })
    }

    /// Keyword list for a domain; empty for `Undetermined` or an unlisted domain.
    pub fn domain_keywords(&self, domain: Domain) -> &[String] {
        self.domains
            .get(&domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every keyword across all domain lists and the soft-skill list,
    /// in declaration order. May repeat a keyword listed under two domains.
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        self.domains
            .values()
            .flatten()
            .chain(self.soft_skills.iter())
            .map(String::as_str)
    }
}

fn normalize_list(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for keyword in list {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }
    out
}

/// One group of interchangeable section headings worth a fixed number of points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionGroup {
    pub label: String,
    pub indicators: Vec<String>,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionWeights {
    pub groups: Vec<SectionGroup>,
}

impl SectionWeights {
    /// Upper bound of the writing score under this table. Saturates for
    /// tables that were never validated.
    pub fn max_score(&self) -> u32 {
        self.groups
            .iter()
            .fold(0u32, |total, g| total.saturating_add(g.points))
    }

    fn validated(self) -> Result<Self, TablesError> {
        if let Some(group) = self
            .groups
            .iter()
            .find(|g| g.indicators.iter().all(|i| i.is_empty()))
        {
            return Err(TablesError::EmptySectionGroup(group.label.clone()));
        }
        self.groups
            .iter()
            .try_fold(0u32, |total, g| total.checked_add(g.points))
            .ok_or(TablesError::WeightOverflow)?;
        Ok(self)
    }
}

/// Everything the classifier needs, passed in explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierTables {
    pub keywords: KeywordSet,
    pub sections: SectionWeights,
    /// Domains listed here replace the built-in lists; others keep them.
    #[serde(default = "default_recommendations")]
    pub recommendations: Recommendations,
}

impl Default for ClassifierTables {
    fn default() -> Self {
        Self {
            keywords: default_keyword_set(),
            sections: default_section_weights(),
            recommendations: default_recommendations(),
        }
    }
}

impl ClassifierTables {
    /// Parses tables from JSON and normalizes them.
    pub fn from_json(json: &str) -> Result<Self, TablesError> {
        let tables: ClassifierTables = serde_json::from_str(json)?;
        tables.validated()
    }

    /// Loads tables from `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, TablesError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let tables = Self::from_json(&json)?;
                info!(
                    "Loaded classifier tables from {} ({} domains, {} section groups)",
                    path.display(),
                    tables.keywords.domains.len(),
                    tables.sections.groups.len()
                );
                Ok(tables)
            }
            None => Self::default().validated(),
        }
    }

    /// Normalizes keywords, checks the section table and fills
    /// recommendations for domains the table leaves out.
    pub fn validated(self) -> Result<Self, TablesError> {
        let mut recommendations = default_recommendations();
        recommendations.extend(self.recommendations);
        if recommendations
            .get(&Domain::Undetermined)
            .map_or(true, |list| list.is_empty())
        {
            return Err(TablesError::MissingRecommendations(Domain::Undetermined));
        }

        Ok(Self {
            keywords: self.keywords.normalized()?,
            sections: self.sections.validated()?,
            recommendations,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Default tables
// ────────────────────────────────────────────────────────────────────────────

const DATA_SCIENCE_KEYWORDS: &[&str] = &[
    "tensorflow",
    "keras",
    "pytorch",
    "machine learning",
    "deep learning",
    "nlp",
    "pandas",
    "numpy",
    "scikit-learn",
    "streamlit",
    "genai",
    "semantic analysis",
    "python",
];

const WEB_KEYWORDS: &[&str] = &[
    "react",
    "react.js",
    "next.js",
    "node.js",
    "node js",
    "express",
    "express.js",
    "mongodb",
    "mongo db",
    "javascript",
    "html",
    "css",
    "tailwind",
    "jwt",
    "rest api",
    "rest apis",
    "prisma",
    "mysql",
    "socket.io",
];

const ANDROID_KEYWORDS: &[&str] = &[
    "android",
    "android development",
    "flutter",
    "kotlin",
    "xml",
    "kivy",
];

const IOS_KEYWORDS: &[&str] = &[
    "ios",
    "ios development",
    "swift",
    "cocoa",
    "cocoa touch",
    "xcode",
];

const UIUX_KEYWORDS: &[&str] = &[
    "adobe xd",
    "figma",
    "zeplin",
    "balsamiq",
    "prototyping",
    "wireframes",
    "adobe photoshop",
    "illustrator",
    "after effects",
    "indesign",
    "user research",
    "user experience",
];

const SOFT_SKILLS: &[&str] = &[
    "english",
    "communication",
    "writing",
    "microsoft office",
    "leadership",
    "customer management",
    "social media",
];

/// (label, indicators, points). Indicators match case-sensitively. Sums to 100.
const SECTION_TABLE: &[(&str, &[&str], u32)] = &[
    ("objective", &["Objective", "Summary"], 6),
    ("education", &["Education", "School", "College"], 12),
    ("experience", &["EXPERIENCE", "Experience"], 16),
    ("internships", &["INTERNSHIPS", "INTERNSHIP"], 6),
    ("skills", &["SKILLS", "SKILL", "Skills", "Skill"], 7),
    ("hobbies", &["HOBBIES", "Hobbies"], 4),
    ("interests", &["INTERESTS", "Interests"], 5),
    ("achievements", &["ACHIEVEMENTS", "Achievements"], 13),
    (
        "certifications",
        &["CERTIFICATIONS", "Certifications", "Certification"],
        12,
    ),
    ("projects", &["PROJECTS", "PROJECT", "Projects", "Project"], 19),
];

const RECOMMENDED_SKILLS: &[(Domain, &[&str])] = &[
    (
        Domain::DataScience,
        &["Deep Learning", "Feature Engineering", "Model Deployment", "MLOps"],
    ),
    (
        Domain::WebDevelopment,
        &["System Design", "Advanced Backend Architecture", "Docker", "CI/CD"],
    ),
    (
        Domain::AndroidDevelopment,
        &["Jetpack Compose", "Firebase", "MVVM Architecture"],
    ),
    (
        Domain::IosDevelopment,
        &["SwiftUI", "CoreData", "App Store Deployment"],
    ),
    (
        Domain::UiUxDevelopment,
        &["Design Systems", "Interaction Design", "User Research"],
    ),
    (Domain::Undetermined, &["Problem Solving", "Communication"]),
];

fn to_owned_list(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn default_keyword_set() -> KeywordSet {
    let domains = [
        (Domain::DataScience, DATA_SCIENCE_KEYWORDS),
        (Domain::WebDevelopment, WEB_KEYWORDS),
        (Domain::AndroidDevelopment, ANDROID_KEYWORDS),
        (Domain::IosDevelopment, IOS_KEYWORDS),
        (Domain::UiUxDevelopment, UIUX_KEYWORDS),
    ]
    .into_iter()
    .map(|(domain, list)| (domain, to_owned_list(list)))
    .collect();

    KeywordSet {
        domains,
        soft_skills: to_owned_list(SOFT_SKILLS),
    }
}

pub fn default_recommendations() -> Recommendations {
    RECOMMENDED_SKILLS
        .iter()
        .map(|(domain, list)| (*domain, to_owned_list(list)))
        .collect()
}

pub fn default_section_weights() -> SectionWeights {
    SectionWeights {
        groups: SECTION_TABLE
            .iter()
            .map(|(label, indicators, points)| SectionGroup {
                label: label.to_string(),
                indicators: to_owned_list(indicators),
                points: *points,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_domain_order_matches_tie_break_order() {
        let mut sorted = Domain::FIELDS.to_vec();
        sorted.sort();
        assert_eq!(sorted, Domain::FIELDS.to_vec());
        assert!(Domain::UiUxDevelopment < Domain::Undetermined);
    }

    #[test]
    fn test_domain_serializes_as_label() {
        let json = serde_json::to_string(&Domain::IosDevelopment).unwrap();
        assert_eq!(json, r#""iOS Development""#);
        let back: Domain = serde_json::from_str(r#""UI/UX Development""#).unwrap();
        assert_eq!(back, Domain::UiUxDevelopment);
        assert_eq!(Domain::Undetermined.to_string(), "Undetermined");
    }

    #[test]
    fn test_default_section_weights_sum_to_100() {
        assert_eq!(default_section_weights().max_score(), 100);
    }

    #[test]
    fn test_default_keywords_are_lowercase() {
        let set = default_keyword_set();
        assert!(set.all_keywords().all(|k| k == k.to_lowercase()));
        assert_eq!(set.domains.len(), 5);
    }

    #[test]
    fn test_normalized_lowercases_and_dedups() {
        let set = KeywordSet {
            domains: BTreeMap::from([(
                Domain::WebDevelopment,
                vec![" React ".to_string(), "react".to_string(), "".to_string()],
            )]),
            soft_skills: vec!["Leadership".to_string()],
        }
        .normalized()
        .unwrap();
        assert_eq!(set.domain_keywords(Domain::WebDevelopment), ["react"]);
        assert_eq!(set.soft_skills, vec!["leadership"]);
        assert!(set.domain_keywords(Domain::DataScience).is_empty());
    }

    #[test]
    fn test_undetermined_keywords_rejected() {
        let set = KeywordSet {
            domains: BTreeMap::from([(Domain::Undetermined, vec!["rust".to_string()])]),
            soft_skills: vec![],
        };
        assert!(matches!(
            set.normalized(),
            Err(TablesError::UndeterminedKeywords)
        ));
    }

    #[test]
    fn test_tables_from_json() {
        let json = r#"{
            "keywords": {
                "domains": { "Data Science": ["PyTorch"], "iOS Development": ["swiftui"] },
                "soft_skills": ["Mentoring"]
            },
            "sections": {
                "groups": [ { "label": "skills", "indicators": ["Skills"], "points": 50 } ]
            }
        }"#;
        let tables = ClassifierTables::from_json(json).unwrap();
        assert_eq!(
            tables.keywords.domain_keywords(Domain::DataScience),
            ["pytorch"]
        );
        assert_eq!(tables.keywords.soft_skills, vec!["mentoring"]);
        assert_eq!(tables.sections.max_score(), 50);
    }

    #[test]
    fn test_tables_from_json_rejects_empty_group() {
        let json = r#"{
            "keywords": { "domains": {} },
            "sections": { "groups": [ { "label": "empty", "indicators": [], "points": 5 } ] }
        }"#;
        let err = ClassifierTables::from_json(json).unwrap_err();
        assert!(matches!(err, TablesError::EmptySectionGroup(label) if label == "empty"));
    }

    #[test]
    fn test_tables_from_json_overrides_one_recommendation_list() {
        let json = r#"{
            "keywords": { "domains": {} },
            "sections": { "groups": [] },
            "recommendations": { "iOS Development": ["Combine", "Swift Concurrency"] }
        }"#;
        let tables = ClassifierTables::from_json(json).unwrap();
        assert_eq!(
            tables.recommendations[&Domain::IosDevelopment],
            vec!["Combine", "Swift Concurrency"]
        );
        assert_eq!(
            tables.recommendations[&Domain::AndroidDevelopment],
            vec!["Jetpack Compose", "Firebase", "MVVM Architecture"]
        );
        assert_eq!(tables.recommendations.len(), 6);
    }

    #[test]
    fn test_tables_without_recommendations_use_defaults() {
        let json = r#"{ "keywords": { "domains": {} }, "sections": { "groups": [] } }"#;
        let tables = ClassifierTables::from_json(json).unwrap();
        assert_eq!(tables.recommendations, default_recommendations());
    }

    #[test]
    fn test_empty_undetermined_recommendations_rejected() {
        let json = r#"{
            "keywords": { "domains": {} },
            "sections": { "groups": [] },
            "recommendations": { "Undetermined": [] }
        }"#;
        assert!(matches!(
            ClassifierTables::from_json(json),
            Err(TablesError::MissingRecommendations(Domain::Undetermined))
        ));
    }

    #[test]
    fn test_tables_from_json_rejects_overflowing_weights() {
        let json = r#"{
            "keywords": { "domains": {} },
            "sections": { "groups": [
                { "label": "huge", "indicators": ["A"], "points": 4294967295 },
                { "label": "small", "indicators": ["B"], "points": 5 }
            ] }
        }"#;
        assert!(matches!(
            ClassifierTables::from_json(json),
            Err(TablesError::WeightOverflow)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "keywords": {{ "domains": {{ "Data Science": ["Polars"] }} }},
                 "sections": {{ "groups": [ {{ "label": "skills", "indicators": ["Skills"], "points": 7 }} ] }} }}"#
        )
        .unwrap();

        let tables = ClassifierTables::load(Some(file.path())).unwrap();
        assert_eq!(tables.keywords.domain_keywords(Domain::DataScience), ["polars"]);
        assert_eq!(tables.sections.max_score(), 7);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("tables.json");
        assert!(matches!(
            ClassifierTables::load(Some(missing.as_path())),
            Err(TablesError::Io(_))
        ));
    }

    #[test]
    fn test_load_without_path_returns_defaults() {
        let tables = ClassifierTables::load(None).unwrap();
        assert_eq!(tables.sections.groups.len(), 10);
        assert!(tables
            .keywords
            .domain_keywords(Domain::WebDevelopment)
            .contains(&"mongodb".to_string()));
    }
}
