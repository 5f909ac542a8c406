//! Candidate profile heuristics: contact details, a best-effort name, and a
//! coarse experience level read off section headings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern is valid"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{10}|\(\d{3}\)\s*\d{3}[-.\s]??\d{4}|\d{3}[-.\s]??\d{3}[-.\s]??\d{4}")
        .expect("phone pattern is valid")
});

static FILE_NAME_NOISE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(resume|cv|final|updated|v\d+|20\d{2}|20\d)")
        .expect("file name noise pattern is valid")
});

/// Words that show up capitalized near the top of a resume but are not names.
const NAME_BLACKLIST: &[&str] = &[
    "pandas",
    "numpy",
    "spacy",
    "java",
    "react",
    "python",
    "resume",
    "cv",
    "page",
    "curriculum",
    "vitae",
    "summary",
    "objective",
    "profile",
    "education",
    "experience",
    "skills",
    "contact",
    "projects",
    "project",
    "academic",
    "certifications",
    "certification",
    "achievements",
    "internships",
    "internship",
    "hobbies",
    "interests",
    "references",
    "declaration",
    "engineer",
    "developer",
    "designer",
    "scientist",
    "analyst",
    "manager",
    "intern",
    "consultant",
    "architect",
    "software",
    "machine",
    "learning",
    "data",
    "web",
    "full-stack",
    "frontend",
    "backend",
];

const FALLBACK_NAME: &str = "Candidate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "NA")]
    NotAvailable,
    Fresher,
    Intermediate,
    Experienced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::NotAvailable => "NA",
            ExperienceLevel::Fresher => "Fresher",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Experienced => "Experienced",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_level: ExperienceLevel,
    pub page_count: usize,
}

pub fn build_profile(text: &str, file_name: &str, page_count: usize) -> CandidateProfile {
    CandidateProfile {
        name: extract_name(text, file_name),
        email: extract_email(text),
        phone: extract_phone(text),
        experience_level: experience_level(text, page_count),
        page_count,
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// First of the top three non-empty lines that reads like a personal name,
/// else a name recovered from the upload's file name, else "Candidate".
pub fn extract_name(text: &str, file_name: &str) -> String {
    let from_text = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(3)
        .find(|line| looks_like_name(line))
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "));

    let name = from_text.unwrap_or_else(|| name_from_file_name(file_name));
    if name.chars().count() < 2 {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }
    // All-caps lines are section headings far more often than names.
    if words.iter().all(|word| is_all_caps(word)) {
        return false;
    }
    words.iter().all(|word| {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        let name_chars = word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '.' | '\'' | '-'));
        let blacklisted = NAME_BLACKLIST
            .iter()
            .any(|b| b.eq_ignore_ascii_case(word.trim_end_matches('.')));
        starts_upper && name_chars && !blacklisted
    })
}

fn is_all_caps(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

/// "JohnDoe_Resume_2024.pdf" → "John Doe".
fn name_from_file_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or_default();
    let stem = FILE_NAME_NOISE_RE.replace_all(stem, "");

    let mut spaced = String::with_capacity(stem.len() + 4);
    let mut prev_lower = false;
    for c in stem.chars() {
        if prev_lower && c.is_uppercase() {
            spaced.push(' ');
        }
        prev_lower = c.is_lowercase();
        spaced.push(if matches!(c, '_' | '-') { ' ' } else { c });
    }

    spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Internship headings mark an intermediate candidate, experience headings an
/// experienced one; matching is case-sensitive like the writing score.
pub fn experience_level(text: &str, page_count: usize) -> ExperienceLevel {
    const INTERNSHIP: &[&str] = &["INTERNSHIP", "INTERNSHIPS", "Internship", "Internships"];
    const EXPERIENCE: &[&str] = &["EXPERIENCE", "WORK EXPERIENCE", "Experience", "Work Experience"];

    if page_count < 1 {
        ExperienceLevel::NotAvailable
    } else if INTERNSHIP.iter().any(|h| text.contains(h)) {
        ExperienceLevel::Intermediate
    } else if EXPERIENCE.iter().any(|h| text.contains(h)) {
        ExperienceLevel::Experienced
    } else {
        ExperienceLevel::Fresher
    }
}
