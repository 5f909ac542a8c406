//! Analysis pipeline: turns an extracted document into a finished analysis.
//!
//! Order: profile → classify → courses → pitch. Storage of the original file
//! and of the resulting record is done by the handler around this step, so
//! everything here is testable with a fake `Summarizer`.

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::classifier::{AnalysisReport, Classifier};
use crate::analysis::courses::{recommend_courses, Course};
use crate::analysis::profile::{build_profile, CandidateProfile};
use crate::analysis::prompts::{pitch_prompt, PITCH_UNAVAILABLE};
use crate::documents::ExtractedDocument;
use crate::llm_client::prompts::PITCH_SYSTEM;
use crate::llm_client::Summarizer;

/// Everything computed for one upload before it is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DraftAnalysis {
    pub profile: CandidateProfile,
    pub report: AnalysisReport,
    pub recommended_courses: Vec<Course>,
    pub ai_summary: String,
    /// False when the summarizer failed and `ai_summary` is the placeholder.
    pub ai_summary_available: bool,
}

pub async fn build_analysis(
    document: &ExtractedDocument,
    file_name: &str,
    classifier: &Classifier,
    summarizer: &dyn Summarizer,
    course_count: usize,
    rng: &mut fastrand::Rng,
) -> DraftAnalysis {
    let profile = build_profile(&document.text, file_name, document.page_count);
    let report = classifier.analyze(&document.text);
    let recommended_courses = recommend_courses(report.predicted_field, course_count, rng);

    info!(
        "Classified {} as {} ({} skills, writing score {}/{})",
        file_name,
        report.predicted_field,
        report.matched_skills.len(),
        report.writing_score,
        report.max_writing_score
    );

    let (ai_summary, ai_summary_available) =
        match summarizer.summarize(&pitch_prompt(&document.text), PITCH_SYSTEM).await {
            Ok(pitch) => (pitch, true),
            Err(e) => {
                warn!("Pitch generation failed, using placeholder: {e}");
                (PITCH_UNAVAILABLE.to_string(), false)
            }
        };

    DraftAnalysis {
        profile,
        report,
        recommended_courses,
        ai_summary,
        ai_summary_available,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::analysis::keywords::{ClassifierTables, Domain};
    use crate::analysis::profile::ExperienceLevel;
    use crate::llm_client::LlmError;

    /// Records prompts and replies with a canned answer, or fails when `reply` is `None`.
    pub(crate) struct FakeSummarizer {
        pub reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeSummarizer {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or(LlmError::EmptyContent)
        }
    }

    fn document(text: &str, page_count: usize) -> ExtractedDocument {
        ExtractedDocument {
            text: text.to_string(),
            page_count,
        }
    }

    #[tokio::test]
    async fn test_build_analysis_end_to_end() {
        let classifier = Classifier::new(ClassifierTables::default()).unwrap();
        let summarizer = FakeSummarizer::replying("Web developer with React and MongoDB.");
        let doc = document(
            "Alan Turing\nalan@example.org\nExperience\nReact, Node.js, MongoDB\nProjects",
            1,
        );
        let mut rng = fastrand::Rng::with_seed(3);

        let draft = build_analysis(&doc, "alan.pdf", &classifier, &summarizer, 3, &mut rng).await;

        assert_eq!(draft.profile.name, "Alan Turing");
        assert_eq!(draft.profile.experience_level, ExperienceLevel::Experienced);
        assert_eq!(draft.report.predicted_field, Domain::WebDevelopment);
        assert_eq!(draft.recommended_courses.len(), 3);
        assert_eq!(draft.ai_summary, "Web developer with React and MongoDB.");
        assert!(draft.ai_summary_available);

        let prompts = summarizer.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("React, Node.js, MongoDB"));
    }

    #[tokio::test]
    async fn test_summarizer_failure_uses_placeholder() {
        let classifier = Classifier::new(ClassifierTables::default()).unwrap();
        let summarizer = FakeSummarizer::failing();
        let doc = document("Kotlin and Flutter", 1);
        let mut rng = fastrand::Rng::with_seed(3);

        let draft = build_analysis(&doc, "a.pdf", &classifier, &summarizer, 5, &mut rng).await;

        assert_eq!(draft.ai_summary, PITCH_UNAVAILABLE);
        assert!(!draft.ai_summary_available);
        assert_eq!(draft.report.predicted_field, Domain::AndroidDevelopment);
    }

    #[tokio::test]
    async fn test_empty_document_takes_fallback_path() {
        let classifier = Classifier::new(ClassifierTables::default()).unwrap();
        let summarizer = FakeSummarizer::replying("n/a");
        let doc = document("", 0);
        let mut rng = fastrand::Rng::with_seed(3);

        let draft =
            build_analysis(&doc, "scan.pdf", &classifier, &summarizer, 5, &mut rng).await;

        assert_eq!(draft.profile.name, "Scan");
        assert_eq!(draft.profile.experience_level, ExperienceLevel::NotAvailable);
        assert!(draft.report.matched_skills.is_empty());
        assert_eq!(draft.report.predicted_field, Domain::Undetermined);
        assert_eq!(draft.report.writing_score, 0);
        assert!(draft.recommended_courses.is_empty());
    }
}
