use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub body: &'static str,
}

/// Static guidance for applicant tracking software. No analysis of the document.
pub const OPTIMIZATION_TIPS: &[Tip] = &[
    Tip {
        title: "Keywords",
        body: "Include keywords that match the job description. Software uses keywords to \
               determine relevance.",
    },
    Tip {
        title: "Formatting",
        body: "This resume uses a clean, simple format that systems can easily parse. Avoid \
               tables, headers, and complex formatting that is not compliant with Applicant \
               Software.",
    },
    Tip {
        title: "File Format",
        body: "When downloading, save as a PDF or .docx file as these are most compatible with \
               Applicant Software.",
    },
    Tip {
        title: "Quantifiable Achievements",
        body: "Including metrics and numbers in your achievements helps both ATS and human \
               reviewers understand your impact.",
    },
    Tip {
        title: "Job Title Alignment",
        body: "When possible, match your job titles to those in the job description if accurate \
               to your experience (do not mislead).",
    },
];

/// GET /api/v1/tips
pub async fn tips_handler() -> Json<&'static [Tip]> {
    Json(OPTIMIZATION_TIPS)
}
