//! Section assembler. Decides which resume sections are visible and shapes them.
//!
//! Output order is fixed: Header, Summary, Work Experience, Education, Skills.
//! Header is always present; every other section appears only when it has
//! something to show. Pure and deterministic.

use serde::Serialize;

use crate::models::document::{Education, PersonalInfo, WorkExperience};
use crate::models::{Document, EntryId};
use crate::preview::segmenter::{segment, ACHIEVEMENT_DELIMITERS, SKILL_DELIMITERS};

/// Shown in place of a blank name.
pub const PLACEHOLDER_NAME: &str = "Your Name";

/// Separator between start and end dates (en dash).
pub const DATE_RANGE_SEPARATOR: &str = " – ";

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Summary,
    WorkExperience,
    Education,
    Skills,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum RenderableSection {
    Header(HeaderBlock),
    Summary(String),
    WorkExperience(Vec<WorkEntryBlock>),
    Education(Vec<EducationEntryBlock>),
    /// Skill tags in the order they were written.
    Skills(Vec<String>),
}

impl RenderableSection {
    pub fn kind(&self) -> SectionKind {
        match self {
            RenderableSection::Header(_) => SectionKind::Header,
            RenderableSection::Summary(_) => SectionKind::Summary,
            RenderableSection::WorkExperience(_) => SectionKind::WorkExperience,
            RenderableSection::Education(_) => SectionKind::Education,
            RenderableSection::Skills(_) => SectionKind::Skills,
        }
    }

    /// Heading printed above the section. The header has none.
    pub fn title(&self) -> Option<&'static str> {
        match self.kind() {
            SectionKind::Header => None,
            SectionKind::Summary => Some("Professional Summary"),
            SectionKind::WorkExperience => Some("Work Experience"),
            SectionKind::Education => Some("Education"),
            SectionKind::Skills => Some("Skills"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub name: String,
    /// True when `name` is the placeholder rather than user input.
    pub is_placeholder: bool,
    pub email: Option<String>,
    /// Phone, location and LinkedIn, in that order, laid out inline.
    pub contact_line: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkHeader {
    pub position: Option<String>,
    pub company: Option<String>,
    pub date_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkEntryBlock {
    pub id: EntryId,
    pub header: Option<WorkHeader>,
    pub description: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationHeader {
    /// `"{degree} in {field}"` when both are set, otherwise whichever are set.
    pub credentials: Vec<String>,
    pub institution: Option<String>,
    pub graduation_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationEntryBlock {
    pub id: EntryId,
    pub header: Option<EducationHeader>,
    pub description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

pub fn assemble(document: &Document) -> Vec<RenderableSection> {
    let mut sections = vec![RenderableSection::Header(assemble_header(
        &document.personal_info,
    ))];

    if let Some(summary) = &document.summary {
        sections.push(RenderableSection::Summary(summary.clone()));
    }

    if document
        .work_experience
        .iter()
        .any(|exp| exp.company.is_some() || exp.position.is_some())
    {
        let entries = document
            .work_experience
            .iter()
            .map(assemble_work_entry)
            .filter(WorkEntryBlock::has_content)
            .collect();
        sections.push(RenderableSection::WorkExperience(entries));
    }

    if document
        .education
        .iter()
        .any(|edu| edu.institution.is_some() || edu.degree.is_some())
    {
        let entries = document
            .education
            .iter()
            .map(assemble_education_entry)
            .filter(EducationEntryBlock::has_content)
            .collect();
        sections.push(RenderableSection::Education(entries));
    }

    if let Some(skills) = &document.skills {
        sections.push(RenderableSection::Skills(segment(skills, SKILL_DELIMITERS)));
    }

    sections
}

fn assemble_header(info: &PersonalInfo) -> HeaderBlock {
    let (name, is_placeholder) = match &info.name {
        Some(name) => (name.clone(), false),
        None => (PLACEHOLDER_NAME.to_string(), true),
    };

    let contact_line = [&info.phone, &info.location, &info.linkedin]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    HeaderBlock {
        name,
        is_placeholder,
        email: info.email.clone(),
        contact_line,
    }
}

fn assemble_work_entry(exp: &WorkExperience) -> WorkEntryBlock {
    let header = (exp.company.is_some() || exp.position.is_some()).then(|| WorkHeader {
        position: exp.position.clone(),
        company: exp.company.clone(),
        date_range: format_date_range(exp.start_date.as_deref(), exp.end_date.as_deref()),
    });

    WorkEntryBlock {
        id: exp.id,
        header,
        description: exp.description.clone(),
        achievements: exp
            .achievements
            .as_deref()
            .map(|text| segment(text, ACHIEVEMENT_DELIMITERS))
            .unwrap_or_default(),
    }
}

fn assemble_education_entry(edu: &Education) -> EducationEntryBlock {
    let has_header = edu.institution.is_some() || edu.degree.is_some() || edu.field.is_some();
    let header = has_header.then(|| EducationHeader {
        credentials: format_credentials(edu.degree.as_deref(), edu.field.as_deref()),
        institution: edu.institution.clone(),
        graduation_date: edu.graduation_date.clone(),
    });

    EducationEntryBlock {
        id: edu.id,
        header,
        description: edu.description.clone(),
    }
}

/// Joins the dates with an en dash when both are set; never leaves a dangling separator.
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start}{DATE_RANGE_SEPARATOR}{end}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

pub fn format_credentials(degree: Option<&str>, field: Option<&str>) -> Vec<String> {
    match (degree, field) {
        (Some(degree), Some(field)) => vec![format!("{degree} in {field}")],
        (degree, field) => degree.into_iter().chain(field).map(str::to_string).collect(),
    }
}

impl WorkEntryBlock {
    fn has_content(&self) -> bool {
        self.header.is_some() || self.description.is_some() || !self.achievements.is_empty()
    }
}

impl EducationEntryBlock {
    fn has_content(&self) -> bool {
        self.header.is_some() || self.description.is_some()
    }
}
