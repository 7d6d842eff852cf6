use serde::{Deserialize, Serialize};

use crate::models::entries::{Entry, EntryId, EntryList, Removal};
use crate::models::text::present;

// ────────────────────────────────────────────────────────────────────────────
// Field selectors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
    Linkedin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkField {
    Company,
    Position,
    StartDate,
    EndDate,
    Description,
    Achievements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    Institution,
    Degree,
    Field,
    GraduationDate,
    Description,
}

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, with = "crate::models::text")]
    pub name: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub email: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub phone: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub location: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub linkedin: Option<String>,
}

impl PersonalInfo {
    pub fn set(&mut self, field: PersonalField, value: impl Into<String>) {
        let slot = match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Linkedin => &mut self.linkedin,
        };
        *slot = present(value);
    }
}

/// One position held. Dates are free text ("Present" is fine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: EntryId,
    #[serde(default, with = "crate::models::text")]
    pub company: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub position: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub start_date: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub end_date: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub description: Option<String>,
    /// Newline- or bullet-separated achievements.
    #[serde(default, with = "crate::models::text")]
    pub achievements: Option<String>,
}

impl WorkExperience {
    pub fn set(&mut self, field: WorkField, value: impl Into<String>) {
        let slot = match field {
            WorkField::Company => &mut self.company,
            WorkField::Position => &mut self.position,
            WorkField::StartDate => &mut self.start_date,
            WorkField::EndDate => &mut self.end_date,
            WorkField::Description => &mut self.description,
            WorkField::Achievements => &mut self.achievements,
        };
        *slot = present(value);
    }
}

impl Entry for WorkExperience {
    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        WorkExperience {
            id,
            company: None,
            position: None,
            start_date: None,
            end_date: None,
            description: None,
            achievements: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: EntryId,
    #[serde(default, with = "crate::models::text")]
    pub institution: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub degree: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub field: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub graduation_date: Option<String>,
    #[serde(default, with = "crate::models::text")]
    pub description: Option<String>,
}

impl Education {
    pub fn set(&mut self, field: EducationField, value: impl Into<String>) {
        let slot = match field {
            EducationField::Institution => &mut self.institution,
            EducationField::Degree => &mut self.degree,
            EducationField::Field => &mut self.field,
            EducationField::GraduationDate => &mut self.graduation_date,
            EducationField::Description => &mut self.description,
        };
        *slot = present(value);
    }
}

impl Entry for Education {
    fn id(&self) -> EntryId {
        self.id
    }

    fn blank(id: EntryId) -> Self {
        Education {
            id,
            institution: None,
            degree: None,
            field: None,
            graduation_date: None,
            description: None,
        }
    }
}

/// The resume being edited. Owned by exactly one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default, with = "crate::models::text")]
    pub summary: Option<String>,
    #[serde(default)]
    pub work_experience: EntryList<WorkExperience>,
    #[serde(default)]
    pub education: EntryList<Education>,
    /// Comma-, newline- or bullet-separated skills.
    #[serde(default, with = "crate::models::text")]
    pub skills: Option<String>,
}

impl Document {
    /// A blank document: one empty work experience, one empty education entry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_personal(&mut self, field: PersonalField, value: impl Into<String>) {
        self.personal_info.set(field, value);
    }

    pub fn set_summary(&mut self, value: impl Into<String>) {
        self.summary = present(value);
    }

    pub fn set_skills(&mut self, value: impl Into<String>) {
        self.skills = present(value);
    }

    pub fn add_work_experience(&mut self) -> EntryId {
        self.work_experience.push_blank()
    }

    /// Returns `false` when no entry has the given id.
    pub fn update_work_experience(
        &mut self,
        id: EntryId,
        field: WorkField,
        value: impl Into<String>,
    ) -> bool {
        match self.work_experience.get_mut(id) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn remove_work_experience(&mut self, id: EntryId) -> Removal {
        self.work_experience.remove(id)
    }

    pub fn add_education(&mut self) -> EntryId {
        self.education.push_blank()
    }

    pub fn update_education(
        &mut self,
        id: EntryId,
        field: EducationField,
        value: impl Into<String>,
    ) -> bool {
        match self.education.get_mut(id) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn remove_education(&mut self, id: EntryId) -> Removal {
        self.education.remove(id)
    }
}
