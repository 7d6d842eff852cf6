pub mod document;
pub mod entries;
pub mod text;

pub use document::{Document, EducationField, PersonalField, WorkField};
pub use entries::{EntryId, Removal};
