//! Standard catalog types
//!
//! Sections and questions of the audited standard, plus templates that scope
//! an assessment to a subset of sections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuestion {
    /// Unique identifier
    pub id: Uuid,
    /// Owning section
    pub section_id: Uuid,
    /// Clause reference ("7.1.5")
    pub reference: String,
    /// Question text
    pub text: String,
}

/// A top-level clause of the standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique identifier
    pub id: Uuid,
    /// Clause number ("4" .. "10")
    pub clause: String,
    /// Title
    pub title: String,
    /// Questions, in clause order
    pub questions: Vec<AuditQuestion>,
}

impl Section {
    /// Whether `question_id` belongs to this section
    #[must_use]
    pub fn contains_question(&self, question_id: Uuid) -> bool {
        self.questions.iter().any(|q| q.id == question_id)
    }
}

/// Which sections a template includes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SectionSelector {
    /// Every section
    #[default]
    All,
    /// Sections whose clause number is listed
    Clauses {
        /// Clause numbers
        clauses: Vec<String>,
    },
    /// Sections listed by id
    #[serde(rename_all = "camelCase")]
    Sections {
        /// Section ids
        section_ids: Vec<Uuid>,
    },
}

impl SectionSelector {
    /// Whether `section` is selected
    #[must_use]
    pub fn includes(&self, section: &Section) -> bool {
        match self {
            Self::All => true,
            Self::Clauses { clauses } => clauses.iter().any(|c| *c == section.clause),
            Self::Sections { section_ids } => section_ids.contains(&section.id),
        }
    }
}

/// A named subset of the standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTemplate {
    /// Static identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// What the template is for
    pub description: String,
    /// Included sections
    pub selector: SectionSelector,
}

impl AssessmentTemplate {
    /// Select the template's sections from the catalog, preserving catalog order
    #[must_use]
    pub fn select<'a>(&self, sections: &'a [Section]) -> Vec<&'a Section> {
        sections.iter().filter(|s| self.selector.includes(s)).collect()
    }
}
