//! ISO 9001:2015 catalog
//!
//! The fixed sections (clauses 4 to 10), one question per subclause, and the
//! seven assessment templates. All identifiers are static so that stored
//! responses and templates keep pointing at the same rows across releases.

use uuid::Uuid;

use crate::core::models::{AssessmentTemplate, AuditQuestion, Section, SectionSelector};

const SECTION_BASE: u128 = 0x9001_0000_0000_4000_8000_5ec7_0000_0000;
const QUESTION_BASE: u128 = 0x9001_0000_0000_4000_8000_9e57_0000_0000;
const TEMPLATE_BASE: u128 = 0x9001_0000_0000_4000_8000_7e3b_0000_0000;

/// Static id of the section for `clause` (4..=10)
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn section_id(clause: u8) -> Uuid {
    Uuid::from_u128(SECTION_BASE | clause as u128)
}

/// Static id of question `clause.sub`
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn question_id(clause: u8, sub: u8) -> Uuid {
    Uuid::from_u128(QUESTION_BASE | ((clause as u128) << 8) | sub as u128)
}

#[allow(clippy::cast_lossless)]
const fn template_id(n: u8) -> Uuid {
    Uuid::from_u128(TEMPLATE_BASE | n as u128)
}

/// Full ISO 9001:2015 audit
pub const FULL_AUDIT: Uuid = template_id(1);
/// Context & leadership
pub const CONTEXT_AND_LEADERSHIP: Uuid = template_id(2);
/// Planning & support
pub const PLANNING_AND_SUPPORT: Uuid = template_id(3);
/// Operational control
pub const OPERATIONAL_CONTROL: Uuid = template_id(4);
/// Performance evaluation
pub const PERFORMANCE_EVALUATION: Uuid = template_id(5);
/// Continual improvement
pub const CONTINUAL_IMPROVEMENT: Uuid = template_id(6);
/// Management review readiness
pub const MANAGEMENT_REVIEW: Uuid = template_id(7);

type ClauseRow = (u8, &'static str, &'static [&'static str]);

const CATALOG: &[ClauseRow] = &[
    (
        4,
        "Context of the organization",
        &[
            "Are external and internal issues relevant to the QMS determined and reviewed?",
            "Are the needs and expectations of interested parties identified and monitored?",
            "Is the scope of the QMS determined, documented and available?",
            "Are QMS processes, their interactions, inputs and outputs defined?",
        ],
    ),
    (
        5,
        "Leadership",
        &[
            "Does top management demonstrate leadership and commitment to the QMS?",
            "Is a quality policy established, communicated and understood?",
            "Are roles, responsibilities and authorities assigned and communicated?",
        ],
    ),
    (
        6,
        "Planning",
        &[
            "Are risks and opportunities identified with actions planned to address them?",
            "Are measurable quality objectives set with plans to achieve them?",
            "Are changes to the QMS carried out in a planned manner?",
        ],
    ),
    (
        7,
        "Support",
        &[
            "Are people, infrastructure, environment and monitoring resources provided?",
            "Is the competence of persons doing work under the QMS ensured?",
            "Are persons aware of the quality policy and their contribution?",
            "Are internal and external communications determined?",
            "Is documented information created, controlled and retained?",
        ],
    ),
    (
        8,
        "Operation",
        &[
            "Are operational processes planned and controlled?",
            "Are customer requirements determined, reviewed and communicated?",
            "Is design and development of products and services controlled?",
            "Are externally provided processes, products and services controlled?",
            "Is production and service provision carried out under controlled conditions?",
            "Is release of products and services verified against requirements?",
            "Are nonconforming outputs identified and controlled?",
        ],
    ),
    (
        9,
        "Performance evaluation",
        &[
            "Are monitoring, measurement, analysis and evaluation performed?",
            "Are internal audits conducted at planned intervals?",
            "Does top management review the QMS at planned intervals?",
        ],
    ),
    (
        10,
        "Improvement",
        &[
            "Are opportunities for improvement determined and acted upon?",
            "Are nonconformities reacted to with corrective action taken?",
            "Is the suitability and effectiveness of the QMS continually improved?",
        ],
    ),
];

/// Every section of the standard, in clause order
#[must_use]
pub fn standard_sections() -> Vec<Section> {
    CATALOG
        .iter()
        .map(|&(clause, title, questions)| {
            let id = section_id(clause);
            Section {
                id,
                clause: clause.to_string(),
                title: title.to_string(),
                questions: (1u8..)
                    .zip(questions.iter())
                    .map(|(sub, text)| AuditQuestion {
                        id: question_id(clause, sub),
                        section_id: id,
                        reference: format!("{clause}.{sub}"),
                        text: (*text).to_string(),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn clauses(list: &[&str]) -> SectionSelector {
    SectionSelector::Clauses {
        clauses: list.iter().map(|c| (*c).to_string()).collect(),
    }
}

fn template(id: Uuid, name: &str, description: &str, selector: SectionSelector) -> AssessmentTemplate {
    AssessmentTemplate {
        id,
        name: name.to_string(),
        description: description.to_string(),
        selector,
    }
}

/// The seven fixed assessment templates
#[must_use]
pub fn templates() -> Vec<AssessmentTemplate> {
    vec![
        template(
            FULL_AUDIT,
            "Full ISO 9001:2015 audit",
            "Every clause of the standard",
            SectionSelector::All,
        ),
        template(
            CONTEXT_AND_LEADERSHIP,
            "Context & leadership",
            "Organizational context and leadership commitment",
            clauses(&["4", "5"]),
        ),
        template(
            PLANNING_AND_SUPPORT,
            "Planning & support",
            "Risk planning, objectives, resources and documented information",
            clauses(&["6", "7"]),
        ),
        template(
            OPERATIONAL_CONTROL,
            "Operational control",
            "Planning and control of operations",
            clauses(&["8"]),
        ),
        template(
            PERFORMANCE_EVALUATION,
            "Performance evaluation",
            "Monitoring, internal audit and management review",
            clauses(&["9"]),
        ),
        template(
            CONTINUAL_IMPROVEMENT,
            "Continual improvement",
            "Nonconformity, corrective action and improvement",
            clauses(&["10"]),
        ),
        template(
            MANAGEMENT_REVIEW,
            "Management review readiness",
            "Inputs top management needs before a review",
            SectionSelector::Sections {
                section_ids: vec![section_id(5), section_id(9), section_id(10)],
            },
        ),
    ]
}

/// Look up a template by id
#[must_use]
pub fn find_template(id: Uuid) -> Option<AssessmentTemplate> {
    templates().into_iter().find(|t| t.id == id)
}

/// Sections an assessment using `template_id` covers. `None` means all sections.
///
/// Returns `None` for an unknown template id.
#[must_use]
pub fn sections_for(template_id: Option<Uuid>) -> Option<Vec<Section>> {
    let sections = standard_sections();
    match template_id {
        None => Some(sections),
        Some(id) => {
            let template = find_template(id)?;
            Some(sections.into_iter().filter(|s| template.selector.includes(s)).collect())
        }
    }
}
