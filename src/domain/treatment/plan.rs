//! Treatment plan generation: parsing model output into goals and
//! homework, and the plan summary stored on the session.

use serde::{Deserialize, Serialize};

use super::goal::GoalCategory;
use super::homework::DEFAULT_ASSIGNMENT_TYPE;
use crate::domain::foundation::Timestamp;

/// Maximum number of goals taken from one generation pass.
pub const MAX_GOALS_PER_PLAN: usize = 3;

/// A goal line parsed out of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGoal {
    /// The raw bracketed tag, lowercased ("symptom", "emotional", ...).
    pub raw_tag: String,

    /// Validated category; unknown tags collapse to `Symptom`.
    pub category: GoalCategory,

    /// Goal description text.
    pub description: String,
}

impl ParsedGoal {
    /// Display form used in plan summaries, e.g. "Behavioral: Take daily walks".
    ///
    /// Uses the raw tag even when it fell outside the valid category set.
    pub fn display_label(&self) -> String {
        format!("{}: {}", title_case(&self.raw_tag), self.description)
    }
}

/// A homework line parsed out of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHomework {
    pub assignment_type: String,
    pub description: String,
}

/// Extracts up to three goal lines from generated text.
///
/// A line counts as a goal when its first character is a digit. Lines
/// shaped "1. [Tag] description" split on the brackets; lines without
/// brackets drop their two-character numeric prefix and default to the
/// symptom category.
pub fn parse_goal_lines(text: &str) -> Vec<ParsedGoal> {
    text.lines()
        .filter(|line| {
            !line.trim().is_empty() && line.chars().next().is_some_and(|c| c.is_ascii_digit())
        })
        .take(MAX_GOALS_PER_PLAN)
        .map(|line| parse_goal_line(line.trim()))
        .collect()
}

fn parse_goal_line(line: &str) -> ParsedGoal {
    if let Some((tag, description)) = split_bracketed(line) {
        let raw_tag = tag.to_lowercase();
        let category = GoalCategory::from_tag(&raw_tag);
        ParsedGoal {
            raw_tag,
            category,
            description,
        }
    } else {
        // No bracket tag: drop the "1." prefix and keep the rest.
        let description = line.get(2..).unwrap_or("").trim().to_string();
        ParsedGoal {
            raw_tag: "symptom".to_string(),
            category: GoalCategory::Symptom,
            description,
        }
    }
}

/// Parses a "[Type] description" homework line.
///
/// The tag is lowercased with spaces replaced by underscores. Text
/// without brackets becomes a thought record with the whole line as
/// its description.
pub fn parse_homework_line(text: &str) -> ParsedHomework {
    if let Some((tag, description)) = split_bracketed(text) {
        ParsedHomework {
            assignment_type: tag.to_lowercase().replace(' ', "_"),
            description,
        }
    } else {
        ParsedHomework {
            assignment_type: DEFAULT_ASSIGNMENT_TYPE.to_string(),
            description: text.to_string(),
        }
    }
}

/// Splits "prefix [Tag] rest" into (Tag, rest). Returns `None` when the
/// text carries no complete bracket pair.
fn split_bracketed(text: &str) -> Option<(String, String)> {
    if !(text.contains('[') && text.contains(']')) {
        return None;
    }
    let after_open = text.split('[').nth(1)?;
    let tag = after_open.split(']').next()?.to_string();
    let description = text.split(']').nth(1)?.trim().to_string();
    Some((tag, description))
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plan summary stored on the session once goals and homework exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    /// Display labels of the created goals.
    pub goals: Vec<String>,

    /// Summary of the created homework assignment.
    pub homework: HomeworkSummary,

    /// When the plan was generated.
    pub generated_date: Timestamp,
}

/// The homework portion of a plan summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkSummary {
    #[serde(rename = "type")]
    pub assignment_type: String,
    pub description: String,
}

impl TreatmentPlan {
    pub fn new(goals: Vec<String>, homework: HomeworkSummary) -> Self {
        Self {
            goals,
            homework,
            generated_date: Timestamp::now(),
        }
    }
}
