//! Treatment planning: goals, homework assignments, and the generated
//! plan summary stored on a session.

mod goal;
mod homework;
mod plan;

pub use goal::{GoalCategory, Progress, TreatmentGoal, GOAL_TARGET_DAYS};
pub use homework::{
    HomeworkAssignment, DEFAULT_ASSIGNMENT_TYPE, HOMEWORK_DUE_DAYS, STANDARD_INSTRUCTIONS,
};
pub use plan::{
    parse_goal_lines, parse_homework_line, HomeworkSummary, ParsedGoal, ParsedHomework,
    TreatmentPlan, MAX_GOALS_PER_PLAN,
};
