//! Plain-text transcript export.
//!
//! Pure formatting over the session aggregate. The layout matches the
//! printable report handed to patients: header block, per-exchange
//! dialogue, then assessment and treatment plan appendices when
//! present.

use std::fmt::Write;

use crate::domain::foundation::Timestamp;
use crate::domain::session::TherapySession;

/// Renders the full session transcript as plain text.
pub fn format_transcript(session: &TherapySession, patient_name: &str) -> String {
    let mut out = String::new();

    let symptoms = if session.detected_symptoms().is_empty() {
        "None detected".to_string()
    } else {
        session.detected_symptoms().join(", ")
    };

    let _ = write!(
        out,
        "AI THERAPY SESSION TRANSCRIPT\n\
         Session ID: {}\n\
         Patient: {}\n\
         Date: {}\n\
         Duration: {} exchanges\n\
         Final Phase: {}\n\
         Completed: {}\n\
         \n\
         DETECTED SYMPTOMS:\n\
         {}\n\
         \n\
         CONVERSATION TRANSCRIPT:\n\
         {}\n",
        session.id(),
        patient_name,
        session.session_date().to_rfc3339(),
        session.exchange_count(),
        session.phase(),
        if session.is_completed() { "Yes" } else { "No" },
        symptoms,
        "=".repeat(50),
    );

    for (i, exchange) in session.exchanges().iter().enumerate() {
        let _ = write!(
            out,
            "\nExchange {} [{}]:\n\
             Patient: {}\n\
             Dr. Maya: {}\n\
             Time: {}\n\
             {}\n",
            i + 1,
            exchange.phase,
            exchange.user_input,
            exchange.ai_response,
            exchange.timestamp.to_rfc3339(),
            "-".repeat(30),
        );
    }

    if let Some(report) = session.assessment_report() {
        if !report.is_empty() {
            let _ = write!(out, "\nASSESSMENT RESULTS:\n{}\n", "=".repeat(20));
            for (key, result) in report.iter() {
                let _ = write!(
                    out,
                    "\n{}:\n\
                     Total Score: {}\n\
                     Severity: {}\n\
                     Interpretation: {}\n",
                    key, result.total_score, result.severity, result.interpretation,
                );
            }
        }
    }

    if let Some(plan) = session.treatment_plan() {
        let _ = write!(out, "\nTREATMENT PLAN:\n{}\n", "=".repeat(15));
        out.push_str("Goals:\n");
        for (i, goal) in plan.goals.iter().enumerate() {
            let _ = write!(out, "{}. {}\n", i + 1, goal);
        }
        let _ = write!(
            out,
            "\nHomework Assignment:\n\
             Type: {}\n\
             Description: {}\n",
            plan.homework.assignment_type, plan.homework.description,
        );
    }

    let _ = write!(
        out,
        "\n\nSession exported on: {}",
        Timestamp::now().to_rfc3339()
    );

    out
}
