//! Prompt construction for the Dr. Maya therapist agent.
//!
//! Each builder produces the full prompt text for one model call. The
//! wording is part of the product's behavior; changes here change how
//! the agent talks to patients.

use crate::domain::assessment::{AssessmentReport, Instrument};
use crate::domain::recommendation::SessionAnalysis;
use crate::domain::session::{Exchange, SessionPhase};
use crate::domain::treatment::{HomeworkAssignment, TreatmentGoal};

/// Exchanges of context carried into each conversational prompt.
const HISTORY_WINDOW: usize = 3;

/// Formats the last few exchanges as dialogue context.
pub fn recent_history(exchanges: &[Exchange]) -> String {
    let start = exchanges.len().saturating_sub(HISTORY_WINDOW);
    exchanges[start..]
        .iter()
        .map(|e| format!("Patient: {}\nTherapist: {}", e.user_input, e.ai_response))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the complete conversation as dialogue.
pub fn full_dialogue(exchanges: &[Exchange]) -> String {
    exchanges
        .iter()
        .map(|e| format!("Patient: {}\nTherapist: {}", e.user_input, e.ai_response))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats just the patient side of the conversation.
pub fn patient_lines(exchanges: &[Exchange]) -> String {
    exchanges
        .iter()
        .map(|e| e.user_input.clone())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Opening greeting for a brand new session.
pub fn greeting(patient_name: &str) -> String {
    format!(
        "You are Dr. Maya, a warm, professional AI therapist. You are starting a new therapy session with {patient_name}.\n\n\
         Greet them warmly and naturally begin exploring what brings them to therapy today. Be empathetic and use open-ended questions. Keep it conversational and welcoming.\n\n\
         Start with something like welcoming them and asking what's been on their mind lately or what brought them to seek therapy.\n\n\
         Keep your greeting under 100 words."
    )
}

/// Conversational reply prompt for the session's current phase.
pub fn phase_reply(
    phase: SessionPhase,
    patient_name: &str,
    user_input: &str,
    exchanges: &[Exchange],
    symptoms: &[String],
) -> String {
    let history = recent_history(exchanges);
    match phase {
        SessionPhase::Intake => intake(patient_name, user_input, &history),
        SessionPhase::Assessment => assessment(patient_name, user_input, &history, symptoms),
        SessionPhase::Therapy => therapy(patient_name, user_input, &history, symptoms),
        SessionPhase::GoalSetting => goal_setting(patient_name, user_input, &history),
        SessionPhase::HomeworkAssignment => homework(patient_name, user_input, &history),
        SessionPhase::Closing | SessionPhase::Completed => {
            general(patient_name, user_input, &history)
        }
    }
}

fn intake(patient_name: &str, user_input: &str, history: &str) -> String {
    format!(
        "You are Dr. Maya, a warm, professional AI therapist conducting an intake session with {patient_name}. \n\n\
         Your goals during intake:\n\
         - Understand their current mental health concerns and symptoms\n\
         - Explore what brought them to therapy today\n\
         - Assess their life stressors and challenges\n\
         - Understand their support systems\n\
         - Identify any safety concerns\n\
         - Build rapport and trust\n\n\
         Conversation so far:\n{history}\n\n\
         Patient just said: \"{user_input}\"\n\n\
         Respond as Dr. Maya with empathy and ask thoughtful follow-up questions. Be a skilled therapist who listens carefully and guides the conversation naturally. If they mention symptoms of depression, anxiety, trauma, or other concerns, explore gently but thoroughly.\n\n\
         Keep your response conversational, supportive, and under 150 words."
    )
}

fn assessment(patient_name: &str, user_input: &str, history: &str, symptoms: &[String]) -> String {
    let symptoms_text = if symptoms.is_empty() {
        "general mental health concerns".to_string()
    } else {
        symptoms.join(", ")
    };

    format!(
        "You are Dr. Maya conducting a thorough therapeutic assessment with {patient_name}. \n\n\
         Based on your conversation, you've identified concerns with: {symptoms_text}\n\n\
         Your assessment goals:\n\
         - Conduct formal assessment questions (PHQ-9 for depression, GAD-7 for anxiety)\n\
         - Ask about symptom frequency, severity, and duration\n\
         - Explore impact on daily functioning\n\
         - Assess for safety risks\n\n\
         Conversation history:\n{history}\n\n\
         Patient just said: \"{user_input}\"\n\n\
         Continue your assessment by asking specific, structured questions. You can ask the formal PHQ-9 or GAD-7 questions directly, or explore symptoms systematically. Be thorough but gentle. If you haven't started formal assessment questions yet, begin with: \"I'd like to ask you some specific questions to better understand what you're experiencing. These are standard questions I ask all my patients.\"\n\n\
         Keep response under 150 words and focus on assessment."
    )
}

fn therapy(patient_name: &str, user_input: &str, history: &str, symptoms: &[String]) -> String {
    let symptoms_text = if symptoms.is_empty() {
        "general concerns".to_string()
    } else {
        symptoms.join(", ")
    };

    format!(
        "You are Dr. Maya conducting therapy with {patient_name} using CBT techniques.\n\n\
         Detected symptoms/concerns: {symptoms_text}\n\n\
         CBT Focus Areas:\n\
         - Identify thought patterns and cognitive distortions\n\
         - Explore connections between thoughts, feelings, and behaviors\n\
         - Challenge negative thinking patterns\n\
         - Develop coping strategies and behavioral interventions\n\
         - Provide psychoeducation about their symptoms\n\n\
         Conversation history:\n{history}\n\n\
         Patient just said: \"{user_input}\"\n\n\
         Respond as a skilled CBT therapist. Use cognitive restructuring, behavioral activation, and other CBT techniques. Be therapeutic, insightful, and help them understand the connections between their thoughts, feelings, and behaviors.\n\n\
         Keep response under 150 words and be therapeutically helpful."
    )
}

fn goal_setting(patient_name: &str, user_input: &str, history: &str) -> String {
    format!(
        "You are Dr. Maya helping {patient_name} set therapeutic goals.\n\n\
         Based on your conversation, help them identify:\n\
         - Specific, measurable, achievable goals\n\
         - Symptom reduction goals\n\
         - Functional improvement goals  \n\
         - Behavioral change goals\n\n\
         Make goals SMART (Specific, Measurable, Achievable, Relevant, Time-bound).\n\n\
         Conversation history:\n{history}\n\n\
         Patient just said: \"{user_input}\"\n\n\
         Guide them to articulate clear, achievable goals. Ask about what they want to be different and how they'll know when they've made progress. Help them prioritize 2-3 main goals for treatment.\n\n\
         Keep response under 150 words and focus on collaborative goal setting."
    )
}

fn homework(patient_name: &str, user_input: &str, history: &str) -> String {
    format!(
        "You are Dr. Maya assigning therapeutic homework to {patient_name}.\n\n\
         Based on your conversation and their goals, assign appropriate homework:\n\
         - Thought records for cognitive work\n\
         - Activity scheduling for behavioral activation\n\
         - Mindfulness exercises for anxiety\n\
         - Exposure exercises if appropriate\n\
         - Journaling for insight and tracking\n\n\
         Conversation history:\n{history}\n\n\
         Patient just said: \"{user_input}\"\n\n\
         Assign specific, manageable homework that matches their treatment goals and current capabilities. Explain clearly what they should do, when, and why it will help. Be encouraging and set them up for success.\n\n\
         Keep response under 150 words and be specific about homework assignments."
    )
}

fn general(patient_name: &str, user_input: &str, history: &str) -> String {
    format!(
        "You are Dr. Maya, a professional AI therapist in session with {patient_name}.\n\n\
         Conversation history:\n{history}\n\n\
         Patient just said: \"{user_input}\"\n\n\
         Respond thoughtfully as a professional therapist. Be supportive, insightful, and therapeutic. Keep response under 150 words."
    )
}

/// Prompt asking the model to simulate instrument responses from the
/// conversation so far.
pub fn assessment_simulation(instrument: Instrument, exchanges: &[Exchange]) -> String {
    let conversation_text = exchanges
        .iter()
        .map(|e| format!("Patient: {}", e.user_input))
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = format!(
        "Based on this therapy conversation, simulate realistic {} assessment responses:\n\n\
         Conversation:\n{conversation_text}\n\n\
         Assessment: {}\n\n\
         For each question, select the most appropriate response (0-3) based on the patient's described symptoms:\n\
         0 = Not at all\n\
         1 = Several days  \n\
         2 = More than half the days\n\
         3 = Nearly every day\n\n\
         Questions:\n",
        instrument.key(),
        instrument.display_name(),
    );

    for (i, question) in instrument.items().iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, question));
    }

    prompt.push_str("\nRespond with just numbers separated by spaces (e.g., '2 1 3 1 0 2 1 2 3'):");
    prompt
}

/// Prompt asking for three SMART treatment goals.
pub fn treatment_goals(patient_name: &str, exchanges: &[Exchange], symptoms: &[String]) -> String {
    format!(
        "Based on this therapy conversation with {patient_name}, create 3 specific SMART treatment goals:\n\n\
         Patient conversation summary: {}\n\
         Detected symptoms: {}\n\n\
         Create goals that are:\n\
         - Specific and measurable\n\
         - Address the patient's main concerns  \n\
         - Achievable within 3-6 months\n\n\
         Format exactly as:\n\
         1. [Symptom] Specific goal description\n\
         2. [Behavioral] Specific goal description  \n\
         3. [Functional] Specific goal description\n\n\
         Only respond with the 3 numbered goals.",
        patient_lines(exchanges),
        symptoms.join(", "),
    )
}

/// Prompt asking for one homework assignment that fits the goals.
pub fn homework_assignment(
    patient_name: &str,
    symptoms: &[String],
    created_goals: &[String],
) -> String {
    format!(
        "Based on the therapy conversation, create 1 specific homework assignment for {patient_name}:\n\n\
         Symptoms: {}\n\
         Goals: {}\n\n\
         Create a homework assignment that:\n\
         - Is specific and actionable\n\
         - Matches their symptoms and goals\n\
         - Is achievable in one week\n\n\
         Respond with just: [Type] Assignment description",
        symptoms.join(", "),
        created_goals.join("; "),
    )
}

/// Prompt asking for narrative clinical insights about a session.
pub fn clinical_insights(
    patient_name: &str,
    total_exchanges: u32,
    phase: SessionPhase,
    symptoms: &[String],
    exchanges: &[Exchange],
) -> String {
    format!(
        "Analyze this therapy session and provide professional clinical insights:\n\n\
         Patient: {patient_name}\n\
         Session Length: {total_exchanges} exchanges\n\
         Phases Completed: {phase}\n\
         Detected Symptoms: {}\n\n\
         Conversation:\n{}\n\n\
         Provide insights on:\n\
         1. Key themes and patterns identified\n\
         2. Patient's primary concerns and symptoms\n\
         3. Therapeutic progress and engagement\n\
         4. Recommended next steps\n\
         5. Risk factors or concerns (if any)\n\n\
         Keep analysis professional and concise.",
        symptoms.join(", "),
        full_dialogue(exchanges),
    )
}

/// Prompt asking for a structured diagnostic assessment in JSON.
pub fn auto_diagnosis(
    patient_name: &str,
    symptoms: &[String],
    exchanges: &[Exchange],
    report: Option<&AssessmentReport>,
) -> String {
    let mut assessment_summary = String::new();
    if let Some(report) = report.filter(|r| !r.is_empty()) {
        assessment_summary.push_str("\nAssessment Results:\n");
        for (key, result) in report.iter() {
            assessment_summary.push_str(&format!(
                "- {}: Score {} ({})\n",
                key, result.total_score, result.severity
            ));
        }
    }

    format!(
        "Based on this therapy session, provide a preliminary clinical diagnosis assessment:\n\n\
         Patient: {patient_name}\n\
         Detected Symptoms: {}\n\n\
         Conversation Summary:\n{}\n\n\
         {assessment_summary}\n\n\
         Provide a structured diagnostic assessment including:\n\
         1. Primary diagnosis (most likely)\n\
         2. Severity level\n\
         3. Confidence level (preliminary/probable/definitive)\n\
         4. Supporting evidence from the session\n\
         5. Differential diagnoses to consider\n\
         6. Ruling out other conditions\n\
         7. Clinical notes and recommendations\n\n\
         Format as JSON:\n\
         {{\n\
             \"primary_diagnosis\": \"diagnosis name\",\n\
             \"diagnosis_code\": \"ICD-10 or DSM-5 code if applicable\",\n\
             \"severity\": \"mild/moderate/severe\",\n\
             \"confidence_level\": \"preliminary/probable/definitive\",\n\
             \"supporting_evidence\": \"specific evidence from session\",\n\
             \"differential_diagnoses\": [\"alternative diagnosis 1\", \"alternative diagnosis 2\"],\n\
             \"ruling_out\": [\"conditions to rule out\"],\n\
             \"clinical_notes\": \"professional clinical observations\",\n\
             \"recommendations\": \"next steps and treatment recommendations\"\n\
         }}\n\n\
         Focus on evidence-based diagnostic criteria. Be conservative with confidence levels.",
        symptoms.join(", "),
        full_dialogue(exchanges),
    )
}

/// Prompt asking for keyword and theme extraction in JSON.
pub fn keyword_extraction(exchanges: &[Exchange]) -> String {
    format!(
        "\nAnalyze this therapy session conversation and extract key information for generating recommendations:\n\n\
         CONVERSATION:\n{}\n\n\
         Extract and provide:\n\
         1. PRIMARY SYMPTOMS: Main mental health symptoms discussed (anxiety, depression, trauma, etc.)\n\
         2. SECONDARY CONCERNS: Related issues (sleep, relationships, work, etc.)  \n\
         3. THERAPEUTIC THEMES: Key themes that emerged (cognitive patterns, behaviors, emotions)\n\
         4. COPING CHALLENGES: Specific difficulties the patient faces\n\
         5. STRENGTHS IDENTIFIED: Patient's existing strengths and resources\n\
         6. LEARNING NEEDS: Areas where patient needs education or skills\n\
         7. EMOTIONAL STATE: Current emotional patterns and mood\n\
         8. BEHAVIORAL PATTERNS: Specific behaviors or habits mentioned\n\
         9. TRIGGERS: Identified triggers or stressors\n\
         10. MOTIVATION LEVEL: Patient's readiness for change and engagement\n\n\
         Format your response as JSON:\n\
         {{\n\
             \"primary_symptoms\": [\"symptom1\", \"symptom2\"],\n\
             \"secondary_concerns\": [\"concern1\", \"concern2\"],\n\
             \"therapeutic_themes\": [\"theme1\", \"theme2\"],\n\
             \"coping_challenges\": [\"challenge1\", \"challenge2\"],\n\
             \"strengths\": [\"strength1\", \"strength2\"],\n\
             \"learning_needs\": [\"need1\", \"need2\"],\n\
             \"emotional_state\": \"description\",\n\
             \"behavioral_patterns\": [\"pattern1\", \"pattern2\"],\n\
             \"triggers\": [\"trigger1\", \"trigger2\"],\n\
             \"motivation_level\": \"high/medium/low\",\n\
             \"session_summary\": \"2-3 sentence summary of key session themes\"\n\
         }}\n",
        full_dialogue(exchanges),
    )
}

/// Prompt asking for educational content recommendations in JSON.
pub fn content_recommendations(analysis: &SessionAnalysis, count: usize) -> String {
    format!(
        "\nBased on this therapy session analysis, recommend {count} educational/therapeutic content pieces:\n\n\
         SESSION ANALYSIS:\n\
         - Primary Symptoms: {}\n\
         - Secondary Concerns: {}\n\
         - Learning Needs: {}\n\
         - Therapeutic Themes: {}\n\
         - Session Summary: {}\n\n\
         Generate recommendations for:\n\
         1. YouTube videos (educational, guided meditations, techniques)\n\
         2. Articles or blog posts\n\
         3. Podcasts\n\
         4. Mobile apps\n\
         5. Online resources\n\n\
         For each recommendation, provide:\n\
         - Title: Specific, searchable title\n\
         - Description: Why this content is helpful for this patient\n\
         - Content Type: youtube/article/podcast/app\n\
         - Search Query: Exact search terms to find this content\n\
         - Relevance Reason: How it addresses patient's specific needs\n\
         - Estimated Duration: How long to engage with this content\n\n\
         Format as JSON array:\n\
         [\n\
           {{\n\
             \"title\": \"specific title\",\n\
             \"description\": \"why this helps the patient\",\n\
             \"content_type\": \"youtube/article/podcast/app\",\n\
             \"search_query\": \"exact search terms\",\n\
             \"relevance_reason\": \"how it addresses their needs\",\n\
             \"estimated_duration\": \"10 minutes/30 minutes/etc\"\n\
           }}\n\
         ]\n\n\
         Focus on evidence-based, professional content. Avoid overly clinical or triggering material.\n",
        analysis.primary_symptoms.join(", "),
        analysis.secondary_concerns.join(", "),
        analysis.learning_needs.join(", "),
        analysis.therapeutic_themes.join(", "),
        analysis.session_summary,
    )
}

/// Prompt asking for lifestyle activity recommendations in JSON.
pub fn lifestyle_recommendations(
    analysis: &SessionAnalysis,
    goals: &[TreatmentGoal],
    homework: &[HomeworkAssignment],
    count: usize,
) -> String {
    let goals_text = if goals.is_empty() {
        "No specific goals set yet.".to_string()
    } else {
        goals
            .iter()
            .map(|g| format!("- {}: {}", g.goal_type, g.description))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let homework_text = if homework.is_empty() {
        "No homework assignments yet.".to_string()
    } else {
        homework
            .iter()
            .map(|hw| format!("- {}: {}", hw.assignment_type, hw.description))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "\nBased on this therapy session analysis and treatment plan, recommend {count} lifestyle activities:\n\n\
         SESSION ANALYSIS:\n\
         - Primary Symptoms: {}\n\
         - Behavioral Patterns: {}\n\
         - Triggers: {}\n\
         - Motivation Level: {}\n\n\
         TREATMENT GOALS:\n{goals_text}\n\n\
         HOMEWORK ASSIGNMENTS:\n{homework_text}\n\n\
         Generate {count} lifestyle recommendations that:\n\
         1. Support the patient's treatment goals\n\
         2. Complement their homework assignments\n\
         3. Address their specific symptoms and triggers\n\
         4. Match their motivation level\n\
         5. Are practical and achievable\n\n\
         Include a mix of:\n\
         - Physical activities (exercise, movement, outdoor activities)\n\
         - Mental activities (mindfulness, creativity, learning)\n\
         - Social activities (connection, communication)\n\
         - Self-care activities (relaxation, routines, hobbies)\n\n\
         For each recommendation provide:\n\
         - Title: Clear, actionable title\n\
         - Description: What the activity involves\n\
         - Activity Type: physical/mental/social/self_care\n\
         - Instructions: Step-by-step how to do it\n\
         - Frequency: How often to do it\n\
         - Duration: How long each session\n\
         - Difficulty Level: beginner/intermediate/advanced\n\
         - Relates to Goal: Which goal it supports (if applicable)\n\
         - Relates to Homework: Which homework it complements (if applicable)\n\n\
         Format as JSON array:\n\
         [\n\
           {{\n\
             \"title\": \"specific activity title\",\n\
             \"description\": \"what this activity involves\",\n\
             \"activity_type\": \"physical/mental/social/self_care\",\n\
             \"instructions\": \"step-by-step instructions\",\n\
             \"frequency\": \"daily/3x week/weekly/etc\",\n\
             \"duration\": \"10 minutes/30 minutes/etc\",\n\
             \"difficulty_level\": \"beginner/intermediate/advanced\",\n\
             \"relates_to_goal\": \"goal description if applicable\",\n\
             \"relates_to_homework\": \"homework type if applicable\"\n\
           }}\n\
         ]\n\n\
         Focus on evidence-based wellness activities. Consider the patient's current capacity and symptoms.\n",
        analysis.primary_symptoms.join(", "),
        analysis.behavioral_patterns.join(", "),
        analysis.triggers.join(", "),
        analysis.motivation_level,
    )
}
