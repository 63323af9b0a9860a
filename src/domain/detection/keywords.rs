//! Fixed keyword tables for lexical detection.
//!
//! These tables are the detection contract: matching is case-insensitive
//! substring containment against exactly these phrases.

/// Symptom groups and their trigger keywords.
pub const SYMPTOM_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "anxiety",
        &["anxious", "worried", "panic", "nervous", "fear", "racing thoughts", "restless"],
    ),
    (
        "depression",
        &["depressed", "sad", "hopeless", "empty", "worthless", "tired", "no energy"],
    ),
    (
        "sleep",
        &["sleep", "insomnia", "tired", "exhausted", "wake up", "nightmares"],
    ),
    (
        "social",
        &["social", "friends", "lonely", "isolated", "avoid people", "relationships"],
    ),
    (
        "work_stress",
        &["work", "job", "boss", "career", "stressed", "overwhelmed"],
    ),
];

/// Mood indicators and their trigger keywords.
pub const MOOD_INDICATORS: &[(&str, &[&str])] = &[
    ("low_mood", &["sad", "down", "depressed", "low", "awful"]),
    ("anxiety", &["anxious", "worried", "nervous", "panic", "scared"]),
    ("irritability", &["angry", "mad", "frustrated", "irritated"]),
];

/// Behavioral patterns and their trigger keywords.
pub const BEHAVIORAL_PATTERNS: &[(&str, &[&str])] = &[
    ("avoidance", &["avoid", "staying home", "cancelled", "didn't go"]),
    ("sleep_disturbance", &["can't sleep", "insomnia", "staying up", "tossing"]),
];

/// Cognitive distortion patterns and their trigger phrases.
pub const COGNITIVE_PATTERNS: &[(&str, &[&str])] = &[
    (
        "all_or_nothing_thinking",
        &["i always", "i never", "everything is", "nothing works"],
    ),
    ("catastrophizing", &["what if", "probably will", "going to happen"]),
];

/// Crisis language requiring a safety flag.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "hurt myself",
    "die",
    "death",
    "better off dead",
    "end my life",
    "take my life",
    "harm myself",
];
