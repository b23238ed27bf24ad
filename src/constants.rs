// Fixed prompt strings, user-facing notices and provider defaults.

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_PORT: u16 = 8501;

// Environment variables; all but the API key are optional overrides.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const API_URL_VAR: &str = "GROQ_API_URL";
pub const MODEL_VAR: &str = "FITCHAT_MODEL";
pub const MAX_TOKENS_VAR: &str = "FITCHAT_MAX_TOKENS";

/// Sent as the first message of every completion request.
pub const SYSTEM_INSTRUCTION: &str = "You are a strict fitness chatbot. ONLY answer fitness-related questions. \
If a question is unrelated, respond with: 'I only provide fitness-related information.'";

/// The sentence the model is told to answer with when it judges a question off-topic.
pub const REFUSAL_SENTENCE: &str = "I only provide fitness-related information";

pub const OFF_TOPIC_QUESTION_NOTICE: &str =
    "Only fitness-related questions are allowed! Please ask about health or exercise.";
pub const OFF_TOPIC_ANSWER_NOTICE: &str = "Please ask fitness-related questions only!";
pub const PROFILE_INCOMPLETE_NOTICE: &str = "Please select both height and weight to start chatting!";
pub const MISSING_API_KEY_NOTICE: &str = "API Key for Groq is missing.";

pub const HEIGHT_RANGE_CM: std::ops::RangeInclusive<u16> = 100..=250;
pub const WEIGHT_RANGE_KG: std::ops::RangeInclusive<u16> = 30..=200;
pub const DEFAULT_HEIGHT_CM: u16 = 170;
pub const DEFAULT_WEIGHT_KG: u16 = 70;

/// Lowercase so the gate can compare against the lowercased input directly.
/// Singular stems ("squat", "pushup", ...) also match their plurals.
pub const FITNESS_KEYWORDS: &[&str] = &[
    "exercise",
    "workout",
    "gym",
    "calories",
    "weight loss",
    "muscle",
    "strength",
    "fitness",
    "nutrition",
    "diet",
    "cardio",
    "training",
    "protein",
    "healthy",
    "fat loss",
    "bmi",
    "running",
    "yoga",
    "hydration",
    "stretching",
    "flexibility",
    "body fat",
    "recovery",
    "hiit",
    "lifting",
    "crossfit",
    "wellness",
    "resistance training",
    "metabolism",
    "pushup",
    "pullup",
    "squat",
    "deadlift",
    "bench press",
    "cycling",
    "marathon",
    "heart rate",
    "strength training",
    "warm-up",
    "cool-down",
    "sports",
    "weightlifting",
    "bodybuilding",
    "caloric intake",
    "macro tracking",
];
