/// Constants module to avoid magic numbers in the codebase

// Model endpoint
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_HEADER: &str = "x-goog-api-key";

// Generation parameters
pub const DEFAULT_TEMPERATURE: f32 = 0.2; // low randomness for technical reports
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const DEFAULT_SAFETY_THRESHOLD: &str = "BLOCK_NONE";
pub const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

// Image intake
pub const PREVIEW_URL_SCHEME: &str = "preview";

// Report layout (PDF units are millimetres on A4, converted at write time)
pub const PDF_PAGE_WIDTH_MM: f32 = 210.0;
pub const PDF_PAGE_HEIGHT_MM: f32 = 297.0;
pub const PDF_MARGIN_LEFT_MM: f32 = 10.0;
pub const PDF_TEXT_WIDTH_MM: f32 = 180.0;
pub const PDF_TITLE_Y_MM: f32 = 20.0;
pub const PDF_SUBTITLE_Y_MM: f32 = 30.0;
pub const PDF_RULE_Y_MM: f32 = 35.0;
pub const PDF_RULE_END_X_MM: f32 = 200.0;
pub const PDF_BODY_START_Y_MM: f32 = 45.0;
pub const PDF_CONTINUATION_Y_MM: f32 = 20.0;
pub const PDF_BODY_LIMIT_Y_MM: f32 = 280.0;
pub const PDF_LINE_HEIGHT_MM: f32 = 5.0;
pub const PDF_FOOTER_Y_MM: f32 = 290.0;
pub const PDF_TITLE_FONT_SIZE: f32 = 16.0;
pub const PDF_SUBTITLE_FONT_SIZE: f32 = 10.0;
pub const PDF_BODY_FONT_SIZE: f32 = 11.0;
pub const PDF_FOOTER_FONT_SIZE: f32 = 8.0;
pub const COURIER_CHAR_WIDTH_EM: f32 = 0.6;

// Timestamps as shown in prompts and report headers
pub const REPORT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

// Local configuration
pub const CONFIG_ENV_PREFIX: &str = "REPERTO_";
pub const LOCAL_CONFIG_PATH: &str = ".reperto/config.toml";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
