// Gateway module for prompt composition - follows the Train Station Pattern

mod composer;

pub use composer::{
    compose_prompt, PromptContext, BLIND_CLAUSE, FIELD_NOTES_FOOTER, FIELD_NOTES_HEADER,
    MULTI_VIEW_PREFIX, REPORT_DATE_PREFIX,
};
