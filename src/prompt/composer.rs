use chrono::{DateTime, Local};

use crate::constants::REPORT_TIMESTAMP_FORMAT;
use crate::modes::AnalysisMode;

/// Opens the field notes section
pub const FIELD_NOTES_HEADER: &str = "--- NOTE DI CAMPO ---";
/// Closes the field notes section
pub const FIELD_NOTES_FOOTER: &str = "--------------------------------------------------";
/// Appended when the user gave no context at all
pub const BLIND_CLAUSE: &str =
    "(Nessun contesto fornito: procedere con analisi \"Blind\" morfologica pura, senza presupposti sul contesto.)";
/// Start of the clause added when several images are sent together
pub const MULTI_VIEW_PREFIX: &str = "NOTA: Ti sono state fornite";
/// Start of the clause that pins the report date
pub const REPORT_DATE_PREFIX: &str = "DATA DEL RAPPORTO:";

/// Everything the prompt depends on besides the mode template
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub image_count: usize,
    pub notes: Option<&'a str>,
    pub now: DateTime<Local>,
}

/// Build the instruction text for one analysis.
///
/// Order: mode template, report date (dated modes only), multi-view clause
/// (two or more images), then either the field notes section or the blind
/// clause.
pub fn compose_prompt(mode: AnalysisMode, context: &PromptContext<'_>) -> String {
    let profile = mode.profile().spec();
    let mut prompt = mode.template().to_string();

    if mode.is_dated_report() {
        let stamp = context.now.format(REPORT_TIMESTAMP_FORMAT);
        prompt.push_str(&format!(
            "\n\n{} {}\nUsa esattamente questa data e ora nell'intestazione del documento. Non inventare né stimare date.",
            REPORT_DATE_PREFIX, stamp
        ));
    }

    if context.image_count > 1 {
        prompt.push_str(&format!(
            "\n\n{} {} immagini. Considerale come viste {}. Usale tutte per un'analisi incrociata (diverse luci, angolazioni, dettagli e totali).",
            MULTI_VIEW_PREFIX, context.image_count, profile.subject
        ));
    }

    match context.notes.filter(|notes| !notes.trim().is_empty()) {
        Some(notes) => {
            prompt.push_str(&format!(
                "\n\n{}\n\"{}\"\n\nISTRUZIONI:\n{}\n{}\n",
                FIELD_NOTES_HEADER, notes, profile.notes_instruction, FIELD_NOTES_FOOTER
            ));
        }
        None => {
            prompt.push_str("\n\n");
            prompt.push_str(BLIND_CLAUSE);
        }
    }

    prompt
}
