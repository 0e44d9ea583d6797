use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::controller::AnalysisController;
use super::mediator::OutcomeKind;
use crate::{
    app::ReportSettings,
    cli::OutputFormat,
    modes::AnalysisMode,
    report::{default_file_name, render, to_terminal, write_export, ExportFormat, ReportMeta},
    session::AnalysisResult,
    utils::log_progress,
};

/// Result of a one-shot analysis run
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    /// The analysis as stored in the session
    pub result: AnalysisResult,
    /// Human readable mode name
    pub label: String,
    /// File names of the analysed images, in upload order
    pub images: Vec<String>,
    /// Files written after the analysis
    pub exports: Vec<ExportRecord>,
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize)]
pub struct ExportRecord {
    pub format: ExportFormat,
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExecutionMetadata {
    pub model: String,
    /// Wall time of the whole run in milliseconds
    pub duration_ms: u128,
}

/// Write one format of a stored result. Without an explicit path the file
/// lands in the configured output directory under the profile's file stem.
pub fn export_result(
    result: &AnalysisResult,
    format: ExportFormat,
    path: Option<&Path>,
    settings: &ReportSettings,
) -> Result<PathBuf> {
    let profile = result.mode.profile();
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => settings.output_dir.join(default_file_name(profile, format)),
    };
    let meta = ReportMeta::for_profile(profile, settings.author.as_deref(), Local::now());
    write_export(format, &result.markdown, &meta, &path)
}

/// Runs exactly one analysis from the command line
pub struct NonInteractiveRunner {
    controller: AnalysisController,
    report: ReportSettings,
}

impl NonInteractiveRunner {
    pub fn new(controller: AnalysisController, report: ReportSettings) -> Self {
        Self { controller, report }
    }

    /// Load the images, analyze them once and write the requested exports.
    /// Errors from the analysis itself carry an [`AnalysisError`](crate::utils::AnalysisError).
    pub async fn execute<P: AsRef<Path>>(
        &self,
        images: &[P],
        mode: AnalysisMode,
        notes: Option<&str>,
        exports: &[ExportFormat],
        out_dir: Option<&Path>,
    ) -> Result<AnalysisReport> {
        let start_time = std::time::Instant::now();
        let total = 2 + exports.len();

        log_progress(1, total, format!("Caricamento di {} immagini", images.len()));
        self.controller.load_images(images).await?;

        log_progress(2, total, format!("Analisi: {}", mode.label()));
        let result = self.controller.analyze(mode, notes).await?;

        let mut settings = self.report.clone();
        if let Some(dir) = out_dir {
            settings.output_dir = dir.to_path_buf();
        }

        let mut written = Vec::with_capacity(exports.len());
        for (i, format) in exports.iter().enumerate() {
            log_progress(3 + i, total, format!("Esportazione {}", format.extension()));
            let path = export_result(&result, *format, None, &settings)?;
            written.push(ExportRecord {
                format: *format,
                path,
            });
        }

        let file_names = self.controller.with_session(|session| {
            session
                .images()
                .iter()
                .map(|image| image.payload.file_name.clone())
                .collect()
        });

        Ok(AnalysisReport {
            label: mode.label().to_string(),
            images: file_names,
            exports: written,
            metadata: ExecutionMetadata {
                model: self.controller.model_name().to_string(),
                duration_ms: start_time.elapsed().as_millis(),
            },
            result,
        })
    }

    /// Format the result according to the output format
    pub fn format_result(&self, report: &AnalysisReport, format: OutputFormat) -> String {
        format_report(report, format)
    }
}

pub fn format_report(report: &AnalysisReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_else(|e| {
            format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
        }),
        OutputFormat::Text => {
            let mut output = to_terminal(&render(&report.result.markdown));

            if !report.exports.is_empty() {
                output.push_str("\n--- Esportazioni ---\n");
                for export in &report.exports {
                    output.push_str(&format!(
                        "[{}] {}\n",
                        export.format.extension(),
                        export.path.display()
                    ));
                }
            }

            output
        }
        OutputFormat::Markdown => {
            let mut output = String::new();

            output.push_str(&report.result.markdown);
            output.push_str("\n\n---\n");
            output.push_str(&format!(
                "*{} | Immagini: {} | Modello: {} | Esito: {} | {}ms*\n",
                report.label,
                report.images.join(", "),
                report.metadata.model,
                outcome_label(report.result.outcome),
                report.metadata.duration_ms
            ));

            output
        }
    }
}

fn outcome_label(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Complete => "completo",
        OutcomeKind::Truncated => "troncato",
        OutcomeKind::Refused => "rifiutato",
        OutcomeKind::UnexpectedTermination => "interrotto",
    }
}
