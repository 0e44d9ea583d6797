use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::pdf::pdf_bytes;
use crate::constants::REPORT_TIMESTAMP_FORMAT;
use crate::modes::Profile;

/// Downloadable report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raw model text
    Markdown,
    /// Word-importable HTML
    Doc,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Doc => "doc",
            Self::Pdf => "pdf",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "doc" | "word" => Some(Self::Doc),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Header data printed around the report body
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub pdf_title: String,
    pub doc_title: String,
    pub product_name: String,
    pub author: Option<String>,
    /// Already formatted, so exports stay pure functions of their input
    pub generated_at: String,
}

impl ReportMeta {
    pub fn for_profile(profile: Profile, author: Option<&str>, generated_at: DateTime<Local>) -> Self {
        let spec = profile.spec();
        Self {
            pdf_title: spec.pdf_title.to_string(),
            doc_title: spec.doc_title.to_string(),
            product_name: spec.product_name.to_string(),
            author: author
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            generated_at: generated_at.format(REPORT_TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Date line under the title
    pub fn byline(&self) -> String {
        match &self.author {
            Some(author) => format!("Autore: {} | Data: {}", author, self.generated_at),
            None => format!("Data: {}", self.generated_at),
        }
    }
}

pub fn markdown_bytes(content: &str) -> Vec<u8> {
    content.as_bytes().to_vec()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const UTF8_BOM: &str = "\u{feff}";

/// HTML that Word opens as a print-layout document
pub fn doc_bytes(content: &str, meta: &ReportMeta) -> Vec<u8> {
    let html = format!(
        r##"<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
<head>
<meta charset='utf-8'>
<title>{title}</title>
<xml>
<w:WordDocument>
<w:View>Print</w:View>
<w:Zoom>100</w:Zoom>
</w:WordDocument>
</xml>
<style>
@page {{
    size: 21cm 29.7cm;
    margin: 2.54cm 2.54cm 2.54cm 2.54cm;
    mso-page-orientation: portrait;
}}
body {{
    font-family: 'Courier New', Courier, monospace;
    font-size: 12.0pt;
}}
</style>
</head>
<body style="font-family: 'Courier New', Courier, monospace; font-size: 12.0pt;">
<div style="font-family: Arial, sans-serif; margin-bottom: 20px;">
<h2 style="font-size: 16pt; margin-bottom: 5px;">{title}</h2>
<p style="font-size: 10pt; color: #555; margin-top: 0;">Generato il: {generated}{author}</p>
<hr size="1" color="#000000" />
</div>
<div style="font-family: 'Courier New', Courier, monospace; font-size: 12.0pt; line-height: 1.2; white-space: pre-wrap;">{body}</div></body></html>"##,
        title = escape_html(&meta.doc_title),
        generated = escape_html(&meta.generated_at),
        author = meta
            .author
            .as_deref()
            .map(|a| format!(" | Autore: {}", escape_html(a)))
            .unwrap_or_default(),
        body = escape_html(content),
    );

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + html.len());
    bytes.extend_from_slice(UTF8_BOM.as_bytes());
    bytes.extend_from_slice(html.as_bytes());
    bytes
}

pub fn export_bytes(format: ExportFormat, content: &str, meta: &ReportMeta) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Markdown => Ok(markdown_bytes(content)),
        ExportFormat::Doc => Ok(doc_bytes(content, meta)),
        ExportFormat::Pdf => pdf_bytes(content, meta).context("Failed to build PDF report"),
    }
}

/// `Rapporto_Forense.pdf`, `Scheda_Rilievo.md`, ...
pub fn default_file_name(profile: Profile, format: ExportFormat) -> String {
    format!("{}.{}", profile.spec().file_stem, format.extension())
}

/// Write one export to `path`, creating parent directories as needed
pub fn write_export(format: ExportFormat, content: &str, meta: &ReportMeta, path: &Path) -> Result<PathBuf> {
    let bytes = export_bytes(format, content, meta)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(path.to_path_buf())
}
