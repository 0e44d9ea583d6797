// Gateway module for report presentation and export - Train Station Pattern

mod export;
mod pdf;
mod render;

pub use export::{
    default_file_name, doc_bytes, escape_html, export_bytes, markdown_bytes, write_export,
    ExportFormat, ReportMeta,
};
pub use pdf::{body_line_width, paginate, pdf_bytes, wrap_text, PlacedLine};
pub use render::{parse_inline, render, to_terminal, Block, Inline, ListMarker};
