use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::export::ReportMeta;
use crate::constants::*;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// A body line and the vertical position (mm from the top) it lands on
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y_mm: f32,
}

/// Characters of body text that fit the printable width in Courier
pub fn body_line_width() -> usize {
    let char_width_mm = COURIER_CHAR_WIDTH_EM * PDF_BODY_FONT_SIZE / POINTS_PER_MM;
    (PDF_TEXT_WIDTH_MM / char_width_mm).floor() as usize
}

/// Wrap text to `width` characters. Lines that fit are kept as written,
/// indentation and inner spacing included. Longer lines break at the last
/// space that fits, and runs without a usable space are split hard.
pub fn wrap_text(content: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for line in content.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut rest: Vec<char> = line.chars().collect();

        while rest.len() > width {
            // a break at index 0 would only emit an empty line
            match rest[..=width].iter().rposition(|&c| c == ' ').filter(|&at| at > 0) {
                Some(at) => {
                    let tail = rest.split_off(at + 1);
                    rest.pop();
                    lines.push(std::mem::replace(&mut rest, tail).into_iter().collect());
                }
                None => {
                    let tail = rest.split_off(width);
                    lines.push(std::mem::replace(&mut rest, tail).into_iter().collect());
                }
            }
        }

        lines.push(rest.into_iter().collect());
    }

    lines
}

/// Distribute wrapped lines over pages: the first page starts below the
/// header, later pages at the top margin, and a new page begins once the
/// next line would sit below the body limit.
pub fn paginate(lines: Vec<String>) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = PDF_BODY_START_Y_MM;

    for text in lines {
        if y > PDF_BODY_LIMIT_Y_MM {
            pages.push(Vec::new());
            y = PDF_CONTINUATION_Y_MM;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine { text, y_mm: y });
        }
        y += PDF_LINE_HEIGHT_MM;
    }

    pages
}

/// PDF's Courier uses WinAnsi; anything outside it prints as `?`
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x20 => b' ',
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn text_at(ops: &mut Vec<Operation>, size: f32, x_mm: f32, y_mm: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
    ops.push(Operation::new(
        "Td",
        vec![
            (x_mm * POINTS_PER_MM).into(),
            ((PDF_PAGE_HEIGHT_MM - y_mm) * POINTS_PER_MM).into(),
        ],
    ));
    ops.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]));
    ops.push(Operation::new("ET", vec![]));
}

fn footer_text(page: usize, total: usize, meta: &ReportMeta) -> String {
    match &meta.author {
        Some(author) => format!(
            "Pagina {} di {} - Documento generato da {} (Autore: {})",
            page, total, meta.product_name, author
        ),
        None => format!(
            "Pagina {} di {} - Documento generato da {}",
            page, total, meta.product_name
        ),
    }
}

/// A4 report: title, date line and rule on the first page, monospaced body,
/// numbered footer on every page.
pub fn pdf_bytes(content: &str, meta: &ReportMeta) -> Result<Vec<u8>> {
    let pages = paginate(wrap_text(content, body_line_width()));
    let total = pages.len();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(total);
    for (index, lines) in pages.iter().enumerate() {
        let mut ops = Vec::new();

        if index == 0 {
            text_at(&mut ops, PDF_TITLE_FONT_SIZE, PDF_MARGIN_LEFT_MM, PDF_TITLE_Y_MM, &meta.pdf_title);
            text_at(
                &mut ops,
                PDF_SUBTITLE_FONT_SIZE,
                PDF_MARGIN_LEFT_MM,
                PDF_SUBTITLE_Y_MM,
                &meta.byline(),
            );
            let rule_y = (PDF_PAGE_HEIGHT_MM - PDF_RULE_Y_MM) * POINTS_PER_MM;
            ops.push(Operation::new(
                "m",
                vec![(PDF_MARGIN_LEFT_MM * POINTS_PER_MM).into(), rule_y.into()],
            ));
            ops.push(Operation::new(
                "l",
                vec![(PDF_RULE_END_X_MM * POINTS_PER_MM).into(), rule_y.into()],
            ));
            ops.push(Operation::new("S", vec![]));
        }

        for line in lines.iter().filter(|line| !line.text.is_empty()) {
            text_at(&mut ops, PDF_BODY_FONT_SIZE, PDF_MARGIN_LEFT_MM, line.y_mm, &line.text);
        }

        text_at(
            &mut ops,
            PDF_FOOTER_FONT_SIZE,
            PDF_MARGIN_LEFT_MM,
            PDF_FOOTER_Y_MM,
            &footer_text(index + 1, total, meta),
        );

        let content_id = doc.add_object(Stream::new(dictionary! {}, Content { operations: ops }.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => total as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            (PDF_PAGE_WIDTH_MM * POINTS_PER_MM).into(),
            (PDF_PAGE_HEIGHT_MM * POINTS_PER_MM).into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(&meta.pdf_title)),
        "Producer" => Object::string_literal(meta.product_name.as_bytes().to_vec()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ReportMeta {
        ReportMeta {
            pdf_title: "FOTOCRIME - RAPPORTO DI ANALISI FORENSE".to_string(),
            doc_title: "FOTOCRIME - RAPPORTO TECNICO".to_string(),
            product_name: "FotoCrime".to_string(),
            author: None,
            generated_at: "14/03/2026, 09:26:53".to_string(),
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn test_body_width_in_courier_11pt() {
        assert_eq!(body_line_width(), 77);
    }

    #[test]
    fn test_wrap_keeps_breaks_and_blank_lines() {
        let lines = wrap_text("uno due tre\n\nquattro", 7);
        assert_eq!(lines, vec!["uno due", "tre", "", "quattro"]);
    }

    #[test]
    fn test_wrap_keeps_indentation_and_spacing() {
        let lines = wrap_text("1. Voce\n   - sottovoce\nA    B", 77);
        assert_eq!(lines, vec!["1. Voce", "   - sottovoce", "A    B"]);
    }

    #[test]
    fn test_wrap_breaks_indented_line_at_last_space() {
        let lines = wrap_text("  uno  due tre", 9);
        assert_eq!(lines, vec!["  uno ", "due tre"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_text("ab abcdefghij", 4);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_pagination_limits() {
        let first_page = ((PDF_BODY_LIMIT_Y_MM - PDF_BODY_START_Y_MM) / PDF_LINE_HEIGHT_MM) as usize + 1;
        let pages = paginate(vec!["x".to_string(); first_page]);
        assert_eq!(pages.len(), 1);

        let pages = paginate(vec!["x".to_string(); first_page + 1]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1][0].y_mm, PDF_CONTINUATION_Y_MM);
        assert!(pages[0].iter().all(|line| line.y_mm <= PDF_BODY_LIMIT_Y_MM));
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(win_ansi("è à"), vec![0xE8, b' ', 0xE0]);
        assert_eq!(win_ansi("“x”"), vec![0x93, b'x', 0x94]);
        assert_eq!(win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_long_report_gets_numbered_pages() {
        let content = (1..=150)
            .map(|i| format!("Riga di rapporto numero {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = pdf_bytes(&content, &meta()).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
        assert!(contains(&bytes, "Pagina 1 di 3"));
        assert!(contains(&bytes, "Pagina 3 di 3"));
        assert!(contains(&bytes, "Courier"));
    }

    #[test]
    fn test_pdf_is_deterministic() {
        let a = pdf_bytes("# Titolo\ncorpo", &meta()).unwrap();
        let b = pdf_bytes("# Titolo\ncorpo", &meta()).unwrap();
        assert_eq!(a, b);
    }
}
