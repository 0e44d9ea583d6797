use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.\s*").expect("valid regex"));

/// A run of text inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    /// The number as written by the model
    Number(String),
}

/// One rendered line of model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    ListItem { marker: ListMarker, content: Vec<Inline> },
    Spacer,
    Paragraph(Vec<Inline>),
}

/// Line-by-line transform of model output.
///
/// Each line becomes exactly one block; nothing spans lines, so nested
/// lists, tables and code fences come out as plain paragraphs.
pub fn render(text: &str) -> Vec<Block> {
    text.split('\n').map(render_line).collect()
}

fn render_line(line: &str) -> Block {
    let line = line.strip_suffix('\r').unwrap_or(line);

    for (marker, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Block::Heading {
                level,
                text: rest.to_string(),
            };
        }
    }

    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return Block::ListItem {
            marker: ListMarker::Bullet,
            content: parse_inline(rest),
        };
    }
    if let Some(caps) = NUMBERED.captures(trimmed) {
        let whole = caps.get(0).map_or(0, |m| m.end());
        return Block::ListItem {
            marker: ListMarker::Number(caps[1].to_string()),
            content: parse_inline(&trimmed[whole..]),
        };
    }

    if trimmed.is_empty() {
        return Block::Spacer;
    }

    Block::Paragraph(parse_inline(line))
}

/// Split text on `**strong**` runs
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut parts = Vec::new();
    let mut last = 0;

    for caps in STRONG.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            parts.push(Inline::Text(text[last..whole.start()].to_string()));
        }
        parts.push(Inline::Strong(caps[1].to_string()));
        last = whole.end();
    }
    if last < text.len() {
        parts.push(Inline::Text(text[last..].to_string()));
    }

    parts
}

fn inline_to_terminal(content: &[Inline]) -> String {
    content
        .iter()
        .map(|part| match part {
            Inline::Text(text) => text.normal().to_string(),
            Inline::Strong(text) => text.bold().yellow().to_string(),
        })
        .collect()
}

/// Styled text for a terminal, one output line per block
pub fn to_terminal(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        let line = match block {
            Block::Heading { level: 1, text } => text.bold().bright_white().underline().to_string(),
            Block::Heading { level: 2, text } => text.bold().cyan().to_string(),
            Block::Heading { text, .. } => text.bold().yellow().to_string(),
            Block::ListItem {
                marker: ListMarker::Bullet,
                content,
            } => format!("  {} {}", "•".yellow(), inline_to_terminal(content)),
            Block::ListItem {
                marker: ListMarker::Number(n),
                content,
            } => format!("  {} {}", format!("{}.", n).yellow(), inline_to_terminal(content)),
            Block::Spacer => String::new(),
            Block::Paragraph(content) => inline_to_terminal(content),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn strong(s: &str) -> Inline {
        Inline::Strong(s.to_string())
    }

    #[test]
    fn test_heading_list_and_emphasis() {
        let blocks = render("# Title\n- item one\n**bold** word");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::ListItem {
                    marker: ListMarker::Bullet,
                    content: vec![text("item one")]
                },
                Block::Paragraph(vec![strong("bold"), text(" word")]),
            ]
        );
    }

    #[test]
    fn test_list_item_with_emphasis() {
        let blocks = render("- **bold** word");
        assert_eq!(
            blocks,
            vec![Block::ListItem {
                marker: ListMarker::Bullet,
                content: vec![strong("bold"), text(" word")]
            }]
        );
    }

    #[test]
    fn test_heading_levels() {
        let blocks = render("### Tre\n## Due\n# Uno\n#### Quattro");
        let levels: Vec<_> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![Some(3), Some(2), Some(1), None]);
    }

    #[test]
    fn test_numbered_items_keep_number() {
        let blocks = render("  12. **Reperto**: bossolo");
        assert_eq!(
            blocks,
            vec![Block::ListItem {
                marker: ListMarker::Number("12".to_string()),
                content: vec![strong("Reperto"), text(": bossolo")]
            }]
        );
    }

    #[test]
    fn test_blank_lines_become_spacers() {
        let blocks = render("a\n\n   \nb");
        assert_eq!(blocks[1], Block::Spacer);
        assert_eq!(blocks[2], Block::Spacer);
        assert_eq!(blocks.len(), 4);
    }

    #[test]
    fn test_no_nesting() {
        // indented bullets are flattened, tables stay paragraphs
        let blocks = render("    - annidato\n| a | b |");
        assert_eq!(
            blocks[0],
            Block::ListItem {
                marker: ListMarker::Bullet,
                content: vec![text("annidato")]
            }
        );
        assert_eq!(blocks[1], Block::Paragraph(vec![text("| a | b |")]));
    }

    #[test]
    fn test_unbalanced_markers_stay_text() {
        assert_eq!(parse_inline("**aperto"), vec![text("**aperto")]);
        assert_eq!(parse_inline(""), Vec::<Inline>::new());
    }

    #[test]
    fn test_terminal_output_has_one_line_per_block() {
        let blocks = render("# T\n- a\n\nfine");
        let out = to_terminal(&blocks);
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("fine"));
    }
}
