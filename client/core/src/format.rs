//! Answer Text Formatting
//!
//! Bot answers arrive as plain text with an informal structure: one thought
//! per line, and lines starting with `- ` or `• ` meant as bullet points.
//! [`format_bot_text`] turns that into blocks a surface can lay out.

/// A renderable block of answer text
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextBlock {
    /// A single trimmed line of prose
    Paragraph(String),
    /// Consecutive bullet lines, marker stripped
    BulletList(Vec<String>),
}

const BULLET_MARKERS: [&str; 2] = ["- ", "• "];

/// Split answer text into paragraphs and bullet lists
///
/// Lines are trimmed and blank lines dropped. A run of consecutive bullet
/// lines becomes one [`TextBlock::BulletList`]; any other line is its own
/// paragraph.
#[must_use]
pub fn format_bot_text(text: &str) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(item) = bullet_item(line) else {
            blocks.push(TextBlock::Paragraph(line.to_string()));
            continue;
        };

        if let Some(TextBlock::BulletList(items)) = blocks.last_mut() {
            items.push(item.to_string());
        } else {
            blocks.push(TextBlock::BulletList(vec![item.to_string()]));
        }
    }

    blocks
}

fn bullet_item(line: &str) -> Option<&str> {
    BULLET_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(*marker))
}
