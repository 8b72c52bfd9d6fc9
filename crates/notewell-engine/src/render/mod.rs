//! Block HTML rendering.
//!
//! Maps a block's type and text to a self-contained HTML fragment with
//! the correct semantic tag and editability. This is a pure string
//! function; the frontend decides when and where to inject the markup.
//! Content is always escaped before interpolation.

use crate::editor::{Block, BlockDocument, BlockKind};

/// Render one block. `ordinal` is only consulted for numbered list
/// items: it is the 1-based position within the current run of
/// consecutive numbered blocks.
pub fn render_block(block: &Block, ordinal: usize) -> String {
    let content = html_escape::encode_text(&block.content);
    let inner = match block.kind {
        BlockKind::Heading1 => format!(r#"<h1 class="block-h1" contenteditable="true">{content}</h1>"#),
        BlockKind::Heading2 => format!(r#"<h2 class="block-h2" contenteditable="true">{content}</h2>"#),
        BlockKind::Heading3 => format!(r#"<h3 class="block-h3" contenteditable="true">{content}</h3>"#),
        BlockKind::Todo => format!(
            r#"<div class="block-todo"><input type="checkbox"><div contenteditable="true">{content}</div></div>"#
        ),
        BlockKind::BulletList => format!(
            r#"<div class="block-list"><span class="block-marker">&bull;</span><div contenteditable="true">{content}</div></div>"#
        ),
        BlockKind::NumberedList => format!(
            r#"<div class="block-list"><span class="block-marker">{ordinal}.</span><div contenteditable="true">{content}</div></div>"#
        ),
        BlockKind::Code => format!(
            r#"<pre class="block-code"><code contenteditable="true">{content}</code></pre>"#
        ),
        BlockKind::Paragraph => {
            format!(r#"<div class="block-text" contenteditable="true">{content}</div>"#)
        }
    };
    format!(
        r#"<div class="editor-block" draggable="true" data-type="{kind}">{inner}</div>"#,
        kind = block.kind
    )
}

/// Render all blocks in reading order, numbering runs of consecutive
/// numbered list items from 1.
pub fn render_document(document: &BlockDocument) -> String {
    let mut out = String::new();
    let mut ordinal = 0usize;
    for block in document.blocks() {
        if block.kind == BlockKind::NumberedList {
            ordinal += 1;
        } else {
            ordinal = 0;
        }
        out.push_str(&render_block(block, ordinal.max(1)));
        out.push('\n');
    }
    out
}
