use crate::render::{spans, Block, Span};

/// Parse digest content into an ordered block sequence.
///
/// Total over any input: lines that match no rule degrade to paragraphs,
/// never an error. Classification runs per line with a single piece of
/// carried state, the in-progress list accumulator. Heading markers are
/// checked longest-prefix-first so `### ` is never misread as level 1.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending_list: Vec<Vec<Span>> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();

        if line.is_empty() {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(Block::Spacer);
        } else if let Some(rest) = line.strip_prefix("### ") {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(heading(3, rest));
        } else if let Some(rest) = line.strip_prefix("## ") {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(heading(2, rest));
        } else if let Some(rest) = line.strip_prefix("# ") {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(heading(1, rest));
        } else if let Some(item) = list_item(line) {
            pending_list.push(spans::format(item));
        } else {
            flush_list(&mut blocks, &mut pending_list);
            blocks.push(Block::Paragraph {
                spans: spans::format(line),
            });
        }
    }

    flush_list(&mut blocks, &mut pending_list);
    blocks
}

fn heading(level: u8, rest: &str) -> Block {
    Block::Heading {
        level,
        spans: spans::format(rest.trim_start()),
    }
}

/// Strip a bullet or ordered-list marker, returning the item text.
fn list_item(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(rest);
    }

    // Ordered markers: one or more digits, a dot, then whitespace.
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after_dot = line[digits..].strip_prefix('.')?;
    let item = after_dot.trim_start();
    if item.len() == after_dot.len() {
        return None;
    }
    Some(item)
}

fn flush_list(blocks: &mut Vec<Block>, pending: &mut Vec<Vec<Span>>) {
    if !pending.is_empty() {
        blocks.push(Block::List {
            items: std::mem::take(pending),
        });
    }
}
