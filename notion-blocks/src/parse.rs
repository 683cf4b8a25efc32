//! Single-pass line-oriented Markdown → [`Block`] parser.
//!
//! Each line (or contiguous line run) is classified into one of the fixed
//! block kinds by an ordered dispatch table evaluated top-to-bottom, first
//! match wins. The parser is a pure function of its input: no I/O, no side
//! effects, and it never fails — every input, including the empty string,
//! produces a (possibly empty) block sequence.
//!
//! Rendering blocks back to Markdown is not supported and no round-trip law
//! holds: inline spans and nested structure are lossy by design.

use std::path::Path;

use crate::error::Error;
use crate::types::{Block, Document, PLAIN_TEXT_LANGUAGE};

const FENCE: &str = "```";

/// A single-line classification rule: returns the produced block if the
/// line matches, evaluated against the line with trailing whitespace
/// removed. Markers only count at column 0; indented markers are paragraph
/// text.
type LineRule = fn(&str) -> Option<Block>;

/// Tie-break order: heading > task > bulleted > numbered > quote. Task must
/// precede bulleted since both share the `"- "` prefix. Blank lines and
/// fenced code control the cursor, so the scan loop handles them before
/// consulting this table; the paragraph fallback runs when nothing matches.
const LINE_RULES: &[LineRule] = &[heading, task_item, bulleted_item, numbered_item, quote];

/// Parse Markdown source text into an ordered block sequence.
pub fn parse(input: &str) -> Vec<Block> {
    let normalised = input.replace("\r\n", "\n");
    let lines: Vec<&str> = normalised.trim().split('\n').collect();

    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim_end();

        // Blank lines never carry content; they only end a pending
        // paragraph accumulation (handled below).
        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(language) = fence_open(line) {
            let (block, next) = consume_code_fence(&lines, i + 1, language);
            blocks.push(block);
            i = next;
            continue;
        }

        if let Some(block) = classify_line(line) {
            blocks.push(block);
            i += 1;
            continue;
        }

        // Paragraph fallback: greedily take lines until a blank line or
        // another rule's start condition, then join with single spaces.
        let mut run: Vec<&str> = Vec::new();
        while i < lines.len() {
            let line = lines[i].trim_end();
            if line.is_empty() || starts_new_block(line) {
                break;
            }
            run.push(line);
            i += 1;
        }
        let text = run.join(" ");
        let text = text.trim();
        if !text.is_empty() {
            blocks.push(Block::Paragraph {
                text: text.to_string(),
            });
        }
    }

    blocks
}

/// Read a Markdown file and build a [`Document`], deriving the title from
/// the file name with its final extension stripped.
pub fn read_document(path: &Path) -> Result<Document, Error> {
    let not_found = || Error::FileNotFound {
        path: path.to_path_buf(),
    };
    if !path.is_file() {
        return Err(not_found());
    }
    let content = std::fs::read_to_string(path).map_err(|_| not_found())?;
    Ok(Document {
        title: title_for_path(path),
        blocks: parse(&content),
    })
}

/// Page title for a source file: the base name without its final extension.
pub fn title_for_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ------------------------------------------------------------------
// Line classification
// ------------------------------------------------------------------

fn classify_line(line: &str) -> Option<Block> {
    LINE_RULES.iter().find_map(|rule| rule(line))
}

/// Whether a line would end a paragraph accumulation: any rule's start
/// condition, including a fence opener.
fn starts_new_block(line: &str) -> bool {
    line.starts_with(FENCE) || classify_line(line).is_some()
}

/// 1–6 `#` characters followed by a space. Levels 4–6 are down-mapped to
/// heading-3 with the extra `#`s re-prefixed to the body, so the original
/// depth stays visible in the text.
fn heading(line: &str) -> Option<Block> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let body = line[hashes..].strip_prefix(' ')?.trim().to_string();
    Some(match hashes {
        1 => Block::Heading1 { text: body },
        2 => Block::Heading2 { text: body },
        3 => Block::Heading3 { text: body },
        deeper => Block::Heading3 {
            text: format!("{} {}", "#".repeat(deeper - 3), body),
        },
    })
}

/// `- [ ]` unchecked or `- [x]` checked (lowercase `x` only).
fn task_item(line: &str) -> Option<Block> {
    let (checked, rest) = if let Some(rest) = line.strip_prefix("- [ ]") {
        (false, rest)
    } else if let Some(rest) = line.strip_prefix("- [x]") {
        (true, rest)
    } else {
        return None;
    };
    Some(Block::Task {
        text: rest.trim().to_string(),
        checked,
    })
}

fn bulleted_item(line: &str) -> Option<Block> {
    let rest = line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))?;
    Some(Block::BulletedItem {
        text: rest.trim().to_string(),
    })
}

/// Digits, a dot, at least one whitespace character, then content. The
/// numeral is discarded; the item's ordinal is implicit from position.
fn numbered_item(line: &str) -> Option<Block> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after_dot = line[digits..].strip_prefix('.')?;
    let content = after_dot.trim_start();
    if content.is_empty() || content.len() == after_dot.len() {
        return None;
    }
    Some(Block::NumberedItem {
        text: content.trim_end().to_string(),
    })
}

fn quote(line: &str) -> Option<Block> {
    let rest = line.strip_prefix("> ")?;
    Some(Block::Quote {
        text: rest.trim().to_string(),
    })
}

// ------------------------------------------------------------------
// Fenced code
// ------------------------------------------------------------------

/// If the line opens a fence, return the language tag (trimmed remainder
/// after the backticks, defaulting to the plain-text sentinel).
fn fence_open(line: &str) -> Option<String> {
    let rest = line.strip_prefix(FENCE)?;
    let language = rest.trim();
    Some(if language.is_empty() {
        PLAIN_TEXT_LANGUAGE.to_string()
    } else {
        language.to_string()
    })
}

/// Consume lines verbatim (blank lines included, no trimming) until a line
/// starting with the fence marker, which is consumed and discarded as the
/// closer. A missing closer is not an error: the block is emitted with
/// whatever was accumulated.
fn consume_code_fence(lines: &[&str], mut i: usize, language: String) -> (Block, usize) {
    let mut body: Vec<&str> = Vec::new();
    while i < lines.len() && !lines[i].starts_with(FENCE) {
        body.push(lines[i]);
        i += 1;
    }
    if i < lines.len() {
        i += 1; // closing fence
    }
    (
        Block::Code {
            text: body.join("\n"),
            language,
        },
        i,
    )
}
