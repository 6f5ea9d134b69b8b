use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{LlmeditError, LlmeditResult};

/// Line opening the instruction region
pub const START_MARKER: &str = "<tag> start_prompt";

/// Line closing the instruction region
pub const END_MARKER: &str = "<tag> end_prompt";

/// Input file content split into the editing instruction and the text to
/// rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// Trimmed text between the markers; empty when no well-formed region
    /// was found
    pub instruction: String,

    /// Everything outside the instruction region
    pub body: String,
}

impl ParsedInput {
    /// True when a usable instruction was found in the input
    pub fn has_instruction(&self) -> bool {
        !self.instruction.is_empty()
    }
}

/// Read and parse an input file.
///
/// Only unreadable input is an error; a missing or malformed instruction
/// region degrades to an empty instruction with the full text as body.
pub fn read_input(path: &Path) -> LlmeditResult<ParsedInput> {
    let bytes = fs::read(path)
        .map_err(|e| LlmeditError::parse_error(e.to_string(), path))?;

    let raw = String::from_utf8(bytes)
        .map_err(|e| LlmeditError::parse_error(format!("not valid UTF-8: {}", e), path))?;

    Ok(parse(&raw))
}

/// Split raw text into instruction region and body.
///
/// Marker lines are matched after trimming surrounding whitespace and are
/// excluded from both parts. Only the first region counts; marker lines
/// after it are ordinary body text. An unterminated or inverted region
/// yields an empty instruction and the full text as body.
pub fn parse(raw: &str) -> ParsedInput {
    let mut instruction_lines: Vec<&str> = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_region = false;
    let mut region_closed = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if !region_closed && !in_region && trimmed == START_MARKER {
            in_region = true;
            continue;
        }
        if in_region && trimmed == END_MARKER {
            in_region = false;
            region_closed = true;
            continue;
        }
        if in_region {
            instruction_lines.push(line);
        } else {
            body_lines.push(line);
        }
    }

    if in_region {
        // Start marker without a matching end: nothing trustworthy to
        // extract, so hand the whole text back as body.
        debug!("Unterminated instruction region, treating full input as body");
        return ParsedInput {
            instruction: String::new(),
            body: raw.to_string(),
        };
    }

    ParsedInput {
        instruction: instruction_lines.join("\n").trim().to_string(),
        body: body_lines.join("\n"),
    }
}
