/*!
 * Mapping a model's free-text answer back onto the entries of a chunk.
 *
 * Alignment is purely positional: candidate block `i` of the response is
 * taken to be the translation of entry `i` of the chunk. Ids and timestamps
 * always come from the original entries, whatever the model echoed.
 */

use crate::subtitle_processor::{SubtitleEntry, split_blocks};

/// Outcome counters of one alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignmentReport {
    /// Entries in the original chunk
    pub expected: usize,
    /// Blocks found in the response
    pub received: usize,
    /// Entries that kept their original text
    pub fallbacks: usize,
}

impl AlignmentReport {
    /// Whether the response block count matched the chunk
    pub fn is_exact(&self) -> bool {
        self.expected == self.received
    }

    /// Fewer response blocks than entries
    pub fn is_shortfall(&self) -> bool {
        self.received < self.expected
    }
}

/// Align a raw response with the chunk it translates
///
/// The result always has the chunk's length.
pub fn align_response(raw: &str, chunk: &[SubtitleEntry]) -> Vec<SubtitleEntry> {
    align_response_with_report(raw, chunk).0
}

/// Align a raw response and report how well it matched
pub fn align_response_with_report(raw: &str, chunk: &[SubtitleEntry]) -> (Vec<SubtitleEntry>, AlignmentReport) {
    let blocks = split_blocks(raw);
    let mut report = AlignmentReport {
        expected: chunk.len(),
        received: blocks.len(),
        fallbacks: 0,
    };

    let aligned = chunk
        .iter()
        .enumerate()
        .map(|(index, original)| {
            match blocks.get(index).and_then(|block| translated_text(block)) {
                Some(text) => original.with_text(text),
                None => {
                    report.fallbacks += 1;
                    original.clone()
                }
            }
        })
        .collect();

    (aligned, report)
}

// A full block keeps the lines after id and timestamp; a short block is
// treated as bare text and its last non-empty line used.
fn translated_text(block: &str) -> Option<String> {
    let lines: Vec<&str> = block.lines().collect();

    let text = if lines.len() >= 3 {
        lines[2..].join("\n").trim().to_string()
    } else {
        lines
            .iter()
            .rev()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_string()
    };

    if text.is_empty() { None } else { Some(text) }
}
