use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context};
use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: SRT parsing, serialization and chunking

// @const: One or more blank lines between SRT blocks
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").expect("block separator regex is valid")
});

/// Split raw SRT-like text into blocks on blank-line boundaries
///
/// Line endings are normalized and the text is trimmed first, so leading or
/// trailing blank lines never produce empty blocks.
pub fn split_blocks(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    BLOCK_SEPARATOR
        .split(trimmed)
        .map(|block| block.to_string())
        .collect()
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Identifier line, kept verbatim (not necessarily numeric)
    pub id: String,

    // @field: Timestamp range line, kept verbatim and never parsed
    pub timestamp: String,

    // @field: Subtitle text, may span several lines
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        SubtitleEntry {
            id: id.into(),
            timestamp: timestamp.into(),
            text: text.into(),
        }
    }

    /// Copy of this entry carrying new text; id and timestamp are kept
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        SubtitleEntry {
            id: self.id.clone(),
            timestamp: self.timestamp.clone(),
            text: text.into(),
        }
    }

    // @parses: One SRT block; None when the block is malformed
    fn from_block(block: &str) -> Option<Self> {
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() < 3 {
            return None;
        }

        let id = lines[0].trim();
        let timestamp = lines[1].trim();
        let text = lines[2..].join("\n");
        let text = text.trim();

        if id.is_empty() || timestamp.is_empty() || text.is_empty() {
            return None;
        }

        Some(SubtitleEntry::new(id, timestamp, text))
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        writeln!(f, "{}", self.timestamp)?;
        writeln!(f, "{}", self.text)
    }
}

/// Parse SRT text into entries, silently dropping malformed blocks
pub fn parse_srt(content: &str) -> Vec<SubtitleEntry> {
    SubtitleCollection::parse_srt_string(content)
}

/// Render entries back to SRT text
pub fn serialize_srt(entries: &[SubtitleEntry]) -> String {
    SubtitleCollection::to_srt_string(entries)
}

/// Partition entries into contiguous chunks of at most `chunk_size` entries
///
/// Produces `ceil(N / chunk_size)` chunks; only the last one may be shorter.
/// A `chunk_size` of zero is treated as one.
pub fn split_into_chunks(entries: &[SubtitleEntry], chunk_size: usize) -> Vec<Vec<SubtitleEntry>> {
    let size = chunk_size.max(1);
    entries.chunks(size).map(|chunk| chunk.to_vec()).collect()
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new, empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Create a collection from already parsed entries
    pub fn with_entries(source_file: PathBuf, entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection { source_file, entries }
    }

    /// Load and parse an SRT file
    ///
    /// Fails when the file cannot be read or when it holds no valid entry.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let entries = Self::parse_srt_checked(&content)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;

        debug!("Parsed {} entries from {}", entries.len(), path.display());

        Ok(Self::with_entries(path.to_path_buf(), entries))
    }

    /// Parse SRT format string into subtitle entries
    ///
    /// Within each block the first line is the id, the second the timestamp
    /// and everything after is the text. Blocks with fewer than three lines or
    /// an empty id, timestamp or text are dropped.
    pub fn parse_srt_string(content: &str) -> Vec<SubtitleEntry> {
        let mut entries = Vec::new();

        for (index, block) in split_blocks(content).iter().enumerate() {
            match SubtitleEntry::from_block(block) {
                Some(entry) => entries.push(entry),
                None => debug!("Dropping malformed subtitle block #{}", index + 1),
            }
        }

        entries
    }

    /// Parse SRT content and fail if no valid entry was found
    pub fn parse_srt_checked(content: &str) -> std::result::Result<Vec<SubtitleEntry>, SubtitleError> {
        let entries = Self::parse_srt_string(content);
        if entries.is_empty() {
            warn!("No valid subtitle entries found in content");
            return Err(SubtitleError::NoEntries);
        }
        Ok(entries)
    }

    /// Serialize entries to SRT text, one blank line between entries
    pub fn to_srt_string(entries: &[SubtitleEntry]) -> String {
        entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        FileManager::write_to_file(path, &Self::to_srt_string(&self.entries))
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))
    }

    /// Split subtitles into chunks for translation
    pub fn split_into_chunks(&self, chunk_size: usize) -> Vec<Vec<SubtitleEntry>> {
        if self.entries.is_empty() {
            warn!("No subtitle entries to split into chunks");
            return Vec::new();
        }

        let chunks = split_into_chunks(&self.entries, chunk_size);

        if log::max_level() >= log::LevelFilter::Debug {
            for (i, chunk) in chunks.iter().enumerate() {
                debug!("Chunk {}: {} entries (first id: {})",
                       i + 1, chunk.len(), chunk.first().map(|e| e.id.as_str()).unwrap_or("-"));
            }
        }

        chunks
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
