use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Document processing module
/// Splits raw text into the ordered paragraph sequence the translation
/// pipeline works on, and joins translated paragraphs back together.
/// Separator between paragraphs, both on input and output
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// An ordered collection of paragraphs extracted from a source document
#[derive(Debug, Clone)]
pub struct Document {
    /// Path of the source file, when the document was read from disk
    pub source_path: Option<PathBuf>,

    /// Paragraphs in source order. Index is the paragraph identity for the
    /// whole translation run, so this list is never reordered.
    pub paragraphs: Vec<String>,
}

impl Document {
    /// Create a document from raw text
    pub fn from_text(text: &str) -> Self {
        Self {
            source_path: None,
            paragraphs: Self::segment(text),
        }
    }

    /// Read a UTF-8 text file and segment it into paragraphs
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path))?;

        Ok(Self {
            source_path: Some(path.to_path_buf()),
            paragraphs: Self::segment(&text),
        })
    }

    /// Split raw text into paragraphs.
    ///
    /// A paragraph boundary is a blank line (two consecutive line breaks).
    /// Each chunk is trimmed, internal line breaks are collapsed to single
    /// spaces, and a leading `"- "` wrapped-list marker is stripped. Chunks
    /// that are empty after trimming are dropped, so a document without any
    /// blank line yields exactly one paragraph.
    pub fn segment(text: &str) -> Vec<String> {
        text.split(PARAGRAPH_SEPARATOR)
            .map(Self::normalize_chunk)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Normalize one raw chunk into a paragraph string
    fn normalize_chunk(chunk: &str) -> String {
        let collapsed = chunk
            .lines()
            .map(|line| {
                let line = line.trim();
                // Wrapped list items keep their text but lose the marker
                line.strip_prefix("- ").unwrap_or(line)
            })
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        collapsed.trim().to_string()
    }

    /// Number of paragraphs in the document
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// True when the document contains no paragraphs
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Join translated paragraphs back into a single output document,
    /// in index order, separated by blank lines
    pub fn assemble(paragraphs: &[String]) -> String {
        paragraphs.join(PARAGRAPH_SEPARATOR)
    }
}
