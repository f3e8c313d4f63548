//! Review input text

use revo_core::SourceFile;

/// What kind of text a blob holds; selects the prompt wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Version-control diff
    Diff,
    /// Concatenated file excerpts
    Files,
}

/// Immutable text to review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    text: String,
    framing: Framing,
}

impl Blob {
    /// Blob holding a diff
    pub fn diff(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            framing: Framing::Diff,
        }
    }

    /// Blob holding one fenced, language-tagged block per file
    ///
    /// Each file renders as `### {path}` followed by a code fence; blocks are
    /// joined with a newline. No files gives an empty blob.
    pub fn files(files: &[SourceFile]) -> Self {
        let text = files
            .iter()
            .map(|file| {
                format!(
                    "### {}\n```{}\n{}\n```",
                    file.path,
                    file.language().fence_tag(),
                    file.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            text,
            framing: Framing::Files,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
