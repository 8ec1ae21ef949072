//! `file:line[:column]` arguments

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::infra::scanner;
use crate::models::lsp::Position;

const FORMAT_HINT: &str = "Expected: file:line[:column]\nExample: model/Rental.mez:12:5";

/// A 1-indexed source position as typed on the command line
#[derive(Debug, Clone)]
pub struct ParsedLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl ParsedLocation {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("Location cannot be empty. {}", FORMAT_HINT);
        }

        let split = Self::position_separator(input)
            .with_context(|| format!("Invalid location '{}'. {}", input, FORMAT_HINT))?;
        let (line, column) = Self::parse_position(&input[split + 1..])?;

        Ok(Self {
            file: PathBuf::from(&input[..split]),
            line,
            column,
        })
    }

    /// Byte index of the first ':' followed by a digit or '-'
    ///
    /// A drive letter prefix (`C:`) is never a separator.
    fn position_separator(input: &str) -> Option<usize> {
        let bytes = input.as_bytes();
        let skip = if bytes.len() > 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
            2
        } else {
            0
        };
        input
            .char_indices()
            .skip_while(|(i, _)| *i < skip)
            .filter(|(_, c)| *c == ':')
            .map(|(i, _)| i)
            .find(|i| {
                input[i + 1..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit() || c == '-')
            })
    }

    fn parse_number(text: &str, what: &str) -> Result<u32> {
        if text.starts_with('-') {
            bail!("Invalid {} '{}': negative values not allowed", what, text);
        }
        let value: u32 = text
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid {} '{}': must be a positive integer", what, text))?;
        if value == 0 {
            bail!("{} must be >= 1 (positions are 1-indexed)", what);
        }
        Ok(value)
    }

    fn parse_position(rest: &str) -> Result<(u32, u32)> {
        let (line, column) = match rest.split_once(':') {
            Some((line, column)) => (line, Some(column)),
            None => (rest, None),
        };
        let line = Self::parse_number(line, "line")?;
        let column = match column {
            Some(column) => Self::parse_number(column, "column")?,
            None => 1,
        };
        Ok((line, column))
    }

    /// Resolve the file against `root` and check that it exists
    pub fn resolve(mut self, root: &Path) -> Result<Self> {
        let file = if self.file.is_absolute() {
            self.file.clone()
        } else {
            root.join(&self.file)
        };
        self.file = file
            .canonicalize()
            .with_context(|| format!("File not found: {}", file.display()))?;
        Ok(self)
    }

    /// 0-indexed editor position
    pub fn position(&self) -> Position {
        Position::from_cli(self.line, self.column)
    }

    /// Check the position against the file content; columns count characters
    pub fn validate_in(&self, content: &str) -> Result<()> {
        let lines = scanner::lines(content);
        let line_count = lines.len().max(1);
        let Some(text) = lines.get(self.line as usize - 1) else {
            bail!("Line {} exceeds file length ({} lines)", self.line, line_count);
        };
        let width = text.chars().count();
        if self.column as usize > width + 1 {
            bail!(
                "Column {} exceeds line length ({} chars) at line {}",
                self.column,
                width,
                self.line
            );
        }
        Ok(())
    }
}

impl std::fmt::Display for ParsedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}
