//! Span utility functions for diagnostic rendering.
//!
//! Emitters turn byte spans into 1-based line/column positions. For repeated
//! lookups on the same source, use [`LineOffsetTable`], which pre-computes
//! line starts for O(log L) lookup instead of O(n) scanning.

use inj_ir::Span;

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use inj_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (3, 3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0]` is always 0.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters, not bytes, from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.offsets.get((line - 1) as usize).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Get the text of a 1-based line, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.offsets.get(idx)? as usize;
        let end = self
            .offsets
            .get(idx + 1)
            .map_or(source.len(), |next| (*next as usize).saturating_sub(1));
        source
            .get(start..end)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Compute 1-based (line, column) of a span's start.
///
/// Note: For repeated lookups, use [`LineOffsetTable`] instead.
pub fn span_start_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}

#[cfg(test)]
mod tests;
