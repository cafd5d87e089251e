//! Resolves byte offsets into 0-based line and character positions.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("offset {offset} is out of bounds for {len} bytes")]
pub struct OutOfBounds {
    pub offset: usize,
    pub len: usize,
}

/// Text in which offsets are resolved. Line ends are found on first use.
pub struct File<'a> {
    data: &'a [u8],
    // Offsets just past each `\n`.
    line_ends: Option<Vec<usize>>,
}

impl<'a> File<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            line_ends: None,
        }
    }

    /// Returns the 0-based line and the 0-based character (counted in
    /// Unicode scalar values) of `offset`. `offset` may equal the length of
    /// the data.
    pub fn resolve(&mut self, offset: usize) -> Result<(usize, usize), OutOfBounds> {
        if offset > self.data.len() {
            return Err(OutOfBounds {
                offset,
                len: self.data.len(),
            });
        }
        let data = self.data;
        let line_ends = self
            .line_ends
            .get_or_insert_with(|| memchr::memchr_iter(b'\n', data).map(|i| i + 1).collect());
        let line = line_ends.partition_point(|&end| end <= offset);
        let line_start = match line {
            0 => 0,
            line => line_ends[line - 1],
        };
        let character = String::from_utf8_lossy(&data[line_start..offset])
            .chars()
            .count();
        Ok((line, character))
    }
}
