// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Overlapping text chunking for document ingestion.
//!
//! Chunks are at most `chunk_size` characters. A cut prefers a paragraph
//! break, then a line break, then a space, searched in the back half of
//! the window; only unbroken text is cut mid-word. Consecutive chunks share
//! up to `chunk_overlap` characters, starting on a word boundary.

/// Cut points, most preferred first.
const SEPARATORS: &[&str] = &["\n\n", "\n", " "];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// `chunk_overlap` is clamped below `chunk_size`; a zero size becomes 1.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < len {
            let hard_end = (start + self.chunk_size).min(len);
            let end = if hard_end == len {
                len
            } else {
                self.cut_point(&chars, start, hard_end)
            };

            let chunk: String = chars[start..end].iter().collect();
            let trimmed = chunk.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }

            if end == len {
                break;
            }
            start = self.next_start(&chars, start, end);
        }

        chunks
    }

    /// Last separator end inside the back half of `[start, hard_end)`.
    fn cut_point(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let floor = start + self.chunk_size / 2;
        for separator in SEPARATORS {
            let sep: Vec<char> = separator.chars().collect();
            let mut pos = hard_end;
            while pos >= floor.max(start + sep.len()) {
                if chars[pos - sep.len()..pos] == sep[..] {
                    return pos;
                }
                pos -= 1;
            }
        }
        hard_end
    }

    fn next_start(&self, chars: &[char], start: usize, end: usize) -> usize {
        if self.chunk_overlap == 0 {
            return end;
        }
        let mut next = end.saturating_sub(self.chunk_overlap).max(start + 1);
        // Do not open the next chunk in the middle of a word.
        while next < end && !chars[next - 1].is_whitespace() {
            next += 1;
        }
        next
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(1000, 200)
    }
}
