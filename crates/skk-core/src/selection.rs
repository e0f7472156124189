//! Cursor over an ordered candidate list.
//!
//! The first `threshold` candidates are shown one at a time in the buffer;
//! the rest are shown in pages of `page_size` bound to the page keys. Moving
//! past the last candidate asks for a new word.

use std::ops::Range;

pub const DEFAULT_THRESHOLD: usize = 4;
pub const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Back at the unconverted reading.
    Reading,
    Single(usize),
    Page { start: usize, end: usize },
    /// Past the last candidate.
    Register,
}

#[derive(Debug, Clone)]
pub struct Selection {
    len: usize,
    threshold: usize,
    page_size: usize,
    position: Position,
}

impl Selection {
    /// A cursor over `len` candidates, positioned on the reading.
    ///
    /// `threshold` and `page_size` are clamped to at least 1.
    pub fn new(len: usize, threshold: usize, page_size: usize) -> Self {
        Self {
            len,
            threshold: threshold.max(1),
            page_size: page_size.max(1),
            position: Position::Reading,
        }
    }

    /// Cursor on the first candidate, or on `Register` if there is none.
    pub fn start(len: usize, threshold: usize, page_size: usize) -> Self {
        let mut selection = Self::new(len, threshold, page_size);
        selection.advance();
        selection
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Index of the candidate under the cursor (the first of a page).
    pub fn current(&self) -> Option<usize> {
        match self.position {
            Position::Single(i) => Some(i),
            Position::Page { start, .. } => Some(start),
            Position::Reading | Position::Register => None,
        }
    }

    /// Candidate indices of the page under the cursor.
    pub fn page(&self) -> Option<Range<usize>> {
        match self.position {
            Position::Page { start, end } => Some(start..end),
            _ => None,
        }
    }

    /// Candidates after the current page.
    pub fn remaining(&self) -> usize {
        match self.position {
            Position::Page { end, .. } => self.len - end,
            _ => 0,
        }
    }

    /// Candidate index bound to page key number `slot`.
    pub fn pick(&self, slot: usize) -> Option<usize> {
        let range = self.page()?;
        let index = range.start + slot;
        range.contains(&index).then_some(index)
    }

    fn place(&self, n: usize) -> Position {
        if n >= self.len {
            Position::Register
        } else if n >= self.threshold {
            Position::Page {
                start: n,
                end: (n + self.page_size).min(self.len),
            }
        } else {
            Position::Single(n)
        }
    }

    pub fn advance(&mut self) -> Position {
        self.position = match self.position {
            Position::Reading => self.place(0),
            Position::Single(i) => self.place(i + 1),
            Position::Page { end, .. } => self.place(end),
            Position::Register => Position::Register,
        };
        self.position
    }

    pub fn back(&mut self) -> Position {
        self.position = match self.position {
            Position::Reading | Position::Single(0) => Position::Reading,
            Position::Single(i) => Position::Single(i - 1),
            Position::Page { .. } => return self.page_back(),
            Position::Register => self.last(),
        };
        self.position
    }

    /// Rewind one page; before the first page, return to the last
    /// single candidate.
    pub fn page_back(&mut self) -> Position {
        if let Position::Page { start, .. } = self.position {
            self.position = if start >= self.threshold + self.page_size {
                self.place(start - self.page_size)
            } else {
                self.place(self.threshold - 1)
            };
        }
        self.position
    }

    fn last(&self) -> Position {
        let Some(last) = self.len.checked_sub(1) else {
            return Position::Reading;
        };
        if last < self.threshold {
            Position::Single(last)
        } else {
            let offset = (last - self.threshold) / self.page_size * self.page_size;
            self.place(self.threshold + offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(len: usize) -> Selection {
        Selection::start(len, DEFAULT_THRESHOLD, DEFAULT_PAGE_SIZE)
    }

    #[test]
    fn test_start() {
        assert_eq!(selection(3).position(), Position::Single(0));
        assert_eq!(selection(0).position(), Position::Register);
    }

    #[test]
    fn test_advance_through_singles() {
        let mut sel = selection(3);
        assert_eq!(sel.advance(), Position::Single(1));
        assert_eq!(sel.advance(), Position::Single(2));
        assert_eq!(sel.advance(), Position::Register);
        assert_eq!(sel.advance(), Position::Register);
    }

    #[test]
    fn test_paging() {
        let mut sel = selection(20);
        for _ in 0..3 {
            sel.advance();
        }
        assert_eq!(sel.current(), Some(3));
        assert_eq!(sel.advance(), Position::Page { start: 4, end: 12 });
        assert_eq!(sel.remaining(), 8);
        assert_eq!(sel.advance(), Position::Page { start: 12, end: 20 });
        assert_eq!(sel.remaining(), 0);
        assert_eq!(sel.advance(), Position::Register);
    }

    #[test]
    fn test_pick() {
        let mut sel = selection(6);
        assert_eq!(sel.pick(0), None);
        for _ in 0..4 {
            sel.advance();
        }
        assert_eq!(sel.page(), Some(4..6));
        assert_eq!(sel.pick(0), Some(4));
        assert_eq!(sel.pick(1), Some(5));
        assert_eq!(sel.pick(2), None);
    }

    #[test]
    fn test_back() {
        let mut sel = selection(3);
        sel.advance();
        assert_eq!(sel.back(), Position::Single(0));
        assert_eq!(sel.back(), Position::Reading);
        assert_eq!(sel.back(), Position::Reading);
    }

    #[test]
    fn test_page_back() {
        let mut sel = selection(20);
        for _ in 0..5 {
            sel.advance();
        }
        assert_eq!(sel.position(), Position::Page { start: 12, end: 20 });
        assert_eq!(sel.back(), Position::Page { start: 4, end: 12 });
        assert_eq!(sel.back(), Position::Single(3));
    }

    #[test]
    fn test_back_from_register() {
        let mut sel = selection(2);
        sel.advance();
        sel.advance();
        assert_eq!(sel.position(), Position::Register);
        assert_eq!(sel.back(), Position::Single(1));

        let mut sel = selection(13);
        while sel.advance() != Position::Register {}
        assert_eq!(sel.back(), Position::Page { start: 12, end: 13 });

        let mut sel = selection(0);
        assert_eq!(sel.back(), Position::Reading);
    }

    #[test]
    fn test_advance_len_times_reaches_register() {
        for len in 0..30 {
            let mut sel = selection(len);
            for _ in 0..len {
                sel.advance();
            }
            assert_eq!(sel.position(), Position::Register, "len {len}");
            if len > 0 {
                let back = sel.back();
                let last = len - 1;
                match back {
                    Position::Single(i) => assert_eq!(i, last),
                    Position::Page { start, end } => {
                        assert!(start <= last && last < end, "len {len}: {back:?}")
                    }
                    other => panic!("len {len}: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_small_threshold() {
        let mut sel = Selection::start(5, 1, 2);
        assert_eq!(sel.position(), Position::Single(0));
        assert_eq!(sel.advance(), Position::Page { start: 1, end: 3 });
        assert_eq!(sel.advance(), Position::Page { start: 3, end: 5 });
        assert_eq!(sel.back(), Position::Page { start: 1, end: 3 });
        assert_eq!(sel.back(), Position::Single(0));
    }
}
