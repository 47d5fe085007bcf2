//! Byte-offset source spans

use std::ops::Range;

/// Half-open byte range into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// 1-based column of the span start, for single-line input
    pub fn column(&self) -> usize {
        self.start + 1
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_covers_both() {
        let a = Span::new(4, 6);
        let b = Span::new(0, 2);
        assert_eq!(a.merge(b), Span::new(0, 6));
        assert_eq!(b.merge(a), Span::new(0, 6));
    }

    #[test]
    fn test_column_is_one_based() {
        assert_eq!(Span::new(0, 1).column(), 1);
        assert_eq!(Span::new(5, 5).column(), 6);
    }
}
