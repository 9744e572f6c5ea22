//! Fixed-size pagination over result slices.

use std::fmt;
use std::slice;

use crate::error::{Result, SieveError};

/// A sequence of consecutive pages borrowed from one slice.
///
/// Every page holds `page_size` items except possibly the last.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<&'a [T]>,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SieveError::invalid_argument("page size cannot be zero"));
        }
        Ok(Paginator {
            pages: items.chunks(page_size).collect(),
        })
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<&'a [T]> {
        self.pages.get(index).copied()
    }

    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'_, &'a [T]>> {
        self.pages.iter().copied()
    }
}

impl<'p, 'a, T> IntoIterator for &'p Paginator<'a, T> {
    type Item = &'a [T];
    type IntoIter = std::iter::Copied<slice::Iter<'p, &'a [T]>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Paginator<'_, T> {
    /// One line per page with its items concatenated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.pages {
            for item in page.iter() {
                write!(f, "{item}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Split `items` into pages of `page_size`.
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let items = [1, 2, 3, 4, 5];
        let pages = paginate(&items, 2).unwrap();
        assert_eq!(pages.len(), 3);
        let collected: Vec<&[i32]> = pages.iter().collect();
        assert_eq!(collected, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
        assert_eq!(pages.page(2), Some(&[5][..]));
        assert_eq!(pages.page(3), None);
    }

    #[test]
    fn test_page_size_larger_than_input() {
        let items = ["a", "b"];
        let pages = paginate(&items, 10).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages.to_string(), "ab\n");
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        let items: [i32; 0] = [];
        let pages = paginate(&items, 3).unwrap();
        assert!(pages.is_empty());
        assert_eq!((&pages).into_iter().count(), 0);
    }

    #[test]
    fn test_zero_page_size() {
        assert!(matches!(
            paginate(&[1, 2], 0),
            Err(SieveError::InvalidArgument(_))
        ));
    }
}
