//! Message normalization and output grouping.

use std::num::NonZeroUsize;

/// Uppercase ASCII letters and drop everything else.
///
/// Digits, punctuation, whitespace and non-ASCII characters are removed.
/// Normalizing already-normalized text returns it unchanged.
pub fn normalize(text: &str) -> String {
    normalize_counted(text).0
}

/// Like [`normalize`], also returning how many characters were dropped.
pub fn normalize_counted(text: &str) -> (String, usize) {
    let mut normalized = String::with_capacity(text.len());
    let mut dropped = 0;

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            normalized.push(c.to_ascii_uppercase());
        } else {
            dropped += 1;
        }
    }

    (normalized, dropped)
}

/// Output grouping for encoded messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chunking {
    /// One unbroken run of letters.
    #[default]
    None,
    /// Groups of the given width separated by single spaces.
    Groups(NonZeroUsize),
}

impl Chunking {
    /// Groups of `width` letters; a width of 0 means no grouping.
    pub fn groups(width: usize) -> Self {
        NonZeroUsize::new(width).map_or(Self::None, Self::Groups)
    }

    /// Group width, or 0 when ungrouped.
    pub fn width(self) -> usize {
        match self {
            Self::None => 0,
            Self::Groups(width) => width.get(),
        }
    }

    /// Apply the grouping to `text`.
    pub fn apply(self, text: &str) -> String {
        let Self::Groups(width) = self else {
            return text.to_string();
        };

        let width = width.get();
        let mut grouped = String::with_capacity(text.len() + text.len() / width);
        for (i, c) in text.chars().enumerate() {
            if i > 0 && i % width == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }
        grouped
    }
}
