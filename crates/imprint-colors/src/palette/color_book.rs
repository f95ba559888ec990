//! Color book: the finite set of print-safe colors output is mapped onto.

use std::collections::HashSet;

use crate::color::{full_compare, rgb_distance, Argb};

use super::error::PaletteError;

/// Book colors whose RGB-nearest matches are re-ranked by Delta-E.
///
/// These light purples and warm grays are easily confused in RGB space, so
/// when one of them wins the RGB match, all candidates are re-ranked with
/// [`full_compare`].
pub const LAVENDER_COLORS: [&str; 3] = ["ffc3abd3", "ffdddbd3", "ff717073"];

/// Starting "best distance" for nearest searches; larger than any real
/// distance in either metric.
const NO_MATCH_DISTANCE: i32 = 1000;

/// One entry of a color book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookColor {
    /// The print color
    pub color: Argb,
    /// Human-readable label, e.g. `"PMS 186 Red"`
    pub label: String,
}

/// A validated color book.
///
/// Entries keep their configured order, which decides ties in
/// [`closest`](Self::closest).
#[derive(Debug, Clone)]
pub struct ColorBook {
    entries: Vec<BookColor>,
    /// Book colors followed by `Transparent`
    candidates: Vec<Argb>,
}

impl ColorBook {
    /// Create a color book from entries.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyBook`] if `entries` is empty
    /// - [`PaletteError::DuplicateColor`] if two entries share a key
    pub fn new(entries: Vec<BookColor>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyBook);
        }

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let key = entry.color.name();
            if !seen.insert(key.clone()) {
                return Err(PaletteError::DuplicateColor { index, color: key });
            }
        }

        let mut candidates: Vec<Argb> = entries.iter().map(|e| e.color).collect();
        candidates.push(Argb::TRANSPARENT);

        Ok(Self {
            entries,
            candidates,
        })
    }

    /// Create a color book from `(hex, label)` pairs.
    ///
    /// # Example
    /// ```
    /// use imprint_colors::ColorBook;
    ///
    /// let book = ColorBook::from_hex(&[("#FFFFFF", "White"), ("#000000", "Black")]).unwrap();
    /// assert_eq!(book.len(), 2);
    /// ```
    pub fn from_hex<S: AsRef<str>>(pairs: &[(S, S)]) -> Result<Self, PaletteError> {
        let entries = pairs
            .iter()
            .map(|(hex, label)| {
                Ok(BookColor {
                    color: hex.as_ref().parse()?,
                    label: label.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>, PaletteError>>()?;
        Self::new(entries)
    }

    /// Number of book colors (excluding the implicit `Transparent`).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed book.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Book entries in configured order.
    pub fn entries(&self) -> &[BookColor] {
        &self.entries
    }

    /// Match candidates: every book color, then `Transparent`.
    pub fn candidates(&self) -> &[Argb] {
        &self.candidates
    }

    /// Closest candidate to `target` and its distance.
    pub fn closest(&self, target: Argb) -> (Argb, i32) {
        // candidates always holds at least Transparent
        let (idx, distance) = closest_color(&self.candidates, target).unwrap_or((0, 0));
        (self.candidates[idx], distance)
    }

    /// Label of a book color, if `color` is one.
    pub fn label_for(&self, color: Argb) -> Option<&str> {
        let key = color.name();
        self.entries
            .iter()
            .find(|e| e.color.name() == key)
            .map(|e| e.label.as_str())
    }
}

/// Index of the candidate nearest to `target`, and its distance.
///
/// The search uses [`rgb_distance`]; the lowest index wins on ties. If the
/// winner is one of the [`LAVENDER_COLORS`], every candidate is re-ranked
/// by [`full_compare`] and that ranking's winner (and Delta-E distance) is
/// returned instead.
///
/// Returns `None` for an empty candidate list.
pub fn closest_color(candidates: &[Argb], target: Argb) -> Option<(usize, i32)> {
    let (rgb_idx, rgb_best) = nearest_by(candidates, |c| rgb_distance(c, target))?;

    if LAVENDER_COLORS.contains(&candidates[rgb_idx].name().as_str()) {
        tracing::trace!(
            color = %target,
            matched = %candidates[rgb_idx],
            "lavender match, re-ranking by delta-e"
        );
        return nearest_by(candidates, |c| full_compare(c, target));
    }

    Some((rgb_idx, rgb_best))
}

fn nearest_by<F>(candidates: &[Argb], metric: F) -> Option<(usize, i32)>
where
    F: Fn(Argb) -> i32,
{
    let mut best: Option<(usize, i32)> = None;
    let mut best_distance = NO_MATCH_DISTANCE;
    for (idx, &candidate) in candidates.iter().enumerate() {
        let distance = metric(candidate);
        if distance < best_distance {
            best_distance = distance;
            best = Some((idx, distance));
        }
    }
    best
}
