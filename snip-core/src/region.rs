//! Region algebra over a linear buffer
//!
//! A [`Region`] is a half-open pair of character offsets. Selections coming from an
//! editor are ordered and non-overlapping; the operations here never assume more
//! than that.
//!
//! The central operation is [`invert`]: given the regions that will become tab
//! stops, compute the literal stretches between them. Together the two sets tile
//! the bounding span exactly, which is what lets the extractor walk the whole span
//! without losing or duplicating text.

use std::cmp::{max, min};

/// Distinguishes real selections from gaps synthesized by [`invert`].
///
/// The derived ordering puts `Gap` first so that a gap sharing its bounds with a
/// selection sorts before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RegionKind {
    Gap,
    #[default]
    Selection,
}

/// An ordered pair of offsets, `begin <= end`.
///
/// Field order matters: regions compare by `(begin, end, kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Region {
    pub begin: usize,
    pub end: usize,
    pub kind: RegionKind,
}

impl Region {
    /// Create a selection region. The endpoints may be given in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            begin: min(a, b),
            end: max(a, b),
            kind: RegionKind::Selection,
        }
    }

    /// Create a synthetic gap region.
    pub fn gap(a: usize, b: usize) -> Self {
        Self {
            kind: RegionKind::Gap,
            ..Self::new(a, b)
        }
    }

    /// A zero-length region at `point`.
    pub fn caret(point: usize) -> Self {
        Self::new(point, point)
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn is_gap(&self) -> bool {
        self.kind == RegionKind::Gap
    }

    /// Smallest region containing both `self` and `other`. Keeps `self`'s kind.
    pub fn cover(&self, other: &Region) -> Region {
        Region {
            begin: min(self.begin, other.begin),
            end: max(self.end, other.end),
            kind: self.kind,
        }
    }

    /// True when either endpoint of `self` coincides with either endpoint of `other`.
    pub fn shares_extent(&self, other: &Region) -> bool {
        self.begin == other.begin
            || self.begin == other.end
            || self.end == other.begin
            || self.end == other.end
    }

    pub fn contains(&self, point: usize) -> bool {
        self.begin <= point && point <= self.end
    }
}

/// The cover of the first and last region of an ordered set.
pub fn span_of(regions: &[Region]) -> Option<Region> {
    let first = regions.first()?;
    let last = regions.last()?;
    Some(first.cover(last))
}

/// Complement of `regions` within `bound`, as gap regions.
///
/// `regions` must be ordered and non-overlapping. The points of all regions are
/// flattened into one stream; `bound.begin` is prepended unless the stream already
/// starts there (in which case that point is dropped), and likewise `bound.end` is
/// appended unless the stream already ends there. The stream is then re-paired two
/// at a time.
///
/// The result is never empty. Without input regions it is the whole bound; when
/// the regions leave nothing uncovered it is a zero-length gap at `bound.begin`.
pub fn invert(regions: &[Region], bound: Region) -> Vec<Region> {
    if regions.is_empty() {
        return vec![Region::gap(bound.begin, bound.end)];
    }

    let mut points: Vec<usize> = regions.iter().flat_map(|r| [r.begin, r.end]).collect();

    if points.first() == Some(&bound.begin) {
        points.remove(0);
    } else {
        points.insert(0, bound.begin);
    }

    if points.last() == Some(&bound.end) {
        points.pop();
    } else {
        points.push(bound.end);
    }

    let inverted: Vec<Region> = points
        .chunks_exact(2)
        .map(|pair| Region::gap(pair[0], pair[1]))
        .collect();

    if inverted.is_empty() {
        vec![Region::gap(bound.begin, bound.begin)]
    } else {
        inverted
    }
}

/// [`invert`] bounded by the whole buffer, `[0, size]`.
pub fn invert_buffer(regions: &[Region], size: usize) -> Vec<Region> {
    invert(regions, Region::new(0, size))
}
