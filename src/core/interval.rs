use serde::Serialize;

/// A closed genomic interval `[start, end]`.
///
/// Coordinates are kept exactly as supplied by the input file; no conversion
/// between 0-based and 1-based systems is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Create an interval, returning `None` when `start > end`
    #[must_use]
    pub fn new(start: u64, end: u64) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Check whether `pos` lies within the interval, both bounds inclusive
    #[must_use]
    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Partial overlap test: true if either endpoint of `other` lies within `self`
    #[must_use]
    pub fn touches_endpoint_of(&self, other: &Interval) -> bool {
        self.contains(other.start) || self.contains(other.end)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Decide whether an ORF falls inside any of the BGC regions of its scaffold.
///
/// An ORF counts as inside when its start or its end coordinate lies within a
/// region. An ORF that straddles a region boundary is therefore inside, while an
/// ORF that fully spans a region without either endpoint landing in it is not.
/// Regions are scanned in the order given and the first hit wins.
#[must_use]
pub fn in_bgc(orf: &Interval, bgcs: &[Interval]) -> bool {
    bgcs.iter().any(|bgc| bgc.touches_endpoint_of(orf))
}
