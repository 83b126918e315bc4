//! Boundary scans along a single line of pixels.
//!
//! Every edge search in the bezel stages is "first or last position in
//! `0..len` where a predicate holds", either over single indices or over
//! adjacent pairs. Both go through [`find_index`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Lowest index first; yields the first match.
    Forward,
    /// Highest index first; yields the last match.
    Backward,
}

/// First (`Forward`) or last (`Backward`) index in `0..len` matching `predicate`.
pub fn find_index<F>(len: u32, direction: ScanDirection, mut predicate: F) -> Option<u32>
where
    F: FnMut(u32) -> bool,
{
    match direction {
        ScanDirection::Forward => (0..len).find(|&i| predicate(i)),
        ScanDirection::Backward => (0..len).rev().find(|&i| predicate(i)),
    }
}

/// First or last adjacent pair `(i, i + 1)` in `0..len` matching `predicate`.
pub fn find_transition<F>(len: u32, direction: ScanDirection, mut predicate: F) -> Option<(u32, u32)>
where
    F: FnMut(u32, u32) -> bool,
{
    let pairs = len.saturating_sub(1);
    find_index(pairs, direction, |i| predicate(i, i + 1)).map(|i| (i, i + 1))
}
