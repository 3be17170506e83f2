//! Tomographic angles swept during a scan

/// `n` evenly spaced angles covering a full turn, starting at 0 and excluding
/// 360°. An angle's position in the sequence is its global index, which
/// identifies its output file whichever worker processes it.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleSequence(Vec<Angle>);

impl AngleSequence {

    pub fn full_turn(n: usize) -> Self {
        let step = 360.0 / n as f64;
        Self((0..n).map(|i| deg(i as f64 * step)).collect())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, index: usize) -> Option<Angle> { self.0.get(index).copied() }

    /// Angles within `range`, each paired with its global index
    pub fn enumerate(&self, range: Range<usize>) -> impl Iterator<Item = (usize, Angle)> + '_ {
        let start = range.start;
        self.0[range].iter().copied().enumerate().map(move |(i, a)| (start + i, a))
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::ops::Range;
use units::{Angle, deg};
