//! Axis-aligned bounding geometry of a set of points

use units::{Length, in_base_unit};
use crate::{Axis, Point};

/// Per-axis `(min, max)` of a collection of points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extrema(pub [(Length, Length); 3]);

impl Extrema {

    /// Bounding geometry of `points`, given in base units. `None` if there are
    /// no points.
    pub fn from_base<'p>(points: impl IntoIterator<Item = &'p nalgebra::Point3<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut lo = [first.x, first.y, first.z];
        let mut hi = lo;
        for p in points {
            for (i, c) in [p.x, p.y, p.z].into_iter().enumerate() {
                lo[i] = lo[i].min(c);
                hi[i] = hi[i].max(c);
            }
        }
        Some(Self([0, 1, 2].map(|i| (in_base_unit!(lo[i]), in_base_unit!(hi[i])))))
    }

    pub fn along(&self, axis: Axis) -> (Length, Length) { self.0[axis.index()] }

    /// `max - min` along each axis
    pub fn extents(&self) -> [Length; 3] { self.0.map(|(lo, hi)| hi - lo) }

    pub fn centre(&self) -> Point {
        let [x, y, z] = self.0.map(|(lo, hi)| (lo + hi) / 2.0);
        Point::new(x, y, z)
    }
}

impl std::fmt::Display for Extrema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.0.map(|(lo, hi)| format!("({:.3}, {:.3})", lo.value, hi.value));
        write!(f, "[{x}, {y}, {z}] um")
    }
}
