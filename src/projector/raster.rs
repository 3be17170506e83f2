//! Reference rasterizing projector.
//!
//! The beam travels along +Z and the detector is the XY plane: pixel `(row,
//! col)` has its centre at `((col + ½)·ps, (row + ½)·ps)`. For each triangle
//! whose XY footprint covers a pixel centre, the depth of the triangle at that
//! centre is added to the pixel, with the sign of the triangle's XY
//! orientation. For a closed mesh with outward-facing triangles listed
//! counter-clockwise, entry and exit surfaces cancel everywhere except over the
//! body, leaving its thickness along the beam, in micrometres.
//!
//! The coverage test includes the triangle edges, so a pixel centre lying
//! exactly on an edge shared by two triangles is counted twice. This is the
//! faulty-pixel artifact which the scanner detects and works around by
//! nudging the mesh.
//!
//! Rows are filled in parallel; within a row, triangles are always visited in
//! mesh order, so the result does not depend on the number of threads.

pub fn project(mesh: &Mesh, (rows, cols): Shape, pixel_size: Length) -> Projection {
    let ps = pixel_size.value;
    let triangles: Vec<Footprint> = mesh
        .triangles()
        .filter_map(|t| Footprint::new(t, ps))
        .collect();

    let mut image = Projection::zeros((rows, cols));
    image.data
        .axis_iter_mut(ArrayAxis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut pixels)| {
            let y = row as f64 + 0.5;
            let mut sums = vec![0.0_f64; cols];
            for t in triangles.iter().filter(|t| t.ymin <= y && y <= t.ymax) {
                for col in t.columns(cols) {
                    let x = col as f64 + 0.5;
                    if let Some(depth) = t.depth_at(x, y) {
                        sums[col] += t.sign * depth;
                    }
                }
            }
            for (pixel, sum) in pixels.iter_mut().zip(sums) {
                *pixel = sum as Thicknessf32;
            }
        });
    image
}

/// A triangle flattened onto the detector: XY in pixel units, Z kept in
/// micrometres.
struct Footprint {
    a: Point3<f64>,
    b: Point3<f64>,
    c: Point3<f64>,
    /// Twice the signed XY area, in pixels²
    area2: f64,
    sign: f64,
    xmin: f64, xmax: f64,
    ymin: f64, ymax: f64,
}

impl Footprint {

    /// `None` for triangles seen edge-on, which contribute nothing
    fn new([a, b, c]: [Point3<f64>; 3], ps: f64) -> Option<Self> {
        let flatten = |p: Point3<f64>| Point3::new(p.x / ps, p.y / ps, p.z);
        let (a, b, c) = (flatten(a), flatten(b), flatten(c));
        let area2 = edge(&a, &b, &c);
        if area2 == 0.0 || !area2.is_finite() && !area2.is_nan() { return None }
        // `f64::min`/`max` skip NaN, so NaN geometry must cover the whole
        // detector explicitly to reach the image
        let ([xmin, xmax], [ymin, ymax]) = if area2.is_nan() {
            ([f64::NEG_INFINITY, f64::INFINITY], [f64::NEG_INFINITY, f64::INFINITY])
        } else {
            ([a.x.min(b.x).min(c.x), a.x.max(b.x).max(c.x)],
             [a.y.min(b.y).min(c.y), a.y.max(b.y).max(c.y)])
        };
        Some(Self { a, b, c, area2, sign: area2.signum(), xmin, xmax, ymin, ymax })
    }

    /// Columns whose centres lie within the horizontal extent of the triangle
    fn columns(&self, cols: usize) -> std::ops::Range<usize> {
        if cols == 0 || self.xmax < 0.5 { return 0..0 }
        let first = (self.xmin - 0.5).ceil().max(0.0) as usize;
        let last  = (self.xmax - 0.5).floor().min((cols - 1) as f64) as usize;
        first..(last + 1).max(first)
    }

    /// Depth of the triangle at `(x, y)`, if that point is inside it (edges
    /// included)
    fn depth_at(&self, x: f64, y: f64) -> Option<f64> {
        let p = Point3::new(x, y, 0.0);
        let wa = edge(&self.b, &self.c, &p) / self.area2;
        let wb = edge(&self.c, &self.a, &p) / self.area2;
        let wc = edge(&self.a, &self.b, &p) / self.area2;
        if wa >= 0.0 && wb >= 0.0 && wc >= 0.0 {
            Some(wa * self.a.z + wb * self.b.z + wc * self.c.z)
        } else if wa.is_nan() || wb.is_nan() || wc.is_nan() {
            Some(f64::NAN)
        } else {
            None
        }
    }
}

/// Twice the signed area of the XY triangle `(a, b, p)`
#[inline]
fn edge(a: &Point3<f64>, b: &Point3<f64>, p: &Point3<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}


// ----- Imports ------------------------------------------------------------------------------------------
use nalgebra::Point3;
use ndarray::Axis as ArrayAxis;
use rayon::prelude::*;

use units::{Length, todo::Thicknessf32};

use crate::{
    image::{Projection, Shape},
    mesh::Mesh,
};
