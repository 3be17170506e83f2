//! The size and granularity of the detector's Field of View (FOV), derived
//! from the bounding geometry of the mesh

/// How much wider than the mesh the FOV is made
pub const FOV_MARGIN: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fov {
    /// Full width (and height) of the square detector
    pub size: Length,
    /// Number of pixels along each side
    pub n: usize,
    pub pixel_size: Length,
}

impl Fov {

    /// The FOV must accommodate the mesh whichever way it is turned about the
    /// tomographic axis, so it is based on the widest of the Y and Z extents.
    pub fn new(extrema: &Extrema, pixel_size: Length) -> Self {
        let [_, y, z] = extrema.extents();
        let widest: Length = in_base_unit!(y.value.max(z.value));
        let size = widest * FOV_MARGIN;
        let n = ceil_to_usize(ratio_(size / pixel_size));
        Self { size, n, pixel_size }
    }

    pub fn shape(&self) -> Shape { (self.n, self.n) }

    /// Projections needed to cover 360 degrees: the tomographic rule of thumb
    /// of π/2 projections per pixel across for 180 degrees, doubled
    pub fn default_projections(&self) -> usize {
        ceil_to_usize(std::f64::consts::PI * self.n as f64)
    }

    /// Middle of the detector, where the mesh is placed
    pub fn centre(&self) -> Vector {
        let (rows, cols) = self.shape();
        Vector::new(self.pixel_size * cols as f64 / 2.0,
                    self.pixel_size * rows as f64 / 2.0,
                    in_base_unit!(0.0))
    }

    /// Attributes worth reporting in the run log
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("n"         , self.n.to_string()),
            ("ps"        , format!("{} nm", nm_(self.pixel_size))),
            ("FOV"       , format!("{:.3} um", um_(self.size))),
        ]
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use geometry::{Extrema, Vector};
use units::{Length, in_base_unit, nm_, ratio_, um_};

use crate::{image::Shape, utils::ceil_to_usize};
