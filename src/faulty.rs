//! Detection and disambiguation of faulty pixels.
//!
//! Rasterization occasionally produces pixels which are wildly too bright (a
//! pixel centre falling exactly on an edge shared by two triangles is counted
//! twice) or invalid (NaN). The signal varies smoothly between neighbouring
//! angles, so such a projection stands out by its maximum compared to the
//! maximum of the previous projection. A suspect projection is re-rendered
//! with the mesh nudged by a small fraction of a pixel in either direction,
//! and the candidate with the smallest maximum is kept.
//!
//! This is a heuristic: neither the threshold nor the size of the nudge have
//! a derivation, hence both are configurable.

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FaultyPixels {
    /// A projection is suspect when its maximum exceeds the previous one by
    /// more than this factor
    pub spike_factor: Intensityf32,
    /// The nudge is `pixel_size / shift_coeff`
    pub shift_coeff: f64,
    /// Direction of the nudge
    pub shift_axis: Axis,
}

impl Default for FaultyPixels {
    fn default() -> Self { Self { spike_factor: 2.0, shift_coeff: 1e4, shift_axis: Axis::X } }
}

impl FaultyPixels {

    /// Is the projection with maximum `current` suspect, given that the
    /// previously accepted projection had maximum `previous`? The first
    /// projection of a slice has nothing to compare against and is never
    /// suspect.
    pub fn is_anomalous(&self, current: Intensityf32, previous: Option<Intensityf32>) -> bool {
        match previous {
            None       => false,
            Some(prev) => current.is_nan() || current > self.spike_factor * prev,
        }
    }

    /// Perturbations of the mesh position used to re-render a suspect
    /// projection, in the order in which they are tried
    pub fn shifts(&self, pixel_size: Length) -> [Vector; 2] {
        let nudge = pixel_size / self.shift_coeff;
        [Vector::along(self.shift_axis, -nudge),
         Vector::along(self.shift_axis,  nudge)]
    }
}

/// Renderings of the same angle: the original first, then one per shift.
#[derive(Clone, Debug)]
pub struct Candidates {
    images: Vec<Projection>,
    maxima: Vec<Intensityf32>,
}

impl Candidates {

    pub fn new(original: Projection) -> Self {
        let mut this = Self { images: Vec::with_capacity(3), maxima: Vec::with_capacity(3) };
        this.push(original);
        this
    }

    pub fn push(&mut self, image: Projection) {
        self.maxima.push(image.summary_max());
        self.images.push(image);
    }

    pub fn maxima(&self) -> &[Intensityf32] { &self.maxima }

    pub fn len(&self) -> usize { self.images.len() }

    /// Index of the candidate to keep
    pub fn best(&self) -> usize { select_best(&self.maxima) }

    /// Discard all but the chosen candidate
    pub fn into_chosen(mut self, index: usize) -> (Projection, Intensityf32) {
        (self.images.swap_remove(index), self.maxima[index])
    }
}

/// Position of the smallest maximum; the first one wins ties. NaN never beats
/// a number; if all are NaN, the first is chosen.
pub fn select_best(maxima: &[Intensityf32]) -> usize {
    maxima.iter()
        .enumerate()
        .filter(|(_, m)| !m.is_nan())
        .fold(None, |best: Option<(usize, Intensityf32)>, (i, &m)| match best {
            Some((_, b)) if b <= m => best,
            _                      => Some((i, m)),
        })
        .map_or(0, |(i, _)| i)
}


// ----- Imports ------------------------------------------------------------------------------------------
use serde::Deserialize;

use geometry::{Axis, Vector};
use units::{Length, todo::Intensityf32};

use crate::image::Projection;
