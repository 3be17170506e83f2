//! Rendering of projection images of a posed mesh.
//!
//! The scan only needs *something* which, given a posed mesh, produces one 2D
//! image: this is abstracted by the `Projector` trait. The implementation
//! provided here is `Device`, a compute device backed by its own thread pool,
//! which runs the reference rasterizer in `raster`.

/// Abstract interface for anything which can render one projection of a mesh
/// in its current pose.
pub trait Projector {
    fn project(&self, mesh: &Mesh, shape: Shape, pixel_size: Length) -> Result<Projection>;
}

pub mod raster;

pub use crate::device::Device;

impl Projector for Device {
    fn project(&self, mesh: &Mesh, shape: Shape, pixel_size: Length) -> Result<Projection> {
        Ok(self.install(|| raster::project(mesh, shape, pixel_size)))
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use units::Length;

use crate::{
    error::Result,
    image::{Projection, Shape},
    mesh::Mesh,
};
