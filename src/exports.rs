pub use units::uom::si::Quantity;
pub use units::{Angle, Length, Ratio};
pub use units::todo::{Intensityf32, Thicknessf32};

pub use geometry::{Axis, Extrema, Point, Vector};

pub use crate::error::{Error, Result};
pub use crate::image::{Projection, Shape};
pub use crate::mesh::{Center, Mesh, Pose};
pub use crate::projector::{Device, Projector};
