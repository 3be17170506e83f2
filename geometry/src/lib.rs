mod point;
mod vector;
mod axis;
mod extrema;

pub use point::Point;
pub use vector::Vector;
pub use axis::{Axis, ParseAxisError};
pub use extrema::Extrema;
