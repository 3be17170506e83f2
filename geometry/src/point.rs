use std::ops::Sub;
use units::Length;
use crate::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Point {
    pub fn new(x: Length, y: Length, z: Length) -> Self { Self { x, y, z } }

    /// Coordinates in base units (micrometres)
    pub fn to_base(&self) -> nalgebra::Point3<f64> {
        nalgebra::Point3::new(self.x.value, self.y.value, self.z.value)
    }

    pub fn from_base(p: &nalgebra::Point3<f64>) -> Self {
        use units::in_base_unit;
        Self::new(in_base_unit!(p.x), in_base_unit!(p.y), in_base_unit!(p.z))
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use units::{um, assert_uom_eq, in_base_unit};
    use units::uom::si::length::micrometer;

    #[test]
    fn point_minus_point_is_vector() {
        let lhs = Point::new(um(3.0), um(2.0), um(8.0));
        let rhs = Point::new(um(2.0), um(4.0),    um(2.0));
        let v: Vector = lhs - rhs;
        assert_uom_eq!(micrometer, v.x, um( 1.0), ulps <= 1);
        assert_uom_eq!(micrometer, v.y, um(-2.0), ulps <= 1);
        assert_uom_eq!(micrometer, v.z, um( 6.0), ulps <= 1);
    }

    #[test]
    fn base_roundtrip() {
        let p = Point::new(in_base_unit!(1.5), in_base_unit!(0.25), in_base_unit!(-3.0));
        let b = p.to_base();
        assert_eq!((b.x, b.y, b.z), (1.5, 0.25, -3.0));
        assert_eq!(Point::from_base(&b), p);
    }
}
