use std::ops::{Add, Index, Mul, Sub};
use units::{Length, in_base_unit};
use crate::Axis;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Index<usize> for Vector {
    type Output = Length;
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index {index} is out of bounds [0,2]")
        }
    }
}

impl Vector {

    pub fn new(x: Length, y: Length, z: Length) -> Self { Self { x, y, z } }

    pub fn zero() -> Self { Self::new(in_base_unit!(0.0), in_base_unit!(0.0), in_base_unit!(0.0)) }

    /// Vector of length `length` pointing along `axis`
    pub fn along(axis: Axis, length: Length) -> Self {
        let zero = in_base_unit!(0.0);
        match axis {
            Axis::X => Self::new(length, zero, zero),
            Axis::Y => Self::new(zero, length, zero),
            Axis::Z => Self::new(zero, zero, length),
        }
    }

    /// Components in base units (micrometres), for handing over to `nalgebra`
    pub fn to_base(&self) -> nalgebra::Vector3<f64> {
        nalgebra::Vector3::new(self.x.value, self.y.value, self.z.value)
    }

}

#[cfg(test)]
mod tests {
    use crate::{Axis, Vector};
    const EPS: f64 = f64::EPSILON;
    use units::uom::si::length::{meter, micrometer};
    use units::{nm, mm, um, assert_uom_eq};
    use rstest::rstest;

    #[test]
    fn vector_components() {
        let v = Vector::new(mm(10.0), nm(1000.0), mm(2.0));
        assert_eq!(           v.x, mm(10.0  ));
        assert_uom_eq!(meter, v.y, mm( 0.001), r2nd <= 4.0 * EPS);
        assert_uom_eq!(meter, v.z, um( 2000.0), r2nd <= 4.0 * EPS);
    }

    #[test]
    fn add_and_scale() {
        let v = Vector::new(um(1.0), um(2.0), um(3.0));
        let w = Vector::new(nm(500.0), um(0.0), um(-1.0));
        let r = (v + w) * 2.0;
        assert_uom_eq!(micrometer, r.x, um(3.0), r2nd <= 4.0 * EPS);
        assert_uom_eq!(micrometer, r.y, um(4.0), r2nd <= 4.0 * EPS);
        assert_uom_eq!(micrometer, r.z, um(4.0), r2nd <= 4.0 * EPS);
    }

    #[rstest]
    #[case(Axis::X, [5.0, 0.0, 0.0])]
    #[case(Axis::Y, [0.0, 5.0, 0.0])]
    #[case(Axis::Z, [0.0, 0.0, 5.0])]
    fn along_axis(#[case] axis: Axis, #[case] expected: [f64; 3]) {
        let v = Vector::along(axis, units::in_base_unit!(5.0));
        let b = v.to_base();
        assert_eq!([b.x, b.y, b.z], expected);
    }

    #[test]
    fn index_for_vector() {
        let v = Vector::new(um(1.0), um(2.0), um(3.0));
        assert_uom_eq!(micrometer, v[0], nm(1000.0), r2nd <= 4.0 * EPS);
        assert_uom_eq!(micrometer, v[1], nm(2000.0), r2nd <= 4.0 * EPS);
        assert_uom_eq!(micrometer, v[2], nm(3000.0), r2nd <= 4.0 * EPS);
    }

}
