//! Physical quantities used throughout the scan, expressed in a `uom` system
//! whose base length is the micrometre: mesh geometry is loaded in
//! micrometres, so base-unit values can be handed straight to the rasterizer.

pub mod todo;

pub use uom;

pub mod umks {

  pub mod f64 {
    use uom::{ISQ, system};
    ISQ!(uom::si, f64, (micrometer, kilogram, second, ampere, kelvin, mole, candela));

    /// The full circle constant (τ) Equal to 2π.
    pub const TWOPI: Angle = Angle {
        dimension: std::marker::PhantomData,
        units: std::marker::PhantomData,
        value: std::f64::consts::TAU,
    };
  }

}

pub use uom::si::Quantity;
pub use umks::f64::{Angle, TWOPI, Length, Ratio};

mod units {
  pub use uom::si::{length  ::{nanometer, micrometer, millimeter},
                    ratio   ::ratio,
                    angle   ::{radian, degree},
  };
}

// Making values from float literals seems to be very long-winded, so provide
// some pithily-named convenience constructors.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f64) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(nm     Length          nanometer);
wrap!(um     Length         micrometer);
wrap!(mm     Length         millimeter);
wrap!(ratio  Ratio               ratio);
wrap!(radian Angle              radian);
wrap!(deg    Angle              degree);

// Reverse direction of the above.
pub fn nm_(x: Length) -> f64 { x.get::<units::nanometer>() }
pub fn um_(x: Length) -> f64 { x.get::<units::micrometer>() }

pub fn ratio_ (x: Ratio) -> f64 { x.get::<units::ratio>() }
pub fn radian_(x: Angle) -> f64 { x.get::<units::radian>() }
pub fn deg_   (x: Angle) -> f64 { x.get::<units::degree>() }

#[macro_export]
macro_rules! in_base_unit {
  ($value:expr) => {
    $crate::Quantity {
      dimension: std::marker::PhantomData,
      units: std::marker::PhantomData,
      value: $value,
    }
  };
}

#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}
