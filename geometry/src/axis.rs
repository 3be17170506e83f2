use std::str::FromStr;
use serde::Deserialize;

/// One of the three fixed spatial axes. Z is the beam direction, Y points up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis { X, Y, Z }

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> nalgebra::Unit<nalgebra::Vector3<f64>> {
        match self {
            Axis::X => nalgebra::Vector3::x_axis(),
            Axis::Y => nalgebra::Vector3::y_axis(),
            Axis::Z => nalgebra::Vector3::z_axis(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAxisError(pub String);

impl std::fmt::Display for ParseAxisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not an axis: expected one of x, y, z", self.0)
    }
}

impl std::error::Error for ParseAxisError {}

impl FromStr for Axis {
    type Err = ParseAxisError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _   => Err(ParseAxisError(s.into())),
        }
    }
}
