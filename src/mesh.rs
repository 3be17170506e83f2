//! Triangulated surface which can be posed in front of the detector.
//!
//! The geometry is a triangle soup: every three consecutive vertices make one
//! triangle. Vertices are stored in base units (micrometres), already shifted
//! according to the mesh's [`Center`] convention. The pose is kept separately,
//! as a rigid transformation which is applied on the fly whenever triangles are
//! requested, so that resetting the pose can never leave residue in the
//! geometry.

/// Which point of the geometry is moved to the origin when the mesh is built
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Center {
    /// Centre of the axis-aligned bounding box
    #[default]
    Bbox,
    /// Mean of all vertices
    Gravity,
    /// Keep the coordinates as loaded
    None,
}

impl std::fmt::Display for Center {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Center::Bbox    => "bbox",
            Center::Gravity => "gravity",
            Center::None    => "none",
        })
    }
}

/// Where and how the mesh is placed for one projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Translation applied after both rotations: FOV centre plus any
    /// faulty-pixel perturbation
    pub shift: Vector,
    /// Tilt about the X axis
    pub lamino_angle: Angle,
    /// Rotation about `axis`
    pub tomo_angle: Angle,
    pub axis: Axis,
}

#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Point3<f64>>,
    center: Center,
    extrema: Extrema,
    pose: Isometry3<f64>,
}

impl Mesh {

    pub fn new(vertices: Vec<Point3<f64>>, center: Center) -> Result<Self> {
        let n = vertices.len();
        if n % 3 != 0 {
            return Err(Error::Geometry(format!("{n} vertices do not make whole triangles")));
        }
        let Some(loaded) = Extrema::from_base(&vertices) else {
            return Err(Error::Geometry("mesh contains no triangles".into()));
        };
        let offset: Vector3<f64> = match center {
            Center::Bbox    => loaded.centre().to_base().coords,
            Center::Gravity => vertices.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n as f64,
            Center::None    => Vector3::zeros(),
        };
        let vertices: Vec<_> = vertices.into_iter().map(|p| p - offset).collect();
        // Recomputed rather than shifted, so that it describes exactly what is stored
        let extrema = Extrema::from_base(&vertices).unwrap_or(loaded);
        Ok(Self { vertices, center, extrema, pose: Isometry3::identity() })
    }

    pub fn from_triangles(triangles: impl IntoIterator<Item = [Point3<f64>; 3]>, center: Center) -> Result<Self> {
        Self::new(triangles.into_iter().flatten().collect(), center)
    }

    pub fn n_triangles(&self) -> usize { self.vertices.len() / 3 }
    pub fn center     (&self) -> Center { self.center }

    /// Bounding geometry of the centred mesh, ignoring the current pose
    pub fn extrema(&self) -> Extrema { self.extrema }

    pub fn pose(&self) -> &Isometry3<f64> { &self.pose }

    pub fn clear_transformation(&mut self) { self.pose = Isometry3::identity(); }

    pub fn translate(&mut self, by: Vector) {
        let v = by.to_base();
        self.pose = self.pose * Isometry3::translation(v.x, v.y, v.z);
    }

    pub fn rotate(&mut self, angle: Angle, axis: Axis) {
        self.pose = self.pose * Isometry3::rotation(axis.unit().into_inner() * radian_(angle));
    }

    /// Discard any previous transformation, then translate, tilt about X and
    /// finally rotate about the tomographic axis. Transformations compose to
    /// the right, so a vertex is first rotated, then tilted, then translated.
    pub fn set_pose(&mut self, pose: &Pose) {
        self.clear_transformation();
        self.translate(pose.shift);
        self.rotate(pose.lamino_angle, Axis::X);
        self.rotate(pose.tomo_angle, pose.axis);
    }

    /// Triangles with the current pose applied, in base units
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        let pose = self.pose;
        self.vertices
            .chunks_exact(3)
            .map(move |t| [pose * t[0], pose * t[1], pose * t[2]])
    }

    /// Attributes worth reporting in the run log
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("n_triangles", group_digits(self.n_triangles())),
            ("center"     , self.center.to_string()),
            ("extrema"    , self.extrema.to_string()),
        ]
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use nalgebra::{Isometry3, Point3, Vector3};
use serde::Deserialize;

use geometry::{Axis, Extrema, Vector};
use units::{Angle, radian_};

use crate::{
    error::{Error, Result},
    utils::group_digits,
};
