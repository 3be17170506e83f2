//! Meshes stored as Wavefront `.obj` files.

/// Read every face of the file (or only those of the object called `name`) as
/// a flat list of triangle vertices. Polygons are fan-triangulated.
pub fn read_vertices(path: &Path, name: Option<&str>) -> Result<Vec<Point3<f64>>> {
    let options = tobj::LoadOptions { triangulate: true, single_index: true, ..Default::default() };
    let (models, _materials) = tobj::load_obj(path, &options)?;
    triangles_of(&models, name)
}

fn triangles_of(models: &[tobj::Model], name: Option<&str>) -> Result<Vec<Point3<f64>>> {
    let selected = models.iter()
        .filter(|model| name.map_or(true, |name| model.name == name))
        .collect::<Vec<_>>();
    if let (Some(name), true) = (name, selected.is_empty()) {
        let available = models.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        return Err(Error::Geometry(format!("no object named '{name}' in OBJ file; available: {available:?}")));
    }
    let mut vertices = vec![];
    for model in selected {
        let tobj::Mesh { positions, indices, .. } = &model.mesh;
        for &i in indices {
            let i = i as usize;
            let xyz = positions.get(3 * i .. 3 * i + 3).ok_or_else(|| Error::Geometry(
                format!("face of '{}' refers to missing vertex {i}", model.name)
            ))?;
            vertices.push(Point3::new(xyz[0] as f64, xyz[1] as f64, xyz[2] as f64));
        }
    }
    Ok(vertices)
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::path::Path;
use nalgebra::Point3;

use crate::error::{Error, Result};
