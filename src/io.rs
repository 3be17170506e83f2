//! Reading meshes and writing projections.

pub mod raw;
pub mod npy;
pub mod obj;
pub mod tif;

/// Mesh file formats, recognized by extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshFormat { Npy, Raw, Obj }

impl MeshFormat {
    pub fn of(path: &Path) -> Result<Self> {
        let extension = path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("npy") => Ok(Self::Npy),
            Some("raw") => Ok(Self::Raw),
            Some("obj") => Ok(Self::Obj),
            _           => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load a triangle soup from `path` and centre it according to `center`.
/// `name` selects a single object in an OBJ file; other formats ignore it.
pub fn read_mesh(path: &Path, name: Option<&str>, center: Center) -> Result<Mesh> {
    let vertices = match MeshFormat::of(path)? {
        MeshFormat::Npy => npy::read_vertices(path)?,
        MeshFormat::Raw => raw::read_vertices(path)?,
        MeshFormat::Obj => obj::read_vertices(path, name)?,
    };
    log::debug!("Read {} vertices from {}", group_digits(vertices.len()), path.display());
    Mesh::new(vertices, center)
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case("bunny.npy", Some(MeshFormat::Npy))]
    #[case("bunny.RAW", Some(MeshFormat::Raw))]
    #[case("a/b.obj"  , Some(MeshFormat::Obj))]
    #[case("bunny.stl", None)]
    #[case("bunny"    , None)]
    fn format_from_extension(#[case] path: &str, #[case] expected: Option<MeshFormat>) {
        assert_eq!(MeshFormat::of(Path::new(path)).ok(), expected);
    }

    #[test]
    fn unsupported_format_names_file() {
        let result = read_mesh(Path::new("mesh.stl"), None, Center::Bbox);
        assert!(matches!(result, Err(Error::UnsupportedFormat(p)) if p == Path::new("mesh.stl")));
    }

    #[test]
    fn npy_mesh_is_centred() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("triangle.npy");
        // Vertices (0,0,0) (4,0,0) (0,2,6), one row per coordinate
        let values = [0.0, 4.0, 0.0,  0.0, 0.0, 2.0,  0.0, 0.0, 6.0];
        std::fs::write(&path, npy::test::npy_bytes("<f8", false, &[3, 3], &values))?;
        let mesh = read_mesh(&path, None, Center::Bbox)?;
        assert_eq!(mesh.n_triangles(), 1);
        let extents = mesh.extrema().extents().map(|l| l.value);
        assert_eq!(extents, [4.0, 2.0, 6.0]);
        assert_eq!(mesh.extrema().along(geometry::Axis::Z).0.value, -3.0);
        Ok(())
    }

    #[test]
    fn raw_mesh_with_partial_vertex() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.raw");
        raw::write([1.0, 2.0, 3.0, 4.0].into_iter(), &path)?;
        assert!(matches!(read_mesh(&path, None, Center::None), Err(Error::Geometry(_))));
        Ok(())
    }

    #[test]
    fn empty_raw_mesh() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.raw");
        raw::write(std::iter::empty(), &path)?;
        assert!(matches!(read_mesh(&path, None, Center::None), Err(Error::Geometry(_))));
        Ok(())
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use std::path::Path;

use crate::{
    error::{Error, Result},
    mesh::{Center, Mesh},
    utils::group_digits,
};
