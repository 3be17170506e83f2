/// Read / write float arrays as raw binary: little-endian `f32`s, nothing else.
///
/// As mesh input, consecutive triples are the `x y z` coordinates of one
/// vertex, in micrometres.

use std::fs::File;
use std::io::{Write, Read, BufWriter, BufReader};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{Error, Result};

pub fn write(data: impl Iterator<Item = f32>, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut buf = BufWriter::new(file);
    for datum in data {
        buf.write_all(&datum.to_le_bytes())?;
    }
    buf.flush()
}

type IORes<T> = std::io::Result<T>;
pub fn read<'a>(path: &Path) -> IORes<impl Iterator<Item = IORes<f32>> + 'a> {
    let file = File::open(path)?;
    let mut buf = BufReader::new(file);
    let mut buffer = [0; 4];

    Ok(std::iter::from_fn(move || {
        use std::io::ErrorKind::UnexpectedEof;
        match buf.read_exact(&mut buffer) {
            Ok(()) => Some(Ok(f32::from_le_bytes(buffer))),
            Err(e) if e.kind() == UnexpectedEof => None,
            Err(e) => Some(Err(e)),
        }
    }))
}

pub fn read_vertices(path: &Path) -> Result<Vec<Point3<f64>>> {
    let values: Vec<f32> = read(path)?.collect::<IORes<_>>()?;
    if values.len() % 3 != 0 {
        return Err(Error::Geometry(format!(
            "{} holds {} floats, which is not a whole number of vertices", path.display(), values.len())));
    }
    Ok(values
       .chunks_exact(3)
       .map(|c| Point3::new(c[0] as f64, c[1] as f64, c[2] as f64))
       .collect())
}
