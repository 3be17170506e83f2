//! Meshes stored as NumPy `.npy` arrays.
//!
//! The native layout has shape `(3, 3·T)`: one row per coordinate, with each
//! column one vertex and every three consecutive vertices one triangle.
//! `(3·T, 3)` (one row per vertex) and `(T, 3, 3)` are also accepted. Format
//! versions 1 to 3, 32- and 64-bit floats of either endianness, and Fortran
//! order are understood.

/// Fixed part of the file, up to and including the header dictionary
#[derive(BinRead, Debug)]
#[br(little, magic = b"\x93NUMPY")]
#[allow(dead_code)]
struct Preamble {
    major: u8,
    minor: u8,
    #[br(if(major == 1))]
    short_len: Option<u16>,
    #[br(if(major >= 2))]
    long_len: Option<u32>,
    #[br(count = short_len.map(usize::from).or(long_len.map(|n| n as usize)).unwrap_or(0))]
    dict: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dtype {
    F4 { big: bool },
    F8 { big: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Header {
    dtype: Dtype,
    fortran_order: bool,
    shape: Vec<usize>,
}

pub fn read_vertices(path: &Path) -> Result<Vec<Point3<f64>>> {
    let mut file = BufReader::new(File::open(path)?);
    parse(&mut file)
}

pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<Vec<Point3<f64>>> {
    let preamble: Preamble = reader.read_le()?;
    if !(1..=3).contains(&preamble.major) {
        return Err(bad(format!("unsupported format version {}.{}", preamble.major, preamble.minor)));
    }
    let header = parse_header(&String::from_utf8_lossy(&preamble.dict))?;
    let count = header.shape.iter()
        .try_fold(1_usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| bad("shape too large"))?;
    let values = (0..count)
        .map(|_| read_value(reader, header.dtype))
        .collect::<binrw::BinResult<Vec<f64>>>()?;
    arrange(&header, &values)
}

fn read_value<R: Read + Seek>(reader: &mut R, dtype: Dtype) -> binrw::BinResult<f64> {
    Ok(match dtype {
        Dtype::F8 { big: false } => reader.read_le::<f64>()?,
        Dtype::F8 { big: true  } => reader.read_be::<f64>()?,
        Dtype::F4 { big: false } => reader.read_le::<f32>()? as f64,
        Dtype::F4 { big: true  } => reader.read_be::<f32>()? as f64,
    })
}

/// Pick the vertices out of the flat `values`, according to shape and order
fn arrange(header: &Header, values: &[f64]) -> Result<Vec<Point3<f64>>> {
    let shape = &header.shape;
    // Flat offset of a multi-index, honouring the storage order
    let offset = |index: &[usize]| -> usize {
        let dims = index.iter().zip(shape.iter());
        let step = |acc: usize, (i, n): (&usize, &usize)| acc * n + i;
        if header.fortran_order { dims.rev().fold(0, step) }
        else                    { dims      .fold(0, step) }
    };
    let vertex = |coordinate: &dyn Fn(usize) -> Vec<usize>| {
        let [x, y, z] = [0, 1, 2].map(|k| values[offset(&coordinate(k))]);
        Point3::new(x, y, z)
    };
    Ok(match shape[..] {
        [3, m]    => (0..m)    .map(|v| vertex(&|k: usize| vec![k, v])).collect(),
        [m, 3]    => (0..m)    .map(|v| vertex(&|k: usize| vec![v, k])).collect(),
        [t, 3, 3] => (0..3 * t).map(|v| vertex(&|k: usize| vec![v / 3, v % 3, k])).collect(),
        _ => return Err(bad(format!("cannot interpret array of shape ({}) as vertices", shape.iter().join(", ")))),
    })
}

/// Parse the Python dict literal describing the array, e.g.
/// `{'descr': '<f8', 'fortran_order': False, 'shape': (3, 36), }`
fn parse_header(text: &str) -> Result<Header> {
    let descr = value_after(text, "descr")?
        .strip_prefix('\'')
        .and_then(|rest| rest.split('\'').next())
        .ok_or_else(|| bad("malformed 'descr'"))?;
    let dtype = match descr {
        "<f8" | "=f8" | "|f8" => Dtype::F8 { big: false },
        ">f8"                 => Dtype::F8 { big: true  },
        "<f4" | "=f4" | "|f4" => Dtype::F4 { big: false },
        ">f4"                 => Dtype::F4 { big: true  },
        other => return Err(bad(format!("unsupported dtype '{other}'"))),
    };
    let fortran_order = value_after(text, "fortran_order")?.starts_with("True");
    let shape = value_after(text, "shape")?
        .strip_prefix('(')
        .and_then(|rest| rest.split(')').next())
        .ok_or_else(|| bad("malformed 'shape'"))?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().map_err(|e| bad(format!("malformed 'shape': {e}"))))
        .collect::<Result<Vec<_>>>()?;
    Ok(Header { dtype, fortran_order, shape })
}

fn value_after<'t>(text: &'t str, key: &str) -> Result<&'t str> {
    let pattern = format!("'{key}':");
    let start = text.find(&pattern).ok_or_else(|| bad(format!("header has no '{key}'")))?;
    Ok(text[start + pattern.len()..].trim_start())
}

fn bad(message: impl std::fmt::Display) -> Error { Error::Geometry(format!("NPY: {message}")) }

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use std::io::Cursor;
    use rstest::rstest;
    use pretty_assertions::assert_eq;

    /// Serialize `values` as a version 1.0 `.npy` file with the given `descr`
    pub(crate) fn npy_bytes(descr: &str, fortran_order: bool, shape: &[usize], values: &[f64]) -> Vec<u8> {
        let shape = match shape {
            [n] => format!("({n},)"),
            _   => format!("({})", shape.iter().map(usize::to_string).collect::<Vec<_>>().join(", ")),
        };
        let order = if fortran_order { "True" } else { "False" };
        let mut dict = format!("{{'descr': '{descr}', 'fortran_order': {order}, 'shape': {shape}, }}");
        // Data starts on a 64-byte boundary; the header ends in a newline
        while (10 + dict.len() + 1) % 64 != 0 { dict.push(' '); }
        dict.push('\n');

        let mut bytes = b"\x93NUMPY\x01\x00".to_vec();
        bytes.extend((dict.len() as u16).to_le_bytes());
        bytes.extend(dict.as_bytes());
        for v in values {
            match descr {
                "<f8" => bytes.extend(v.to_le_bytes()),
                ">f8" => bytes.extend(v.to_be_bytes()),
                "<f4" => bytes.extend((*v as f32).to_le_bytes()),
                ">f4" => bytes.extend((*v as f32).to_be_bytes()),
                _     => unreachable!(),
            }
        }
        bytes
    }

    fn triangle() -> Vec<Point3<f64>> {
        vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0), Point3::new(7.0, 8.0, 9.5)]
    }

    #[rstest]
    // One row per coordinate: x0 x1 x2 y0 y1 y2 z0 z1 z2
    #[case("<f8", false, &[3, 3],    &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.5])]
    #[case(">f8", false, &[3, 3],    &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.5])]
    #[case("<f4", false, &[3, 3],    &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.5])]
    #[case(">f4", false, &[3, 3],    &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.5])]
    // The same array in Fortran order
    #[case("<f8", true , &[3, 3],    &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.5])]
    // One triangle as (1, 3, 3)
    #[case("<f8", false, &[1, 3, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.5])]
    #[case("<f8", true , &[1, 3, 3], &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.5])]
    fn single_triangle(#[case] descr: &str, #[case] fortran: bool, #[case] shape: &[usize], #[case] values: &[f64]) {
        let bytes = npy_bytes(descr, fortran, shape, values);
        let vertices = parse(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(vertices, triangle());
    }

    #[test]
    fn one_row_per_vertex() {
        let values: Vec<f64> = (0..18).map(f64::from).collect();
        let bytes = npy_bytes("<f8", false, &[6, 3], &values);
        let vertices = parse(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[5], Point3::new(15.0, 16.0, 17.0));
    }

    #[test]
    fn one_row_per_coordinate() {
        let values: Vec<f64> = (0..18).map(f64::from).collect();
        let bytes = npy_bytes("<f8", false, &[3, 6], &values);
        let vertices = parse(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[5], Point3::new(5.0, 11.0, 17.0));
    }

    #[test]
    fn unsupported_shape() {
        let bytes = npy_bytes("<f8", false, &[4], &[0.0; 4]);
        assert!(matches!(parse(&mut Cursor::new(bytes)), Err(Error::Geometry(_))));
    }

    #[test]
    fn oversized_shape() {
        let bytes = npy_bytes("<f8", false, &[1 << 32, 1 << 32, 1 << 32], &[]);
        let result = parse(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(Error::Geometry(m)) if m.contains("shape too large")));
    }

    #[test]
    fn not_npy() {
        let result = parse(&mut Cursor::new(b"solid cube\n".to_vec()));
        assert!(matches!(result, Err(Error::Npy(_))));
    }

    #[test]
    fn truncated_payload() {
        let mut bytes = npy_bytes("<f8", false, &[3, 3], &[0.0; 9]);
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(parse(&mut Cursor::new(bytes)), Err(Error::Npy(_))));
    }

    #[test]
    fn header_dict() {
        let header = parse_header("{'descr': '>f4', 'fortran_order': True, 'shape': (3, 36), }").unwrap();
        assert_eq!(header, Header { dtype: Dtype::F4 { big: true }, fortran_order: true, shape: vec![3, 36] });
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};
use binrw::{BinRead, BinReaderExt};
use itertools::Itertools;
use nalgebra::Point3;

use crate::error::{Error, Result};
