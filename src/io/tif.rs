//! Projections as single-channel 32-bit float TIFF images

pub fn write(projection: &Projection, path: &Path) -> Result<()> {
    let (rows, cols) = projection.shape();
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = TiffEncoder::new(file)?;
    encoder.write_image::<colortype::Gray32Float>(cols as u32, rows as u32, &projection.row_major())?;
    Ok(())
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::{
    fs::File,
    io::BufWriter,
    path::Path,
};
use tiff::encoder::{colortype, TiffEncoder};

use crate::{error::Result, image::Projection};
