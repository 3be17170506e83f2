//! Where projections end up.
//!
//! Every projection is stored under a name derived only from its global angle
//! index, so the set of files produced by a scan does not depend on how the
//! angles were shared out between devices.

/// Destination for the projections chosen by a scan
pub trait ProjectionStore: Sync {
    fn persist(&self, index: usize, projection: &Projection) -> Result<()>;
    /// Where the projection with global angle index `index` goes
    fn location(&self, index: usize) -> PathBuf;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding { Tiff, Raw }

/// Path with a single `{}` placeholder, which is replaced by the zero-padded
/// 4-digit angle index. The extension selects the encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTemplate {
    before: String,
    after: String,
    encoding: Encoding,
}

impl OutputTemplate {

    pub fn new(template: impl AsRef<str>) -> Result<Self> {
        let template = template.as_ref();
        let pieces: Vec<&str> = template.split("{}").collect();
        let [before, after] = pieces[..] else {
            return Err(Error::Template(format!(
                "`{template}` must contain exactly one `{{}}`, found {}", pieces.len() - 1
            )));
        };
        let extension = Path::new(template).extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let encoding = match extension.as_deref() {
            Some("tif") | Some("tiff") => Encoding::Tiff,
            Some("raw")                => Encoding::Raw,
            _ => return Err(Error::Template(format!(
                "`{template}` must end in .tif, .tiff or .raw"
            ))),
        };
        Ok(Self { before: before.into(), after: after.into(), encoding })
    }

    /// File in which the projection with global angle index `index` is stored
    pub fn path(&self, index: usize) -> PathBuf {
        format!("{}{index:04}{}", self.before, self.after).into()
    }
}

impl std::fmt::Display for OutputTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{}}{}", self.before, self.after)
    }
}

impl ProjectionStore for OutputTemplate {
    fn persist(&self, index: usize, projection: &Projection) -> Result<()> {
        let path = self.path(index);
        match self.encoding {
            Encoding::Tiff => tif::write(projection, &path),
            Encoding::Raw  => Ok(raw::write(projection.data.iter().copied(), &path)?),
        }
    }

    fn location(&self, index: usize) -> PathBuf { self.path(index) }
}

/// Layout of the output of one scan:
///
/// ```text
/// {out}/{dset}_lamino_angle_{LL}_deg_axis_{a}_ps_{PPPP}_nm/
///     projections/projection_{}.tif
///     simulation.log
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    pub directory: PathBuf,
}

impl Dataset {

    pub fn new(out: &Path, dset: &str, lamino_angle: Angle, axis: Axis, pixel_size: Length) -> Self {
        let name = format!(
            "{dset}_lamino_angle_{:02}_deg_axis_{axis}_ps_{:04}_nm",
            trunc_to_i64(deg_(lamino_angle)),
            trunc_to_i64(nm_(pixel_size)),
        );
        Self { directory: out.join(name) }
    }

    /// Data set name used when none is given: the input file name without extension
    pub fn default_name(input: &Path) -> String {
        input.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".into())
    }

    pub fn projections_dir(&self) -> PathBuf { self.directory.join("projections") }
    pub fn logfile        (&self) -> PathBuf { self.directory.join("simulation.log") }

    pub fn template(&self) -> Result<OutputTemplate> {
        let path = self.projections_dir().join("projection_{}.tif");
        OutputTemplate::new(path.to_string_lossy())
    }

    pub fn create_dirs(&self) -> Result<()> {
        Ok(std::fs::create_dir_all(self.projections_dir())?)
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::path::{Path, PathBuf};

use geometry::Axis;
use units::{Angle, Length, deg_, nm_};

use crate::{
    error::{Error, Result},
    image::Projection,
    io::{raw, tif},
    utils::trunc_to_i64,
};
