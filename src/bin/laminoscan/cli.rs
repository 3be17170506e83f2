/// Command line interface for `laminoscan` executable
#[derive(clap::Parser, Debug, Clone)]
#[clap(
    name = "laminoscan",
    about = "Simulate laminographic projections of a triangulated mesh",
)]
pub (super) struct Cli {
    /// Mesh input file (.npy, .raw or .obj), coordinates in micrometres
    pub input: PathBuf,

    /// Data set name, if not specified guessed from input
    #[clap(long)]
    pub dset: Option<String>,

    /// Number of projections [default: derived from the resolution]
    #[clap(long)]
    pub num_projections: Option<usize>,

    /// Output goes to 'out-directory/dset.../projections'
    #[clap(long, default_value = "out")]
    pub out_directory: PathBuf,

    /// Pixel size: bare numbers are nanometres
    #[clap(long, value_parser = parse_length_nm, default_value = "750")]
    pub pixel_size: Length,

    /// Laminographic angle in degrees
    #[clap(long, default_value = "5")]
    pub lamino_angle: f64,

    /// Tomographic rotation axis (y: up, z: beam direction)
    #[clap(long, value_enum, default_value = "y")]
    pub rotation_axis: RotationAxis,

    /// Number of compute devices to use
    #[clap(long, default_value = "1", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub num_devices: usize,

    /// Number of rayon threads per device (0: one per core)
    #[clap(short = 'j', long, default_value = "1")]
    pub threads: usize,

    /// Only use the OBJ object with this name
    #[clap(long)]
    pub mesh_name: Option<String>,

    /// TOML file with faulty-pixel and mesh settings
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Don't show the progress bar
    #[clap(short, long)]
    pub quiet: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub (super) enum RotationAxis { Y, Z }

impl From<RotationAxis> for Axis {
    fn from(axis: RotationAxis) -> Self {
        match axis {
            RotationAxis::Y => Axis::Y,
            RotationAxis::Z => Axis::Z,
        }
    }
}

impl Cli {
    /// Arguments worth reporting in the run log
    pub (super) fn fields(&self) -> Vec<(&'static str, String)> {
        let opt = |x: Option<String>| x.unwrap_or_else(|| "-".into());
        vec![
            ("input"          , self.input.display().to_string()),
            ("dset"           , opt(self.dset.clone())),
            ("num_projections", opt(self.num_projections.map(|n| n.to_string()))),
            ("out_directory"  , self.out_directory.display().to_string()),
            ("pixel_size"     , format!("{} nm", nm_(self.pixel_size))),
            ("lamino_angle"   , format!("{} deg", self.lamino_angle)),
            ("rotation_axis"  , Axis::from(self.rotation_axis).to_string()),
            ("num_devices"    , self.num_devices.to_string()),
            ("threads"        , self.threads.to_string()),
            ("mesh_name"      , opt(self.mesh_name.clone())),
            ("config"         , opt(self.config.as_ref().map(|p| p.display().to_string()))),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use float_eq::assert_float_eq;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["laminoscan", "cube.npy"]).unwrap();
        assert_eq!(cli.out_directory, PathBuf::from("out"));
        assert_float_eq!(nm_(cli.pixel_size), 750.0, r2nd <= 1e-12);
        assert_eq!(cli.lamino_angle, 5.0);
        assert_eq!(cli.rotation_axis, RotationAxis::Y);
        assert_eq!(cli.num_devices, 1);
        assert_eq!(cli.num_projections, None);
    }

    #[test]
    fn explicit_options() {
        let cli = Cli::try_parse_from([
            "laminoscan", "scene.obj", "--pixel-size", "0.5 um", "--rotation-axis", "z",
            "--num-devices", "4", "--mesh-name", "Cube", "-j", "8", "--quiet",
        ]).unwrap();
        assert_float_eq!(nm_(cli.pixel_size), 500.0, r2nd <= 1e-12);
        assert_eq!(Axis::from(cli.rotation_axis), Axis::Z);
        assert_eq!(cli.num_devices, 4);
        assert_eq!(cli.threads, 8);
        assert_eq!(cli.mesh_name.as_deref(), Some("Cube"));
        assert!(cli.quiet);
    }

    #[test]
    fn rejected_options() {
        assert!(Cli::try_parse_from(["laminoscan", "m.npy", "--rotation-axis", "x"]).is_err());
        assert!(Cli::try_parse_from(["laminoscan", "m.npy", "--num-devices", "0"]).is_err());
        assert!(Cli::try_parse_from(["laminoscan", "m.npy", "--pixel-size", "big"]).is_err());
    }
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::PathBuf;
use clap::builder::RangedU64ValueParser;
use units::{Length, nm_};
use lamino::{
    Axis,
    utils::parse_length_nm,
};
