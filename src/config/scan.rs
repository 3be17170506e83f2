//! Configuration file parser for scans
//!
//! Everything is optional; an empty file gives the defaults.
//!
//! ```toml
//! [faulty_pixels]
//! spike_factor = 2.0
//! shift_coeff = 1e4
//! shift_axis = "x"
//!
//! [mesh]
//! center = "bbox"
//! ```

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub faulty_pixels: FaultyPixels,

    #[serde(default)]
    pub mesh: MeshConfig,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MeshConfig {
    /// Which point of the mesh is placed at the rotation centre
    #[serde(default)]
    pub center: Center,
}

pub fn read_config_file(path: &Path) -> Result<Config> {
    let config = fs::read_to_string(path)?;
    Ok(toml::from_str(&config)?)
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::{fs, path::Path};
use serde::Deserialize;

use crate::{
    error::Result,
    faulty::FaultyPixels,
    mesh::Center,
};
