mod exports;
pub use exports::*;

pub mod error;
pub mod utils;
pub mod image;
pub mod mesh;
pub mod device;
pub mod projector;
pub mod fov;
pub mod angles;
pub mod partition;
pub mod faulty;
pub mod io;
pub mod output;
pub mod config;
pub mod logging;
pub mod progress;
pub mod scan;
pub mod orchestrate;

#[cfg(test)]
mod testing;
