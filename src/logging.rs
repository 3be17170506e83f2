//! Log records go to stderr and, for a scan, also to the run's log file.
//!
//! The level defaults to `info` and can be changed with `RUST_LOG`.

pub fn init(logfile: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();
    if let Some(path) = logfile {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(Tee { first: std::io::stderr(), second: file })));
    }
    builder.try_init()?;
    Ok(())
}

/// Writer duplicating everything into two others
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::{
    fs::OpenOptions,
    io::Write,
    path::Path,
};
use env_logger::{Builder, Env, Target};

use crate::error::Result;
