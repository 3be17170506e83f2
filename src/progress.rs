//! Progress of a scan, shared by all workers.
//!
//! The lock around [`Inner`] is the one point of synchronization between
//! workers: every log line about an angle or a finished slice is written while
//! holding it, with the progress bar suspended, so that lines from different
//! workers never interleave.

pub struct Progress(Mutex<Inner>);

struct Inner {
    bar: ProgressBar,
    records: Vec<AngleRecord>,
    slices: Vec<SliceSummary>,
}

/// What happened to one angle
#[derive(Clone, Debug, PartialEq)]
pub struct AngleRecord {
    pub worker: usize,
    /// Global angle index
    pub index: usize,
    /// 0-based position within the worker's slice
    pub position: usize,
    pub slice_len: usize,
    pub duration: Duration,
    pub angle: Angle,
    /// Maxima of all candidates rendered for this angle, original first
    pub maxima: Vec<Intensityf32>,
}

impl std::fmt::Display for AngleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { worker, index, position, slice_len, duration, angle, maxima } = self;
        write!(f, "{worker}: {:04}/{slice_len:04} in {:6.2} s, angle: {:6.2} deg, index: {index}, maxima: {maxima:?}",
               position + 1, duration.as_secs_f64(), deg_(*angle))
    }
}

/// Angles of one slice which needed disambiguation, and where they were stored
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceSummary {
    pub worker: usize,
    pub checked: Vec<usize>,
    pub files: Vec<PathBuf>,
}

impl Progress {

    /// `total` is the number of angles in the whole scan, over all workers
    pub fn new(total: usize, quiet: bool) -> Self {
        let bar = if quiet { ProgressBar::hidden() } else { ProgressBar::new(total as u64) };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {wide_bar} {pos}/{len} projections ({eta_precise})") {
            bar.set_style(style);
        }
        Self(Mutex::new(Inner { bar, records: vec![], slices: vec![] }))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A worker which panicked while logging leaves nothing half-updated
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn angle_done(&self, record: AngleRecord) {
        let mut inner = self.lock();
        inner.bar.suspend(|| log::info!("{record}"));
        inner.bar.inc(1);
        inner.records.push(record);
    }

    pub fn slice_done(&self, summary: SliceSummary) {
        let mut inner = self.lock();
        inner.bar.suspend(|| {
            log::info!("Checked indices: {:?}", summary.checked);
            log::info!("Which map to files: {:?}", summary.files);
        });
        inner.slices.push(summary);
    }

    pub fn finish(&self) {
        let inner = self.lock();
        inner.bar.finish_and_clear();
        log::info!("Processed {} projections", group_digits(inner.records.len()));
    }

    /// Records of all angles processed so far, in order of completion
    pub fn records(&self) -> Vec<AngleRecord> { self.lock().records.clone() }

    /// Summaries of all finished slices, in order of completion
    pub fn slices(&self) -> Vec<SliceSummary> { self.lock().slices.clone() }
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use indicatif::{ProgressBar, ProgressStyle};

use units::{Angle, deg_, todo::Intensityf32};

use crate::utils::group_digits;
