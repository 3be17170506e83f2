//! Sequential scan of one worker's slice of the angle sequence.
//!
//! For every angle the mesh is posed afresh, rendered, and checked for faulty
//! pixels against the previously accepted projection. A suspect projection is
//! re-rendered with the mesh nudged in both directions and the candidate with
//! the smallest maximum is kept. The accepted projection is stored under its
//! global angle index.

/// Parameters which are the same for every angle of a scan
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Setup {
    pub shape: Shape,
    pub pixel_size: Length,
    /// Translation which brings the mesh to the middle of the field of view
    pub centre: Vector,
    pub lamino_angle: Angle,
    pub axis: Axis,
    pub faulty: FaultyPixels,
}

impl Setup {
    pub fn pose(&self, tomo_angle: Angle, nudge: Vector) -> Pose {
        Pose {
            shift: self.centre + nudge,
            lamino_angle: self.lamino_angle,
            tomo_angle,
            axis: self.axis,
        }
    }
}

/// Outcome of a completed slice
#[derive(Debug)]
pub struct SliceReport {
    pub worker: usize,
    pub range: Range<usize>,
    /// Global indices of the angles which needed disambiguation
    pub checked: Vec<usize>,
    /// Projection accepted for the last angle of the slice
    pub last: Option<Projection>,
}

/// State carried from one angle to the next. Only `last` influences the
/// processing of the following angle.
#[derive(Default)]
struct ScanState {
    last: Option<Intensityf32>,
    checked: Vec<usize>,
    chosen: Option<Projection>,
}

pub struct Scanner<'a, P, S> {
    pub worker: usize,
    pub projector: &'a P,
    pub store: &'a S,
    pub setup: &'a Setup,
    pub progress: &'a Progress,
    /// Raised when any worker fails: remaining angles are abandoned
    pub abort: &'a AtomicBool,
}

impl<'a, P: Projector, S: ProjectionStore> Scanner<'a, P, S> {

    /// Process the angles with global indices in `range`, in increasing order
    pub fn scan_slice(&self, mesh: &mut Mesh, angles: &AngleSequence, range: Range<usize>) -> Result<SliceReport> {
        let slice_len = range.len();
        let state = angles
            .enumerate(range.clone())
            .enumerate()
            .try_fold(ScanState::default(), |state, (position, (index, angle))| {
                if self.abort.load(Ordering::SeqCst) {
                    return Err(Error::Aborted { worker: self.worker });
                }
                self.scan_angle(mesh, state, position, slice_len, index, angle)
            })?;

        let ScanState { checked, chosen, .. } = state;
        let files = checked.iter().map(|&i| self.store.location(i)).collect();
        self.progress.slice_done(SliceSummary { worker: self.worker, checked: checked.clone(), files });
        Ok(SliceReport { worker: self.worker, range, checked, last: chosen })
    }

    fn scan_angle(
        &self,
        mesh: &mut Mesh,
        mut state: ScanState,
        position: usize,
        slice_len: usize,
        index: usize,
        angle: Angle,
    ) -> Result<ScanState> {
        let faulty = &self.setup.faulty;
        let start = Instant::now();

        let mut candidates = Candidates::new(self.render(mesh, angle, Vector::zero())?);
        if faulty.is_anomalous(candidates.maxima()[0], state.last) {
            state.checked.push(index);
            for nudge in faulty.shifts(self.setup.pixel_size) {
                candidates.push(self.render(mesh, angle, nudge)?);
            }
        }
        let best = candidates.best();
        let duration = start.elapsed();

        self.progress.angle_done(AngleRecord {
            worker: self.worker,
            index, position, slice_len, duration, angle,
            maxima: candidates.maxima().to_vec(),
        });

        let (chosen, max) = candidates.into_chosen(best);
        self.store.persist(index, &chosen)?;
        Ok(ScanState { last: Some(max), checked: state.checked, chosen: Some(chosen) })
    }

    fn render(&self, mesh: &mut Mesh, angle: Angle, nudge: Vector) -> Result<Projection> {
        mesh.set_pose(&self.setup.pose(angle, nudge));
        self.projector.project(mesh, self.setup.shape, self.setup.pixel_size)
    }
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::{
    ops::Range,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use geometry::{Axis, Vector};
use units::{Angle, Length, todo::Intensityf32};

use crate::{
    angles::AngleSequence,
    error::{Error, Result},
    faulty::{Candidates, FaultyPixels},
    image::{Projection, Shape},
    mesh::{Mesh, Pose},
    output::ProjectionStore,
    progress::{AngleRecord, Progress, SliceSummary},
    projector::Projector,
};
