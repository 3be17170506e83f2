//! Fan-out of a scan over several compute devices.
//!
//! One worker thread per device. Each worker brings up its own device, takes
//! its own copy of the mesh, and scans its share of the angles. The only state
//! shared between workers is the progress log and an abort flag: when one
//! worker fails, the others stop before their next angle.

/// What the user asked for
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Request {
    pub pixel_size: Length,
    pub lamino_angle: Angle,
    pub axis: Axis,
    /// Derived from the resolution when absent
    pub num_projections: Option<usize>,
    pub faulty: FaultyPixels,
}

/// Global parameters of a scan, computed once from the mesh and the request
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub fov: Fov,
    pub angles: AngleSequence,
    pub setup: Setup,
}

impl Plan {

    pub fn new(mesh: &Mesh, request: &Request) -> Self {
        let fov = Fov::new(&mesh.extrema(), request.pixel_size);
        let n_angles = request.num_projections.unwrap_or_else(|| fov.default_projections());
        let setup = Setup {
            shape:        fov.shape(),
            pixel_size:   request.pixel_size,
            centre:       fov.centre(),
            lamino_angle: request.lamino_angle,
            axis:         request.axis,
            faulty:       request.faulty,
        };
        Self { fov, angles: AngleSequence::full_turn(n_angles), setup }
    }

    /// Attributes worth reporting in the run log
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = self.fov.fields();
        fields.push(("Number of projections", group_digits(self.angles.len())));
        fields.push(("lamino_angle", format!("{:.2} deg", deg_(self.setup.lamino_angle))));
        fields.push(("rotation_axis", self.setup.axis.to_string()));
        fields
    }
}

/// Scan all angles of `plan` with `n_workers` workers, worker `k` using the
/// device returned by `make_device(k)`.
///
/// Returns the first error (in worker order) which did not merely result from
/// another worker's failure. With a single worker, the projection accepted for
/// the last angle is returned.
pub fn run<P, F, S>(
    plan: &Plan,
    mesh: &Mesh,
    n_workers: usize,
    make_device: F,
    store: &S,
    progress: &Progress,
) -> Result<Option<Projection>>
where
    P: Projector,
    F: Fn(usize) -> Result<P> + Sync,
    S: ProjectionStore,
{
    assert!(n_workers > 0, "a scan needs at least one worker");
    log::info!("Scanning {} angles with {n_workers} worker(s)", group_digits(plan.angles.len()));
    let abort = AtomicBool::new(false);

    let work = |worker: usize| -> Result<SliceReport> {
        let _raise = RaiseOnPanic(&abort);
        let device = make_device(worker)?;
        let mut mesh = mesh.clone();
        let range = partition(plan.angles.len(), n_workers, worker);
        log::debug!("Worker {worker} scans angles {range:?}");
        let scanner = Scanner { worker, projector: &device, store, setup: &plan.setup, progress, abort: &abort };
        scanner.scan_slice(&mut mesh, &plan.angles, range)
    };

    let results: Vec<Result<SliceReport>> = thread::scope(|s| {
        let handles: Vec<_> = (0..n_workers)
            .map(|worker| {
                let (work, abort) = (&work, &abort);
                s.spawn(move || {
                    let result = work(worker);
                    if result.is_err() { abort.store(true, Ordering::SeqCst); }
                    result
                })
            })
            .collect();
        handles.into_iter()
            .enumerate()
            .map(|(worker, handle)| handle.join().unwrap_or(Err(Error::WorkerPanicked { worker })))
            .collect()
    });

    let mut reports = vec![];
    let mut aborted = None;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e @ Error::Aborted { .. }) => { aborted.get_or_insert(e); },
            Err(e) => return Err(e),
        }
    }
    if let Some(e) = aborted { return Err(e) }

    let checked: Vec<usize> = reports.iter().flat_map(|r| r.checked.iter().copied()).collect();
    log::info!("Angles needing disambiguation: {}", group_digits(checked.len()));
    Ok(if n_workers == 1 { reports.pop().and_then(|r| r.last) } else { None })
}

/// Tells the other workers to stop if this one panics
struct RaiseOnPanic<'a>(&'a AtomicBool);

impl Drop for RaiseOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() { self.0.store(true, Ordering::SeqCst); }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{collections::{BTreeMap, BTreeSet}, time::Duration};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use nalgebra::Point3;
    use units::{deg, in_base_unit};
    use crate::{
        image::Shape,
        mesh::Center,
        projector::Device,
        scan::test::{Memory, Scripted},
        testing::cube,
    };

    fn request(num_projections: Option<usize>) -> Request {
        Request {
            pixel_size: in_base_unit!(1.0),
            lamino_angle: deg(10.0),
            axis: Axis::Y,
            num_projections,
            faulty: FaultyPixels::default(),
        }
    }

    fn slab() -> Mesh {
        // Extrema [(0,10), (0,10), (0,5)] before centring
        let scale = |p: Point3<f64>| Point3::new(10.0 * p.x, 10.0 * p.y, 5.0 * p.z);
        Mesh::from_triangles(cube(1.0).into_iter().map(|t| t.map(scale)), Center::Bbox).unwrap()
    }

    #[test]
    fn plan_from_extrema() {
        let plan = Plan::new(&slab(), &request(None));
        assert_eq!(plan.setup.shape, (11, 11));
        assert_eq!(plan.angles.len(), 35);
        assert_eq!(plan.setup.centre.x.value, 5.5);
        assert_eq!(plan.setup.centre.y.value, 5.5);
    }

    #[test]
    fn explicit_number_of_projections() {
        let plan = Plan::new(&slab(), &request(Some(8)));
        assert_eq!(plan.angles.len(), 8);
        assert_eq!(plan.angles.get(2), Some(deg(90.0)));
    }

    struct Outcome {
        last: Option<Projection>,
        stored: BTreeMap<usize, Projection>,
        checked: BTreeSet<usize>,
    }

    fn scan_with(n_workers: usize) -> Outcome {
        let mesh = Mesh::from_triangles(cube(4.0), Center::Bbox).unwrap();
        let plan = Plan::new(&mesh, &request(Some(10)));
        let store = Memory::default();
        let progress = Progress::new(plan.angles.len(), true);
        let last = run(&plan, &mesh, n_workers, |i| Device::init(i, 1), &store, &progress).unwrap();
        assert_eq!(progress.records().len(), 10);
        assert_eq!(progress.slices().len(), n_workers);
        let checked = progress.slices().into_iter().flat_map(|s| s.checked).collect();
        Outcome { last, stored: store.0.into_inner().unwrap(), checked }
    }

    #[test]
    fn output_is_independent_of_number_of_workers() {
        let one  = scan_with(1);
        let four = scan_with(4);
        let all = (0..10).collect::<Vec<_>>();
        assert_eq!(one .stored.keys().copied().collect::<Vec<_>>(), all);
        assert_eq!(four.stored.keys().copied().collect::<Vec<_>>(), all);
        // Baselines restart with every slice, so only angles which were
        // accepted without disambiguation in both runs must agree
        for i in all {
            if !one.checked.contains(&i) && !four.checked.contains(&i) {
                assert_eq!(one.stored[&i], four.stored[&i], "angle {i}");
            }
        }
        assert_eq!(one.last.as_ref(), one.stored.get(&9));
        assert!(four.last.is_none());
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    fn every_angle_is_scanned_once(#[case] n_workers: usize) {
        let mesh = slab();
        let plan = Plan::new(&mesh, &request(Some(7)));
        let store = Memory::default();
        let progress = Progress::new(7, true);
        run(&plan, &mesh, n_workers, |_| Ok(Scripted::new(&[1.0; 7])), &store, &progress).unwrap();
        let indices: Vec<_> = progress.records().iter().map(|r| r.index).collect();
        assert_eq!(indices.len(), 7);
        assert_eq!(indices.iter().collect::<BTreeSet<_>>().len(), 7);
        let workers: BTreeSet<_> = progress.records().iter().map(|r| r.worker).collect();
        assert_eq!(workers, (0..n_workers).collect::<BTreeSet<_>>());
    }

    #[test]
    fn device_failure_is_reported() {
        let mesh = slab();
        let plan = Plan::new(&mesh, &request(Some(6)));
        let store = Memory::default();
        let progress = Progress::new(6, true);
        let make_device = |i: usize| if i == 1 {
            Err(Error::Geometry(format!("device {i} is broken")))
        } else {
            Ok(Scripted::new(&[1.0; 6]))
        };
        let result = run(&plan, &mesh, 2, make_device, &store, &progress);
        assert!(matches!(result, Err(Error::Geometry(m)) if m == "device 1 is broken"));
    }

    /// Sleeps before every rendering, giving failures elsewhere time to be noticed
    struct Slow(Scripted);

    impl Projector for Slow {
        fn project(&self, mesh: &Mesh, shape: Shape, pixel_size: Length) -> Result<Projection> {
            thread::sleep(Duration::from_millis(100));
            self.0.project(mesh, shape, pixel_size)
        }
    }

    #[test]
    fn failure_stops_sibling_workers() {
        let mesh = slab();
        let plan = Plan::new(&mesh, &request(Some(40)));
        let store = Memory::default();
        let progress = Progress::new(40, true);
        // Worker 0 fails on its first rendering; worker 1 has 20 angles to do
        let make_device = |i: usize| {
            let script: &[f32] = if i == 0 { &[] } else { &[1.0; 20] };
            Ok(Slow(Scripted::new(script)))
        };
        let result = run(&plan, &mesh, 2, make_device, &store, &progress);
        assert!(matches!(result, Err(Error::Geometry(_))));
        assert!(store.values().len() < 20);
        assert!(progress.slices().is_empty());
    }

    #[test]
    fn panicking_worker() {
        struct Panics;
        impl Projector for Panics {
            fn project(&self, _: &Mesh, _: Shape, _: Length) -> Result<Projection> { panic!("device on fire") }
        }
        let mesh = slab();
        let plan = Plan::new(&mesh, &request(Some(2)));
        let progress = Progress::new(2, true);
        let result = run(&plan, &mesh, 1, |_| Ok(Panics), &Memory::default(), &progress);
        assert!(matches!(result, Err(Error::WorkerPanicked { worker: 0 })));
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use geometry::Axis;
use units::{Angle, Length, deg_};

use crate::{
    angles::AngleSequence,
    error::{Error, Result},
    faulty::FaultyPixels,
    fov::Fov,
    image::Projection,
    mesh::Mesh,
    output::ProjectionStore,
    partition::partition,
    progress::Progress,
    projector::Projector,
    scan::{Scanner, Setup, SliceReport},
    utils::group_digits,
};
