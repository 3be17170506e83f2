mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => read_config_file(path)?,
        None       => Config::default(),
    };

    // --- Output locations ----------------------------------------------------------
    let axis = Axis::from(args.rotation_axis);
    let lamino_angle = deg(args.lamino_angle);
    let dset = args.dset.clone().unwrap_or_else(|| Dataset::default_name(&args.input));
    let dataset = Dataset::new(&args.out_directory, &dset, lamino_angle, axis, args.pixel_size);
    dataset.create_dirs()?;
    let template = dataset.template()?;
    logging::init(Some(&dataset.logfile()))?;
    log::info!("Writing projections to {template}");

    // --- Geometry ------------------------------------------------------------------
    let mesh = read_mesh(&args.input, args.mesh_name.as_deref(), config.mesh.center)?;
    let request = Request {
        pixel_size: args.pixel_size,
        lamino_angle,
        axis,
        num_projections: args.num_projections,
        faulty: config.faulty_pixels,
    };
    let plan = Plan::new(&mesh, &request);
    log_fields(&plan.fields());
    log::info!("--- Mesh info ---");
    log_fields(&mesh.fields());
    log::info!("--- Args info ---");
    log_fields(&args.fields());

    // --- Scan ----------------------------------------------------------------------
    let progress = Progress::new(plan.angles.len(), args.quiet);
    let threads = args.threads;
    let last = run(&plan, &mesh, args.num_devices, |i| Device::init(i, threads), &template, &progress)?;
    progress.finish();

    if let Some(projection) = last {
        log::info!("Last projection: {:?} pixels, maximum {}", projection.shape(), projection.summary_max());
    }
    Ok(())
}

fn log_fields(fields: &[(&str, String)]) {
    for (name, value) in fields {
        log::info!("{name}: {value}");
    }
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::error::Error;
use clap::Parser;
use cli::Cli;
use units::deg;
use lamino::{
    Axis, Device,
    config::scan::{Config, read_config_file},
    io::read_mesh,
    logging,
    orchestrate::{Plan, Request, run},
    output::Dataset,
    progress::Progress,
};
