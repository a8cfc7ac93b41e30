//! Glint command line renderer.
//!
//! Usage: `glint [JOB.json] [-o OUTPUT]`

mod config;
mod scenes;

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use glint_renderer::{render_scene, save_image};

use crate::config::JobConfig;

struct Args {
    job: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        job: None,
        output: None,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-o" | "--output" => {
                let path = iter.next().context("missing value for --output")?;
                args.output = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => bail!("unknown option: {flag}"),
            path => {
                if args.job.is_some() {
                    bail!("only one job file may be given");
                }
                args.job = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Some(args))
}

fn print_usage() {
    println!("Usage: glint [JOB.json] [-o OUTPUT]");
    println!("\nRenders a built-in scene. Without a job file the basic scene");
    println!("is rendered at 200x100 with 100 samples per pixel.");
    println!("\nSet RUST_LOG=debug for per-bucket progress.");
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let Some(args) = parse_args()? else {
        print_usage();
        return Ok(());
    };

    let mut job = match &args.job {
        Some(path) => JobConfig::load(path)
            .with_context(|| format!("loading job {}", path.display()))?,
        None => JobConfig::default(),
    };
    if let Some(output) = args.output {
        job.output = output;
    }

    log::info!("Starting Glint: {:?} scene -> {}", job.scene, job.output.display());

    let world = job.scene.build(job.scene_seed);
    let camera = job.camera();
    let image = render_scene(&camera, &world, job.resolution(), &job.render)
        .context("rendering scene")?;

    save_image(&image, &job.output)
        .with_context(|| format!("writing {}", job.output.display()))?;

    Ok(())
}
