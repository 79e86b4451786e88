//! `validate`: load a configuration file and report problems.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use flood_swe::{PhysicsConfig, SolverConfig};
use tracing::{info, warn};

#[derive(Args)]
pub struct ValidateArgs {
    /// Configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = match SolverConfig::from_json_file(&args.config) {
        Ok(config) => config,
        Err(e) => bail!("{}: {e}", args.config.display()),
    };

    let warnings = warnings(&config);
    for w in &warnings {
        warn!("{w}");
    }

    info!(
        nx = config.grid.nx,
        ny = config.grid.ny,
        dx = config.grid.dx,
        dy = config.grid.dy,
        inflow = config.inflow.is_some(),
        "configuration valid"
    );

    if args.strict && !warnings.is_empty() {
        bail!("{} warning(s) in strict mode", warnings.len());
    }
    println!("{} is valid", args.config.display());
    Ok(())
}

fn warnings(config: &SolverConfig) -> Vec<String> {
    let mut out = Vec::new();
    let physics = &config.physics;
    let defaults = PhysicsConfig::default();

    if physics.cfl > 1.0 {
        out.push(format!("cfl = {} exceeds 1, expect instability", physics.cfl));
    }
    if (physics.g - defaults.g).abs() > 1.0 {
        out.push(format!("gravity {} differs from standard gravity", physics.g));
    }
    if physics.tol_h > 0.1 {
        out.push(format!("tol_h = {} is large for a dry tolerance", physics.tol_h));
    }
    if let Some(inflow) = &config.inflow
        && inflow.init_depth <= physics.tol_h
    {
        out.push(format!(
            "inflow init_depth {} does not exceed tol_h {}, dry inflow cells stay inactive",
            inflow.init_depth, physics.tol_h
        ));
    }
    out
}
