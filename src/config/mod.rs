//! Solver configuration.
//!
//! A single immutable [`SolverConfig`] is built once (in code, or from JSON)
//! and passed by reference into every solver phase. All sections have
//! defaults matching the reference flood model, so a JSON file only needs to
//! name the values it changes:
//!
//! ```
//! use flood_swe::config::SolverConfig;
//!
//! let json = r#"{
//!     "grid": { "nx": 64, "ny": 32, "dx": 1.0, "dy": 1.0 },
//!     "boundaries": { "north": "reflective", "east": "transmissive",
//!                     "south": "reflective", "west": "reflective" }
//! }"#;
//! let config = SolverConfig::from_json_str(json).unwrap();
//! assert_eq!(config.grid.nx, 64);
//! assert_eq!(config.physics.cfl, 0.5);
//! ```

pub mod constants;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::boundary::Hydrograph;
use crate::error::ConfigError;
use crate::types::{Direction, Sides};

pub use constants::*;

// ============================================================================
// Grid
// ============================================================================

/// Structured grid extents and resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of cells along x (west to east)
    pub nx: usize,
    /// Number of cells along y (south to north)
    pub ny: usize,
    /// Cell size along x [m]
    pub dx: f64,
    /// Cell size along y [m]
    pub dy: f64,
}

impl GridConfig {
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        Self { nx, ny, dx, dy }
    }

    /// Grid covering `[0, width] x [0, height]` with `nx x ny` cells.
    pub fn from_extent(width: f64, height: f64, nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            dx: width / nx.max(1) as f64,
            dy: height / ny.max(1) as f64,
        }
    }

    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    pub fn width(&self) -> f64 {
        self.nx as f64 * self.dx
    }

    pub fn height(&self) -> f64 {
        self.ny as f64 * self.dy
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(ConfigError::Inconsistent(format!(
                "grid must have at least one cell, got {}x{}",
                self.nx, self.ny
            )));
        }
        positive("grid.dx", self.dx)?;
        positive("grid.dy", self.dy)?;
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(64, 64, 1.0, 1.0)
    }
}

// ============================================================================
// Physics
// ============================================================================

/// Physical and numerical parameters shared by every phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational acceleration [m/s²]
    pub g: f64,
    /// Dry-cell depth tolerance [m]
    pub tol_h: f64,
    /// Courant number
    pub cfl: f64,
    /// Initial Manning roughness of every cell
    pub manning: f64,
    /// Depth at which the domain counts as flooding [m]
    pub flood_threshold: f64,
}

impl PhysicsConfig {
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    pub fn with_tol_h(mut self, tol_h: f64) -> Self {
        self.tol_h = tol_h;
        self
    }

    pub fn with_cfl(mut self, cfl: f64) -> Self {
        self.cfl = cfl;
        self
    }

    pub fn with_manning(mut self, manning: f64) -> Self {
        self.manning = manning;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("physics.g", self.g)?;
        positive("physics.tol_h", self.tol_h)?;
        positive("physics.cfl", self.cfl)?;
        if self.cfl > 1.0 {
            return Err(ConfigError::InvalidValue {
                key: "physics.cfl",
                value: self.cfl,
                reason: "must not exceed 1",
            });
        }
        non_negative("physics.manning", self.manning)?;
        non_negative("physics.flood_threshold", self.flood_threshold)?;
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            g: GRAVITY,
            tol_h: TOL_H,
            cfl: CFL,
            manning: MANNING,
            flood_threshold: FLOOD_THRESHOLD,
        }
    }
}

// ============================================================================
// Boundaries and inflow
// ============================================================================

/// Behaviour of a domain edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Ghost state copies the interior face (free outflow).
    Transmissive,
    /// Ghost normal discharge is negated (solid wall).
    #[default]
    Reflective,
}

/// Discharge injected through part of one domain edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InflowConfig {
    /// Edge carrying the inflow
    pub edge: Direction,
    /// Start of the inflow window along the edge [m]
    pub window_lo: f64,
    /// End of the inflow window along the edge [m]
    pub window_hi: f64,
    /// Depth forced onto dry inflow cells while the hydrograph is active [m]
    #[serde(default = "default_init_depth")]
    pub init_depth: f64,
    /// Unit-width discharge over time
    pub hydrograph: Hydrograph,
}

fn default_init_depth() -> f64 {
    INIT_DEPTH_BOUNDARY
}

impl InflowConfig {
    pub fn new(edge: Direction, window_lo: f64, window_hi: f64, hydrograph: Hydrograph) -> Self {
        Self {
            edge,
            window_lo,
            window_hi,
            init_depth: INIT_DEPTH_BOUNDARY,
            hydrograph,
        }
    }

    pub fn with_init_depth(mut self, init_depth: f64) -> Self {
        self.init_depth = init_depth;
        self
    }

    /// True if the span `[lo, hi]` along the edge lies inside the window.
    pub fn covers(&self, lo: f64, hi: f64) -> bool {
        lo >= self.window_lo && hi <= self.window_hi
    }

    /// True while the inflow may force-wet dry cells.
    pub fn is_active(&self, time: f64) -> bool {
        time >= self.hydrograph.start_time && time <= self.hydrograph.end_time
    }

    fn validate(&self) -> Result<(), ConfigError> {
        finite("inflow.window_lo", self.window_lo)?;
        finite("inflow.window_hi", self.window_hi)?;
        if self.window_hi < self.window_lo {
            return Err(ConfigError::Inconsistent(format!(
                "inflow window [{}, {}] is reversed",
                self.window_lo, self.window_hi
            )));
        }
        positive("inflow.init_depth", self.init_depth)?;
        self.hydrograph.validate()
    }
}

// ============================================================================
// Time stepping
// ============================================================================

/// How the flooding time step is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TimeStepping {
    /// Minimum of the per-cell CFL steps.
    #[default]
    Adaptive,
    /// Fixed step while flooding.
    Static { dt: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub stepping: TimeStepping,
    /// Step used while no cell reaches the flood threshold [s]
    pub dry_dt: f64,
    /// Optional cap on the adaptive step [s]
    pub dt_max: Option<f64>,
}

impl TimeConfig {
    pub fn adaptive() -> Self {
        Self::default()
    }

    pub fn fixed(dt: f64) -> Self {
        Self {
            stepping: TimeStepping::Static { dt },
            ..Self::default()
        }
    }

    pub fn with_dry_dt(mut self, dry_dt: f64) -> Self {
        self.dry_dt = dry_dt;
        self
    }

    pub fn with_dt_max(mut self, dt_max: f64) -> Self {
        self.dt_max = Some(dt_max);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let TimeStepping::Static { dt } = self.stepping {
            positive("time.stepping.dt", dt)?;
        }
        positive("time.dry_dt", self.dry_dt)?;
        if let Some(dt_max) = self.dt_max {
            positive("time.dt_max", dt_max)?;
        }
        Ok(())
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            stepping: TimeStepping::Adaptive,
            dry_dt: DRY_DT,
            dt_max: None,
        }
    }
}

// ============================================================================
// Top level
// ============================================================================

/// Complete solver configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub grid: GridConfig,
    pub physics: PhysicsConfig,
    pub boundaries: Sides<BoundaryMode>,
    pub inflow: Option<InflowConfig>,
    pub time: TimeConfig,
}

impl SolverConfig {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_boundaries(mut self, boundaries: Sides<BoundaryMode>) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn with_boundary(mut self, edge: Direction, mode: BoundaryMode) -> Self {
        self.boundaries[edge] = mode;
        self
    }

    pub fn with_inflow(mut self, inflow: InflowConfig) -> Self {
        self.inflow = Some(inflow);
        self
    }

    pub fn with_time(mut self, time: TimeConfig) -> Self {
        self.time = time;
        self
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.physics.validate()?;
        self.time.validate()?;
        if let Some(inflow) = &self.inflow {
            inflow.validate()?;
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub(crate) fn finite(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "must be finite",
        })
    }
}

pub(crate) fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(key, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "must be positive",
        })
    }
}

pub(crate) fn non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(key, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "must not be negative",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.physics.g, GRAVITY);
        assert_eq!(config.physics.tol_h, TOL_H);
        assert_eq!(config.boundaries.east, BoundaryMode::Reflective);
    }

    #[test]
    fn test_rejects_bad_cfl() {
        let config = SolverConfig::default().with_physics(PhysicsConfig::default().with_cfl(1.5));
        match config.validate() {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "physics.cfl"),
            other => panic!("expected invalid cfl, got {:?}", other),
        }
    }

    #[test]
    fn test_physics_builder() {
        let physics = PhysicsConfig::default()
            .with_gravity(9.81)
            .with_tol_h(1e-4)
            .with_manning(0.035);
        assert_eq!(physics.g, 9.81);
        assert_eq!(physics.tol_h, 1e-4);
        assert_eq!(physics.manning, 0.035);
        assert_eq!(physics.cfl, PhysicsConfig::default().cfl);
        assert!(SolverConfig::default().with_physics(physics).validate().is_ok());

        let config = SolverConfig::default().with_physics(PhysicsConfig::default().with_tol_h(0.0));
        match config.validate() {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "physics.tol_h"),
            other => panic!("expected invalid tol_h, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = SolverConfig::new(GridConfig::new(0, 4, 1.0, 1.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_rejects_reversed_window() {
        let inflow = InflowConfig::new(
            Direction::West,
            5.0,
            1.0,
            Hydrograph::new(0.0, 10.0, 20.0, 0.0, 1.0, 0.0),
        );
        let config = SolverConfig::default().with_inflow(inflow);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_static_dt_must_be_positive() {
        let config = SolverConfig::default().with_time(TimeConfig::fixed(0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_partial_document() {
        let json = r#"{
            "grid": { "nx": 10, "ny": 5, "dx": 2.0, "dy": 2.0 },
            "time": { "stepping": { "mode": "static", "dt": 0.01 } },
            "inflow": {
                "edge": "west",
                "window_lo": 0.0,
                "window_hi": 10.0,
                "hydrograph": {
                    "start_time": 0.0, "peak_time": 10.0, "end_time": 20.0,
                    "initial_discharge": 0.0, "peak_discharge": 2.0, "end_discharge": 0.0
                }
            }
        }"#;
        let config = SolverConfig::from_json_str(json).unwrap();
        assert_eq!(config.grid.nx, 10);
        assert_eq!(config.time.stepping, TimeStepping::Static { dt: 0.01 });
        assert_eq!(config.time.dry_dt, DRY_DT);
        let inflow = config.inflow.unwrap();
        assert_eq!(inflow.edge, Direction::West);
        assert_eq!(inflow.init_depth, INIT_DEPTH_BOUNDARY);
    }

    #[test]
    fn test_json_roundtrip_preserves_config() {
        let config = SolverConfig::new(GridConfig::from_extent(75.0, 30.0, 75, 30))
            .with_boundary(Direction::East, BoundaryMode::Transmissive)
            .with_time(TimeConfig::adaptive().with_dt_max(0.5));
        let json = config.to_json_pretty().unwrap();
        let parsed = SolverConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_inflow_window_and_activity() {
        let inflow = InflowConfig::new(
            Direction::South,
            2.0,
            6.0,
            Hydrograph::new(5.0, 10.0, 20.0, 0.0, 1.0, 0.0),
        );
        assert!(inflow.covers(2.0, 3.0));
        assert!(inflow.covers(5.0, 6.0));
        assert!(!inflow.covers(1.0, 2.0));
        assert!(!inflow.covers(5.5, 6.5));
        assert!(!inflow.is_active(4.9));
        assert!(inflow.is_active(5.0));
        assert!(inflow.is_active(20.0));
        assert!(!inflow.is_active(20.1));
    }
}
