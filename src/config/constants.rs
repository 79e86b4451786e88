//! Default physical and numerical constants.

/// Standard gravity [m/s²].
pub const GRAVITY: f64 = 9.80665;

/// Depth below which a cell is treated as dry [m].
pub const TOL_H: f64 = 1.0e-3;

/// Courant number for the adaptive time step.
pub const CFL: f64 = 0.5;

/// Global Manning roughness coefficient [s/m^(1/3)].
pub const MANNING: f64 = 0.018;

/// Maximum domain depth at or above which the domain counts as flooding [m].
pub const FLOOD_THRESHOLD: f64 = 1.0e-3;

/// Depth given to dry inflow cells while the hydrograph is active [m].
pub const INIT_DEPTH_BOUNDARY: f64 = 0.01;

/// Velocities at or below this magnitude carry no friction.
pub const VELOCITY_EPS: f64 = 1.0e-12;

/// Sentinel published by dry or out-of-domain cells for both the rolling
/// minimum depth and the local time step.
pub const DRY_SENTINEL: f64 = 800_000.0;

/// Time step used while no cell is flooding [s].
pub const DRY_DT: f64 = 1.0;
