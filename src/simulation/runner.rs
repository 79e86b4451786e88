//! Flood simulation driver.
//!
//! Owns the configuration, the cell state and the simulation clock, selects
//! the global time step between iterations and reduces diagnostics after
//! each one.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::{FloodAlarm, FloodDiagnostics};
use crate::config::SolverConfig;
use crate::coupling::{CoupledLayer, FeedbackReport, TerrainView, apply_feedback};
use crate::error::Result;
use crate::mesh::InitialCondition;
use crate::solver::{Execution, FloodState, IterationStats, iterate};
use crate::time::{StepRegime, TimeStepSelection, select_time_step};

// =============================================================================
// Step report
// =============================================================================

/// Outcome of one iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StepReport {
    /// Iterations completed, including this one
    pub iteration: usize,
    /// Simulation time after the step [s]
    pub time: f64,
    /// Step used [s]
    pub dt: f64,
    #[serde(skip)]
    pub regime: StepRegime,
    pub drained_cells: usize,
    pub inflow_discharge: f64,
    pub diagnostics: FloodDiagnostics,
    pub alarm: FloodAlarm,
}

// =============================================================================
// Simulation result
// =============================================================================

/// Result of a multi-step run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Simulation time reached.
    pub final_time: f64,
    /// Steps taken during this run.
    pub n_steps: usize,
    /// Smallest step used.
    pub dt_min: f64,
    /// Largest step used.
    pub dt_max: f64,
    /// Wall-clock time in seconds.
    pub wall_time: f64,
    /// Diagnostics after the last step.
    pub diagnostics: FloodDiagnostics,
    /// Alarm level after the last step.
    pub alarm: FloodAlarm,
    /// Whether the run reached its target.
    pub success: bool,
    /// Reason the run stopped early.
    pub error: Option<String>,
}

struct RunStats {
    start: Instant,
    n_steps: usize,
    dt_min: f64,
    dt_max: f64,
}

impl RunStats {
    fn start() -> Self {
        Self {
            start: Instant::now(),
            n_steps: 0,
            dt_min: f64::INFINITY,
            dt_max: 0.0,
        }
    }

    fn record(&mut self, dt: f64) {
        self.n_steps += 1;
        self.dt_min = self.dt_min.min(dt);
        self.dt_max = self.dt_max.max(dt);
    }

    fn finish(self, sim: &FloodSimulation, error: Option<String>) -> SimulationResult {
        SimulationResult {
            final_time: sim.time,
            n_steps: self.n_steps,
            dt_min: self.dt_min,
            dt_max: self.dt_max,
            wall_time: self.start.elapsed().as_secs_f64(),
            diagnostics: sim.diagnostics,
            alarm: sim.alarm,
            success: error.is_none(),
            error,
        }
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Flood model with its clock.
///
/// # Example
/// ```
/// use flood_swe::mesh::Scenario;
/// use flood_swe::simulation::FloodSimulation;
///
/// let scenario = Scenario::three_humps_dam_break(30, 12);
/// let mut sim = FloodSimulation::new(scenario.config, &scenario.initial).unwrap();
/// let result = sim.run_iterations(10);
/// assert_eq!(result.n_steps, 10);
/// assert!(sim.time() > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct FloodSimulation {
    config: SolverConfig,
    state: FloodState,
    execution: Execution,
    time: f64,
    iteration: usize,
    next_step: TimeStepSelection,
    diagnostics: FloodDiagnostics,
    alarm: FloodAlarm,
    max_steps: Option<usize>,
}

impl FloodSimulation {
    /// Validate the configuration and build the initial state.
    pub fn new(config: SolverConfig, initial: &InitialCondition) -> Result<Self> {
        config.validate()?;
        let state = FloodState::from_initial(&config, initial)?;
        let diagnostics = FloodDiagnostics::compute(&state, &config.physics);
        let alarm = FloodAlarm::None.escalate(diagnostics.max_hazard, config.physics.flood_threshold);
        let next_step = select_time_step(
            state.max_depth(),
            state.min_time_step(),
            &config.physics,
            &config.time,
        );

        Ok(Self {
            config,
            state,
            execution: Execution::preferred(),
            time: 0.0,
            iteration: 0,
            next_step,
            diagnostics,
            alarm,
            max_steps: None,
        })
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Stop `run_until` after this many steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn state(&self) -> &FloodState {
        &self.state
    }

    /// Current simulation time [s].
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Step the next iteration will take [s].
    pub fn dt(&self) -> f64 {
        self.next_step.dt
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn alarm(&self) -> FloodAlarm {
        self.alarm
    }

    pub fn diagnostics(&self) -> FloodDiagnostics {
        self.diagnostics
    }

    /// Run one iteration with the selected step.
    pub fn step(&mut self) -> StepReport {
        let dt = self.next_step.dt;
        self.advance(dt)
    }

    /// Exchange with `layer`, apply its terrain edits, then run one iteration.
    pub fn step_coupled(&mut self, layer: &mut dyn CoupledLayer) -> Result<StepReport> {
        self.exchange(layer)?;
        Ok(self.step())
    }

    /// Offer the current state to `layer` and apply its edits.
    pub fn exchange(&mut self, layer: &mut dyn CoupledLayer) -> Result<FeedbackReport> {
        let edits = layer.exchange(&TerrainView::new(&self.state), self.time);
        apply_feedback(&mut self.state, &edits)
    }

    fn advance(&mut self, dt: f64) -> StepReport {
        let regime = self.next_step.regime;
        let IterationStats {
            drained_cells,
            inflow_discharge,
        } = iterate(&mut self.state, &self.config, self.time, dt, self.execution);

        self.time += dt;
        self.iteration += 1;

        let physics = &self.config.physics;
        self.diagnostics = FloodDiagnostics::compute(&self.state, physics);
        let alarm = self.alarm.escalate(self.diagnostics.max_hazard, physics.flood_threshold);
        if alarm != self.alarm {
            info!(
                iteration = self.iteration,
                time = self.time,
                from = %self.alarm,
                to = %alarm,
                "flood alarm raised"
            );
            self.alarm = alarm;
        }

        self.next_step = select_time_step(
            self.diagnostics.max_depth,
            self.state.min_time_step(),
            physics,
            &self.config.time,
        );
        if self.next_step.regime == StepRegime::Dry && self.diagnostics.is_flooding(physics) {
            warn!(
                max_depth = self.diagnostics.max_depth,
                dt = self.next_step.dt,
                "no wet cell published a step, using the dry step"
            );
        }
        debug!(
            iteration = self.iteration,
            time = self.time,
            dt,
            next_dt = self.next_step.dt,
            ?regime,
            drained_cells,
            "iteration complete"
        );

        StepReport {
            iteration: self.iteration,
            time: self.time,
            dt,
            regime,
            drained_cells,
            inflow_discharge,
            diagnostics: self.diagnostics,
            alarm: self.alarm,
        }
    }

    /// Run exactly `n` iterations.
    pub fn run_iterations(&mut self, n: usize) -> SimulationResult {
        self.run_iterations_with_callback(n, |_| {})
    }

    /// Run exactly `n` iterations, calling `callback` after each.
    pub fn run_iterations_with_callback<F>(&mut self, n: usize, mut callback: F) -> SimulationResult
    where
        F: FnMut(&StepReport),
    {
        info!(iterations = n, time = self.time, "starting flood run");
        let mut stats = RunStats::start();
        for _ in 0..n {
            let report = self.step();
            stats.record(report.dt);
            callback(&report);
        }
        self.finished(stats, None)
    }

    /// Run until `t_end`, shortening the last step to land on it.
    pub fn run_until(&mut self, t_end: f64) -> SimulationResult {
        self.run_with_callback(t_end, |_| {})
    }

    /// Run until `t_end`, calling `callback` after every iteration.
    pub fn run_with_callback<F>(&mut self, t_end: f64, mut callback: F) -> SimulationResult
    where
        F: FnMut(&StepReport),
    {
        info!(t_start = self.time, t_end, "starting flood run");
        let mut stats = RunStats::start();

        while self.time < t_end {
            if let Some(max_steps) = self.max_steps
                && stats.n_steps >= max_steps
            {
                let error = format!("Maximum step limit ({max_steps}) reached");
                warn!(time = self.time, "{error}");
                return self.finished(stats, Some(error));
            }

            let dt = self.next_step.dt.min(t_end - self.time);
            let report = self.advance(dt);
            stats.record(dt);
            callback(&report);
        }

        self.finished(stats, None)
    }

    fn finished(&self, stats: RunStats, error: Option<String>) -> SimulationResult {
        let result = stats.finish(self, error);
        info!(
            steps = result.n_steps,
            time = result.final_time,
            wall_time = result.wall_time,
            volume = result.diagnostics.total_volume,
            alarm = %result.alarm,
            "flood run finished"
        );
        result
    }
}
