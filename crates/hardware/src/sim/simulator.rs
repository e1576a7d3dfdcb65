//! Simulator: clock and reset driver around the core.
//!
//! The simulator owns the [`Cpu`] and runs it for a bounded number of
//! cycles, stopping early once the core halts.

use serde::Serialize;

use crate::common::addr::Addr;
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::core::{CoreState, Cpu, ViolationCounters};
use crate::soc::System;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The core froze on an instruction-execute violation.
    Halted,
    /// The cycle budget ran out while the core was still running.
    CycleLimit,
}

/// Outcome of [`Simulator::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Cycles clocked by this run.
    pub cycles: u64,
    /// Why the run stopped.
    pub reason: StopReason,
    /// Final program counter.
    pub pc: Addr,
    /// Violation counters at the end of the run.
    pub violations: ViolationCounters,
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// The core, including its memories.
    pub cpu: Cpu,
}

impl Simulator {
    /// Creates a simulator with the given system and configuration.
    ///
    /// # Errors
    ///
    /// Any error from [`Cpu::new`].
    pub fn new(system: System, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            cpu: Cpu::new(system, config)?,
        })
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) -> CoreState {
        self.cpu.tick()
    }

    /// Drives the global reset for one cycle.
    pub fn reset(&mut self) {
        let _ = self.cpu.clock(true);
    }

    /// Runs until the core halts or `max_cycles` cycles have been clocked.
    pub fn run(&mut self, max_cycles: u64) -> RunSummary {
        let mut cycles = 0;
        let mut state = self.cpu.core_state();
        while cycles < max_cycles && state == CoreState::Running {
            state = self.cpu.tick();
            cycles += 1;
        }
        let reason = match state {
            CoreState::Halted => StopReason::Halted,
            CoreState::Running => StopReason::CycleLimit,
        };
        tracing::info!(cycles, ?reason, pc = self.cpu.pc(), "run finished");
        RunSummary {
            cycles,
            reason,
            pc: self.cpu.pc(),
            violations: *self.cpu.violations(),
        }
    }
}
