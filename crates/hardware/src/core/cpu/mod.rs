//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, program counter and the halt latch.
//! 2. **Protection:** Owns the PMP unit consulted by every stage.
//! 3. **Memory:** Holds the instruction and data memories.
//! 4. **Diagnostics:** Counts violations and keeps a bounded violation log.

/// Per-cycle execution and commit.
pub mod execution;

use std::collections::VecDeque;

use serde::Serialize;

use crate::common::addr::Addr;
use crate::common::data::AccessType;
use crate::common::error::ConfigError;
use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::units::pmp::{AccessDecision, Pmp};
use crate::soc::System;
use crate::stats::SimStats;

/// Run state of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreState {
    /// Executing one instruction per cycle.
    Running,
    /// Frozen by an instruction-execute violation until reset.
    Halted,
}

/// Architectural state read as the pre-tick snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessorState {
    /// Program counter.
    pub pc: Addr,
    /// Integer registers.
    pub regs: RegisterFile,
    /// Halt latch; once set only a reset clears it.
    pub halted: bool,
}

impl ProcessorState {
    /// Reset state: PC at `start_pc`, registers zero, running.
    pub fn new(start_pc: Addr) -> Self {
        Self {
            pc: start_pc,
            regs: RegisterFile::new(),
            halted: false,
        }
    }
}

/// PMP violation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ViolationCounters {
    /// Denied fetches and denied control-transfer targets.
    pub instruction_execute: u64,
    /// Denied loads.
    pub data_read: u64,
    /// Denied stores.
    pub data_write: u64,
}

impl ViolationCounters {
    /// Sum of all counters.
    pub const fn total(&self) -> u64 {
        self.instruction_execute + self.data_read + self.data_write
    }

    /// Increments the counter for `kind`.
    pub fn record(&mut self, kind: AccessType) {
        match kind {
            AccessType::Fetch => self.instruction_execute += 1,
            AccessType::Read => self.data_read += 1,
            AccessType::Write => self.data_write += 1,
        }
    }
}

/// One logged PMP violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ViolationRecord {
    /// Cycle in which the violation occurred (0-based since reset).
    pub cycle: u64,
    /// Kind of access that was refused.
    pub kind: AccessType,
    /// PC of the offending instruction.
    pub pc: Addr,
    /// Address that was refused.
    pub address: Addr,
}

/// Single-cycle RV32I core with PMP enforcement.
#[derive(Debug)]
pub struct Cpu {
    state: ProcessorState,
    start_pc: Addr,
    pmp: Pmp,
    /// Instruction and data memories.
    pub bus: System,
    /// Run statistics, including the violation counters.
    pub stats: SimStats,
    violation_log: VecDeque<ViolationRecord>,
    last_fetch: Option<AccessDecision>,
    last_data: Option<AccessDecision>,
    /// Emit a `trace` record per executed instruction.
    pub trace: bool,
}

impl Cpu {
    /// Creates a core in the reset state.
    ///
    /// # Errors
    ///
    /// Any error from [`Config::validate`].
    pub fn new(system: System, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let pmp = Pmp::new(config.pmp.table()?);
        Ok(Self::with_pmp(system, pmp, config))
    }

    /// Creates a core around an already built PMP unit.
    ///
    /// The table inside `pmp` is used as-is, including tables built with
    /// [`PermissionTable::unchecked`](crate::core::units::pmp::PermissionTable::unchecked).
    pub fn with_pmp(system: System, pmp: Pmp, config: &Config) -> Self {
        let start_pc = config.general.start_pc;
        Self {
            state: ProcessorState::new(start_pc),
            start_pc,
            pmp,
            bus: system,
            stats: SimStats::default(),
            violation_log: VecDeque::with_capacity(crate::common::constants::VIOLATION_LOG_MAX),
            last_fetch: None,
            last_data: None,
            trace: config.general.trace_instructions,
        }
    }

    /// Current program counter.
    pub const fn pc(&self) -> Addr {
        self.state.pc
    }

    /// Returns true once an instruction-execute violation has frozen the core.
    pub const fn is_halted(&self) -> bool {
        self.state.halted
    }

    /// Run state.
    pub const fn core_state(&self) -> CoreState {
        if self.state.halted {
            CoreState::Halted
        } else {
            CoreState::Running
        }
    }

    /// Architectural state.
    pub const fn state(&self) -> &ProcessorState {
        &self.state
    }

    /// Integer registers.
    pub const fn regs(&self) -> &RegisterFile {
        &self.state.regs
    }

    /// Mutable integer registers, for loaders and testbenches.
    pub const fn regs_mut(&mut self) -> &mut RegisterFile {
        &mut self.state.regs
    }

    /// The PMP unit.
    pub const fn pmp(&self) -> &Pmp {
        &self.pmp
    }

    /// PC value applied on reset.
    pub const fn start_pc(&self) -> Addr {
        self.start_pc
    }

    /// Fetch check outcome of the last tick, `None` if no fetch happened.
    pub const fn last_fetch_decision(&self) -> Option<AccessDecision> {
        self.last_fetch
    }

    /// Data check outcome of the last tick, `None` if no data access happened.
    pub const fn last_data_decision(&self) -> Option<AccessDecision> {
        self.last_data
    }

    /// Violation counters since the last reset.
    pub const fn violations(&self) -> &ViolationCounters {
        &self.stats.violations
    }

    /// Most recent violations, oldest first.
    pub const fn violation_log(&self) -> &VecDeque<ViolationRecord> {
        &self.violation_log
    }

    fn log_violation(&mut self, record: ViolationRecord) {
        self.stats.violations.record(record.kind);
        if self.violation_log.len() == crate::common::constants::VIOLATION_LOG_MAX {
            let _ = self.violation_log.pop_front();
        }
        self.violation_log.push_back(record);
    }
}
