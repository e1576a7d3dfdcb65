//! Simulation statistics collection and reporting.
//!
//! This module tracks what the core did over a run. It provides:
//! 1. **Cycles:** Total cycles, cycles spent halted, and retired instructions.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, control flow).
//! 3. **Protection:** PMP violations by kind and the suppressed transactions.
//!
//! Reports are rendered into a `String` so callers decide where they go.

use std::fmt::Write as _;
use std::time::Instant;

use crate::core::cpu::ViolationCounters;
use crate::core::pipeline::signals::ControlSignals;

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"pmp"`.
/// Pass an empty slice to `render_sections` to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "pmp"];

const RULE_WIDE: &str = "==========================================================";
const RULE_THIN: &str = "----------------------------------------------------------";

/// Simulation statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total cycles clocked since the last reset.
    pub cycles: u64,
    /// Cycles that found the core already halted.
    pub cycles_halted: u64,
    /// Number of instructions that completed.
    pub instructions_retired: u64,
    /// Fetches squashed to a NOP.
    pub fetches_squashed: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch and jump instructions retired.
    pub inst_branch: u64,
    /// Count of other instructions retired.
    pub inst_alu: u64,

    /// Loads whose read and register write were suppressed.
    pub loads_suppressed: u64,
    /// Stores whose write was suppressed.
    pub stores_suppressed: u64,
    /// PMP violations by kind.
    pub violations: ViolationCounters,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            cycles_halted: 0,
            instructions_retired: 0,
            fetches_squashed: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_alu: 0,
            loads_suppressed: 0,
            stores_suppressed: 0,
            violations: ViolationCounters::default(),
        }
    }
}

impl SimStats {
    /// Counts one completed instruction under its category.
    pub fn record_retire(&mut self, control: &ControlSignals) {
        self.instructions_retired += 1;
        if control.mem_read {
            self.inst_load += 1;
        } else if control.mem_write {
            self.inst_store += 1;
        } else if control.is_control_flow() {
            self.inst_branch += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to render all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        let mut out = String::new();
        let _ = writeln!(out, "\n{RULE_WIDE}");
        let _ = writeln!(out, "PMP CORE SIMULATION STATISTICS");
        let _ = writeln!(out, "{RULE_WIDE}");
        if want("summary") {
            let ipc = self.instructions_retired as f64 / cyc;
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_freq                 {khz:.2} kHz");
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {ipc:.4}");
            let _ = writeln!(
                out,
                "cycles.halted            {} ({:.2}%)",
                self.cycles_halted,
                pct(self.cycles_halted, cyc)
            );
            let _ = writeln!(out, "{RULE_THIN}");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
            ] {
                let _ = writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, instr));
            }
            let _ = writeln!(out, "{RULE_THIN}");
        }
        if want("pmp") {
            let v = &self.violations;
            let _ = writeln!(out, "PMP");
            let _ = writeln!(out, "  violations.execute     {}", v.instruction_execute);
            let _ = writeln!(out, "  violations.read        {}", v.data_read);
            let _ = writeln!(out, "  violations.write       {}", v.data_write);
            let _ = writeln!(out, "  violations.total       {}", v.total());
            let _ = writeln!(out, "  fetch.squashed         {}", self.fetches_squashed);
            let _ = writeln!(out, "  load.suppressed        {}", self.loads_suppressed);
            let _ = writeln!(out, "  store.suppressed       {}", self.stores_suppressed);
        }
        let _ = writeln!(out, "{RULE_WIDE}");
        out
    }

    /// Renders all statistics sections.
    pub fn render(&self) -> String {
        self.render_sections(&[])
    }
}
