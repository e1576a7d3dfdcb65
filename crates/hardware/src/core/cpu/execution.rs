//! Main Execution Loop.
//!
//! This module implements the clock cycle of the core. Each tick performs:
//! 1. **Reset:** A global reset is applied before anything else.
//! 2. **Halt Check:** A halted core does nothing but count the cycle.
//! 3. **Evaluate:** Fetch, execute and next-PC selection read an immutable
//!    snapshot of the pre-tick state.
//! 4. **Commit:** Register write, store, PC update, halt latch and
//!    violation accounting are applied together at the end.

use super::{CoreState, Cpu, ProcessorState, ViolationRecord};
use crate::common::addr::Addr;
use crate::common::data::AccessType;
use crate::core::pipeline::stages::execute::ExecuteOutput;
use crate::core::pipeline::stages::fetch::{FetchOutput, NextPc};
use crate::core::pipeline::stages::{execute_stage, fetch_stage, next_pc};
use crate::isa::disasm::disassemble;
use crate::stats::SimStats;

impl Cpu {
    /// Advances the core by one clock cycle.
    ///
    /// With `reset` asserted the state, counters and violation log return to
    /// their reset values and nothing executes in this cycle. Memory contents
    /// are kept.
    pub fn clock(&mut self, reset: bool) -> CoreState {
        if reset {
            self.reset();
            return self.core_state();
        }

        let cycle = self.stats.cycles;
        self.stats.cycles += 1;
        let span = tracing::debug_span!("tick", cycle);
        let _enter = span.enter();

        if self.state.halted {
            self.stats.cycles_halted += 1;
            self.last_fetch = None;
            self.last_data = None;
            return CoreState::Halted;
        }

        let snapshot = self.state.clone();
        let fetch = fetch_stage(snapshot.pc, self.bus.imem.as_ref(), &self.pmp);
        let ex = execute_stage(
            &snapshot,
            fetch.inst,
            self.bus.dmem.as_ref(),
            &self.pmp,
            fetch.allowed(),
        );
        let next = next_pc(snapshot.pc, fetch.allowed(), ex.redirect, &self.pmp);

        self.commit(cycle, &snapshot, &fetch, &ex, next);
        self.core_state()
    }

    /// Advances the core by one clock cycle without reset.
    pub fn tick(&mut self) -> CoreState {
        self.clock(false)
    }

    /// Applies the global reset immediately.
    pub fn reset(&mut self) {
        self.state = ProcessorState::new(self.start_pc);
        self.stats = SimStats::default();
        self.violation_log.clear();
        self.last_fetch = None;
        self.last_data = None;
        tracing::info!(pc = self.start_pc, "core reset");
    }

    fn commit(
        &mut self,
        cycle: u64,
        snapshot: &ProcessorState,
        fetch: &FetchOutput,
        ex: &ExecuteOutput,
        next: NextPc,
    ) {
        let pc = snapshot.pc;
        self.last_fetch = Some(fetch.decision);
        self.last_data = ex.data_access.map(|access| access.decision);

        match next {
            NextPc::Hold(_) => {
                self.stats.fetches_squashed += 1;
                self.halt(cycle, pc, pc);
                return;
            }
            NextPc::RedirectDenied { target, .. } => {
                self.halt(cycle, pc, target);
                return;
            }
            NextPc::Sequential(_) | NextPc::Redirect(_) => {}
        }

        if self.trace {
            tracing::trace!(pc, inst = fetch.inst, "{}", disassemble(fetch.inst));
        }

        if let Some(access) = ex.data_access.filter(|a| !a.decision.granted()) {
            match access.kind {
                AccessType::Read => self.stats.loads_suppressed += 1,
                AccessType::Write => self.stats.stores_suppressed += 1,
                AccessType::Fetch => {}
            }
            self.log_violation(ViolationRecord {
                cycle,
                kind: access.kind,
                pc,
                address: access.address,
            });
        }

        if let Some(wb) = ex.writeback {
            self.state.regs.write(wb.rd, wb.value);
        }
        if let Some(store) = ex.store {
            store.commit(self.bus.dmem.as_mut());
        }
        self.state.pc = next.addr();
        self.stats.record_retire(&ex.control);
    }

    fn halt(&mut self, cycle: u64, pc: Addr, address: Addr) {
        self.state.halted = true;
        self.log_violation(ViolationRecord {
            cycle,
            kind: AccessType::Fetch,
            pc,
            address,
        });
        tracing::info!(
            "core halted: execute permission denied at {address:#010x} (pc {pc:#010x})"
        );
    }
}
