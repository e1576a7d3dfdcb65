//! End-to-end run over the reference PMP layout.
//!
//! RWX `[0x00, 0x3F]`, RX `[0x40, 0x7F]`, nothing at `[0x80, 0xBF]` and a
//! deny-everything catch-all. The program loads from an open address, loads
//! from a closed one, then jumps into the closed region.

use pmpsim_core::common::AccessType;
use pmpsim_core::core::units::pmp::AccessDecision;
use pmpsim_core::core::{CoreState, ViolationCounters, ViolationRecord};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::inst;
use crate::common::harness::TestContext;

fn scenario() -> TestContext {
    let program = [
        inst().lw(1, 0, 0x00).build(),
        inst().lw(2, 0, 0x84).build(),
        inst().jalr(3, 0, 0x84).build(),
        inst().addi(4, 0, 1).build(),
    ];
    let mut ctx = TestContext::new().load_program(0, &program);
    ctx.write_data(0x00, 0x1234_5678);
    ctx.write_data(0x84, 0xDEAD_BEEF);
    ctx.set_reg(2, 0x55);
    ctx.set_reg(3, 0x66);
    ctx
}

#[test]
fn legal_load_retires() {
    let mut ctx = scenario();
    assert_eq!(ctx.tick(), CoreState::Running);
    assert_eq!(ctx.get_reg(1), 0x1234_5678);
    assert_eq!(ctx.cpu().pc(), 0x04);
    assert_eq!(ctx.cpu().last_data_decision(), Some(AccessDecision::Granted));
    assert_eq!(ctx.cpu().violations().total(), 0);
}

#[test]
fn denied_load_is_suppressed_but_core_keeps_running() {
    let mut ctx = scenario();
    ctx.run(2);

    assert_eq!(ctx.cpu().core_state(), CoreState::Running);
    assert_eq!(ctx.cpu().pc(), 0x08);
    assert_eq!(ctx.get_reg(2), 0x55);
    assert_eq!(ctx.cpu().last_fetch_decision(), Some(AccessDecision::Granted));
    assert_eq!(ctx.cpu().last_data_decision(), Some(AccessDecision::Denied));
    assert_eq!(ctx.cpu().violations().data_read, 1);
}

#[test]
fn jump_into_closed_region_halts_at_the_jump() {
    let mut ctx = scenario();
    ctx.run(2);
    assert_eq!(ctx.tick(), CoreState::Halted);

    assert!(ctx.cpu().is_halted());
    assert_eq!(ctx.cpu().pc(), 0x08);
    assert_eq!(ctx.get_reg(3), 0x66, "link register must not be written");
}

#[test]
fn counters_match_expected_totals() {
    let mut ctx = scenario();
    let summary = ctx.sim.run(100);

    assert_eq!(
        summary.violations,
        ViolationCounters {
            instruction_execute: 1,
            data_read: 1,
            data_write: 0,
        }
    );
    assert_eq!(summary.violations.total(), 2);
    assert_eq!(summary.cycles, 3);
    assert_eq!(summary.pc, 0x08);
}

#[test]
fn program_counter_stays_frozen() {
    let mut ctx = scenario();
    ctx.run(3);
    for _ in 0..20 {
        assert_eq!(ctx.tick(), CoreState::Halted);
        assert_eq!(ctx.cpu().pc(), 0x08);
    }
    assert_eq!(ctx.get_reg(4), 0);
    assert_eq!(ctx.cpu().violations().total(), 2);
    assert_eq!(ctx.cpu().stats.cycles, 23);
    assert_eq!(ctx.cpu().stats.cycles_halted, 20);
    assert_eq!(ctx.cpu().last_fetch_decision(), None);
}

#[test]
fn violation_log_records_both_events() {
    let mut ctx = scenario();
    ctx.run(10);

    let log: Vec<ViolationRecord> = ctx.cpu().violation_log().iter().copied().collect();
    assert_eq!(
        log,
        vec![
            ViolationRecord {
                cycle: 1,
                kind: AccessType::Read,
                pc: 0x04,
                address: 0x84,
            },
            ViolationRecord {
                cycle: 2,
                kind: AccessType::Fetch,
                pc: 0x08,
                address: 0x84,
            },
        ]
    );
}
