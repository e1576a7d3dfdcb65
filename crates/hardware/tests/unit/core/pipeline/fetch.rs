use pmpsim_core::common::INSTRUCTION_NOP;
use pmpsim_core::core::pipeline::stages::fetch::NextPc;
use pmpsim_core::core::pipeline::stages::{fetch_stage, next_pc};
use pmpsim_core::core::units::pmp::{AccessDecision, PermissionTable, Pmp};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::reference_entries;
use crate::common::mocks::memory::MockMemory;

fn reference_pmp() -> Pmp {
    Pmp::new(PermissionTable::new(reference_entries()).unwrap())
}

#[test]
fn granted_fetch_returns_memory_word() {
    let imem = MockMemory::new(256).with_words(&[0x0050_0093, 0x0000_0013]);
    let log = imem.log();

    let out = fetch_stage(0, &imem, &reference_pmp());

    assert_eq!(out.inst, 0x0050_0093);
    assert_eq!(out.decision, AccessDecision::Granted);
    assert!(out.allowed());
    assert_eq!(log.reads(), 1);
}

#[rstest]
#[case::closed_region(0x80)]
#[case::closed_region_end(0xBC)]
#[case::catch_all(0xC0)]
fn denied_fetch_is_squashed_without_reading(#[case] pc: u32) {
    let imem = MockMemory::new(256).with_words(&[0xFFFF_FFFF; 64]);
    let log = imem.log();

    let out = fetch_stage(pc, &imem, &reference_pmp());

    assert_eq!(out.inst, INSTRUCTION_NOP);
    assert_eq!(out.pc, pc);
    assert!(!out.allowed());
    assert_eq!(log.reads(), 0);
}

#[test]
fn read_execute_region_fetches() {
    let imem = MockMemory::new(256);
    assert!(fetch_stage(0x7C, &imem, &reference_pmp()).allowed());
}

#[rstest]
#[case::into_closed_region(0x7E)]
#[case::across_rwx_rx_boundary(0x3E)]
#[case::past_top_of_address_space(0xFFFF_FFFE)]
fn fetch_straddling_entries_is_squashed(#[case] pc: u32) {
    let imem = MockMemory::new(256).with_words(&[0x0070_0293; 64]);
    let log = imem.log();

    let out = fetch_stage(pc, &imem, &reference_pmp());

    assert_eq!(out.inst, INSTRUCTION_NOP);
    assert_eq!(out.decision, AccessDecision::Denied);
    assert_eq!(log.reads(), 0);
}

#[test]
fn misaligned_fetch_inside_one_region_is_allowed() {
    let imem = MockMemory::new(256);
    assert!(fetch_stage(0x42, &imem, &reference_pmp()).allowed());
}

#[test]
fn next_pc_holds_on_denied_fetch() {
    let next = next_pc(0x80, false, Some(0x10), &reference_pmp());
    assert_eq!(next, NextPc::Hold(0x80));
    assert!(next.halts());
    assert_eq!(next.addr(), 0x80);
}

#[test]
fn next_pc_falls_through() {
    let next = next_pc(0x10, true, None, &reference_pmp());
    assert_eq!(next, NextPc::Sequential(0x14));
    assert!(!next.halts());
}

#[test]
fn next_pc_wraps_at_top_of_address_space() {
    assert_eq!(
        next_pc(0xFFFF_FFFC, true, None, &reference_pmp()),
        NextPc::Sequential(0)
    );
}

#[test]
fn next_pc_takes_permitted_redirect() {
    let next = next_pc(0x10, true, Some(0x40), &reference_pmp());
    assert_eq!(next, NextPc::Redirect(0x40));
    assert_eq!(next.addr(), 0x40);
}

#[test]
fn next_pc_refuses_closed_target() {
    let next = next_pc(0x10, true, Some(0x84), &reference_pmp());
    assert_eq!(
        next,
        NextPc::RedirectDenied {
            pc: 0x10,
            target: 0x84
        }
    );
    assert!(next.halts());
    assert_eq!(next.addr(), 0x10);
}

#[test]
fn next_pc_refuses_target_straddling_closed_region() {
    assert_eq!(
        next_pc(0x10, true, Some(0x7E), &reference_pmp()),
        NextPc::RedirectDenied {
            pc: 0x10,
            target: 0x7E
        }
    );
}
