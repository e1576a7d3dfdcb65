use pmpsim_core::common::AccessType;
use pmpsim_core::core::pipeline::stages::decode_control;
use pmpsim_core::stats::SimStats;

use crate::common::builder::instruction::inst;

#[test]
fn retire_categories() {
    let mut stats = SimStats::default();
    for word in [
        inst().lw(1, 0, 0).build(),
        inst().sw(0, 1, 0).build(),
        inst().jal(0, 8).build(),
        inst().bne(1, 2, 8).build(),
        inst().add(1, 2, 3).build(),
        inst().lui(1, 1).build(),
    ] {
        stats.record_retire(&decode_control(word));
    }
    assert_eq!(stats.instructions_retired, 6);
    assert_eq!(
        (stats.inst_load, stats.inst_store, stats.inst_branch, stats.inst_alu),
        (1, 1, 2, 2)
    );
}

#[test]
fn render_includes_all_sections() {
    let mut stats = SimStats::default();
    stats.cycles = 10;
    stats.violations.record(AccessType::Fetch);
    stats.violations.record(AccessType::Read);

    let text = stats.render();
    assert!(text.contains("PMP CORE SIMULATION STATISTICS"));
    assert!(text.contains("sim_cycles               10"));
    assert!(text.contains("INSTRUCTION MIX"));
    assert!(text.contains("violations.execute     1"));
    assert!(text.contains("violations.total       2"));
}

#[test]
fn render_selected_section_only() {
    let stats = SimStats::default();
    let text = stats.render_sections(&["pmp".to_string()]);
    assert!(text.contains("violations.read"));
    assert!(!text.contains("INSTRUCTION MIX"));
    assert!(!text.contains("sim_cycles"));
}
