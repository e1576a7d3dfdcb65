use pmpsim_core::common::INSTRUCTION_NOP;
use pmpsim_core::core::pipeline::signals::{
    AluOp, BranchCond, ControlSignals, JumpKind, MemWidth, OpASrc, OpBSrc, WritebackSrc,
};
use pmpsim_core::core::pipeline::stages::decode_control;
use rstest::rstest;

use crate::common::builder::instruction::inst;

#[test]
fn nop_is_inert() {
    let c = decode_control(INSTRUCTION_NOP);
    assert!(!c.mem_read && !c.mem_write);
    assert!(!c.is_control_flow());
    // Writes x0, which discards the value.
    assert_eq!(c.alu, AluOp::Add);
}

#[rstest]
#[case::all_ones(0xFFFF_FFFF)]
#[case::zero(0x0000_0000)]
#[case::jalr_bad_funct3(inst().jalr(1, 2, 0).funct3(0b010).build())]
#[case::load_bad_funct3(inst().lw(1, 2, 0).funct3(0b011).build())]
#[case::store_bad_funct3(inst().sw(1, 2, 0).funct3(0b011).build())]
#[case::branch_bad_funct3(inst().beq(1, 2, 8).funct3(0b010).build())]
#[case::mul(inst().add(1, 2, 3).funct7(0b000_0001).build())]
fn unknown_encodings_are_inert(#[case] word: u32) {
    assert_eq!(decode_control(word), ControlSignals::default());
}

#[test]
fn loads() {
    let lw = decode_control(inst().lw(1, 2, 4).build());
    assert!(lw.reg_write && lw.mem_read && !lw.mem_write);
    assert_eq!(lw.width, MemWidth::Word);
    assert_eq!(lw.wb_src, WritebackSrc::Memory);

    let lbu = decode_control(inst().lbu(1, 2, 4).build());
    assert_eq!((lbu.width, lbu.signed_load), (MemWidth::Byte, false));

    let lh = decode_control(inst().lh(1, 2, 4).build());
    assert_eq!((lh.width, lh.signed_load), (MemWidth::Half, true));
}

#[test]
fn stores() {
    let sh = decode_control(inst().sh(1, 2, 4).build());
    assert!(sh.mem_write && !sh.mem_read && !sh.reg_write);
    assert_eq!(sh.width, MemWidth::Half);
    assert!(sh.accesses_memory());
}

#[rstest]
#[case::beq(inst().beq(1, 2, 8).build(), BranchCond::Eq)]
#[case::bne(inst().bne(1, 2, 8).build(), BranchCond::Ne)]
#[case::blt(inst().blt(1, 2, 8).build(), BranchCond::Lt)]
#[case::bge(inst().bge(1, 2, 8).build(), BranchCond::Ge)]
#[case::bltu(inst().bltu(1, 2, 8).build(), BranchCond::Ltu)]
#[case::bgeu(inst().bgeu(1, 2, 8).build(), BranchCond::Geu)]
fn branches(#[case] word: u32, #[case] cond: BranchCond) {
    let c = decode_control(word);
    assert_eq!(c.branch, Some(cond));
    assert_eq!(c.a_src, OpASrc::Pc);
    assert!(!c.reg_write);
}

#[test]
fn jumps() {
    let jal = decode_control(inst().jal(1, 8).build());
    assert_eq!(jal.jump, Some(JumpKind::Direct));
    assert_eq!(jal.wb_src, WritebackSrc::PcPlus4);

    let jalr = decode_control(inst().jalr(1, 2, 8).build());
    assert_eq!(jalr.jump, Some(JumpKind::Indirect));
    assert_eq!(jalr.a_src, OpASrc::Reg1);
}

#[test]
fn upper_immediates() {
    assert_eq!(decode_control(inst().lui(1, 1).build()).a_src, OpASrc::Zero);
    assert_eq!(decode_control(inst().auipc(1, 1).build()).a_src, OpASrc::Pc);
}

#[rstest]
#[case::add(inst().add(1, 2, 3).build(), AluOp::Add, OpBSrc::Reg2)]
#[case::sub(inst().sub(1, 2, 3).build(), AluOp::Sub, OpBSrc::Reg2)]
#[case::sra(inst().sra(1, 2, 3).build(), AluOp::Sra, OpBSrc::Reg2)]
#[case::and(inst().and(1, 2, 3).build(), AluOp::And, OpBSrc::Reg2)]
#[case::slti(inst().slti(1, 2, 3).build(), AluOp::Slt, OpBSrc::Imm)]
#[case::srli(inst().srli(1, 2, 3).build(), AluOp::Srl, OpBSrc::Imm)]
#[case::srai(inst().srai(1, 2, 3).build(), AluOp::Sra, OpBSrc::Imm)]
#[case::ori(inst().ori(1, 2, 3).build(), AluOp::Or, OpBSrc::Imm)]
fn alu_selection(#[case] word: u32, #[case] alu: AluOp, #[case] b_src: OpBSrc) {
    let c = decode_control(word);
    assert!(c.reg_write);
    assert_eq!((c.alu, c.b_src), (alu, b_src));
}

#[test]
fn fence_does_nothing() {
    assert_eq!(decode_control(inst().fence().build()), ControlSignals::default());
}
