use pmpsim_core::common::INSTRUCTION_NOP;
use pmpsim_core::isa::disasm::disassemble;
use rstest::rstest;

use crate::common::builder::instruction::inst;

#[rstest]
#[case::nop(INSTRUCTION_NOP, "addi zero, zero, 0")]
#[case::sub(inst().sub(10, 11, 12).build(), "sub a0, a1, a2")]
#[case::srai(inst().srai(5, 6, 3).build(), "srai t0, t1, 3")]
#[case::lw(inst().lw(1, 2, -8).build(), "lw ra, -8(sp)")]
#[case::sb(inst().sb(2, 8, 4).build(), "sb s0, 4(sp)")]
#[case::bgeu(inst().bgeu(1, 2, -12).build(), "bgeu ra, sp, -12")]
#[case::jal(inst().jal(1, 2048).build(), "jal ra, 2048")]
#[case::jalr(inst().jalr(0, 1, 0).build(), "jalr zero, 0(ra)")]
#[case::lui(inst().lui(10, 0x12345).build(), "lui a0, 0x12345")]
#[case::fence(inst().fence().build(), "fence")]
#[case::unknown(0xFFFF_FFFF, "unknown (0xffffffff)")]
fn mnemonics(#[case] word: u32, #[case] text: &str) {
    assert_eq!(disassemble(word), text);
}
