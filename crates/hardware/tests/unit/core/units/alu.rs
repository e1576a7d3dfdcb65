use pmpsim_core::core::pipeline::signals::AluOp;
use pmpsim_core::core::units::alu::Alu;
use rstest::rstest;

#[rstest]
#[case::add(AluOp::Add, 2, 3, 5)]
#[case::add_wraps(AluOp::Add, u32::MAX, 2, 1)]
#[case::sub(AluOp::Sub, 10, 3, 7)]
#[case::sub_wraps(AluOp::Sub, 0, 1, u32::MAX)]
#[case::and(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case::or(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case::xor(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case::slt_signed(AluOp::Slt, (-1_i32) as u32, 1, 1)]
#[case::slt_false(AluOp::Slt, 5, 5, 0)]
#[case::sltu_unsigned(AluOp::Sltu, (-1_i32) as u32, 1, 0)]
#[case::sltu_true(AluOp::Sltu, 1, 2, 1)]
#[case::sll(AluOp::Sll, 1, 31, 0x8000_0000)]
#[case::sll_masks_amount(AluOp::Sll, 1, 33, 2)]
#[case::srl(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case::sra(AluOp::Sra, 0x8000_0000, 31, u32::MAX)]
#[case::sra_positive(AluOp::Sra, 0x4000_0000, 30, 1)]
fn alu_ops(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}
