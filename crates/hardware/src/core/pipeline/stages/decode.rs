//! Instruction Decode (ID) Stage.
//!
//! This module maps a raw instruction word onto the control signals that
//! drive the execute stage. It performs:
//! 1. **Opcode Dispatch:** Selects the instruction class from the major opcode.
//! 2. **Operation Selection:** Picks the ALU operation from `funct3`/`funct7`.
//! 3. **Memory Control:** Sets load/store enables, width and sign-extension.
//! 4. **Control Flow:** Marks branches and jumps.
//!
//! Decoding is pure. Unknown encodings yield the inert all-false signals.

use crate::core::pipeline::signals::{
    AluOp, BranchCond, ControlSignals, JumpKind, MemWidth, OpASrc, OpBSrc, WritebackSrc,
};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Decodes `inst` into control signals.
///
/// # Examples
///
/// ```
/// use pmpsim_core::core::pipeline::stages::decode::decode_control;
/// use pmpsim_core::common::INSTRUCTION_NOP;
///
/// let nop = decode_control(INSTRUCTION_NOP);
/// assert!(!nop.mem_read && !nop.mem_write && !nop.is_control_flow());
///
/// // lw a0, 0(zero)
/// let lw = decode_control(0x0000_2503);
/// assert!(lw.mem_read && lw.reg_write);
/// ```
pub fn decode_control(inst: u32) -> ControlSignals {
    match inst.opcode() {
        opcodes::OP_LUI => ControlSignals {
            reg_write: true,
            a_src: OpASrc::Zero,
            ..ControlSignals::default()
        },
        opcodes::OP_AUIPC => ControlSignals {
            reg_write: true,
            a_src: OpASrc::Pc,
            ..ControlSignals::default()
        },
        opcodes::OP_JAL => ControlSignals {
            reg_write: true,
            a_src: OpASrc::Pc,
            wb_src: WritebackSrc::PcPlus4,
            jump: Some(JumpKind::Direct),
            ..ControlSignals::default()
        },
        opcodes::OP_JALR if inst.funct3() == 0 => ControlSignals {
            reg_write: true,
            wb_src: WritebackSrc::PcPlus4,
            jump: Some(JumpKind::Indirect),
            ..ControlSignals::default()
        },
        opcodes::OP_BRANCH => branch_cond(inst.funct3()).map_or_else(
            || inert(inst),
            |cond| ControlSignals {
                a_src: OpASrc::Pc,
                branch: Some(cond),
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_LOAD => load_width(inst.funct3()).map_or_else(
            || inert(inst),
            |(width, signed_load)| ControlSignals {
                reg_write: true,
                mem_read: true,
                width,
                signed_load,
                wb_src: WritebackSrc::Memory,
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_STORE => store_width(inst.funct3()).map_or_else(
            || inert(inst),
            |width| ControlSignals {
                mem_write: true,
                width,
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_IMM => imm_alu_op(inst).map_or_else(
            || inert(inst),
            |alu| ControlSignals {
                reg_write: true,
                alu,
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_REG => reg_alu_op(inst).map_or_else(
            || inert(inst),
            |alu| ControlSignals {
                reg_write: true,
                alu,
                b_src: OpBSrc::Reg2,
                ..ControlSignals::default()
            },
        ),
        opcodes::OP_MISC_MEM if inst.funct3() == funct3::FENCE => ControlSignals::default(),
        _ => inert(inst),
    }
}

fn inert(inst: u32) -> ControlSignals {
    tracing::debug!("unrecognized instruction {inst:#010x} executes as no-op");
    ControlSignals::default()
}

const fn branch_cond(f3: u32) -> Option<BranchCond> {
    match f3 {
        funct3::BEQ => Some(BranchCond::Eq),
        funct3::BNE => Some(BranchCond::Ne),
        funct3::BLT => Some(BranchCond::Lt),
        funct3::BGE => Some(BranchCond::Ge),
        funct3::BLTU => Some(BranchCond::Ltu),
        funct3::BGEU => Some(BranchCond::Geu),
        _ => None,
    }
}

const fn load_width(f3: u32) -> Option<(MemWidth, bool)> {
    match f3 {
        funct3::LB => Some((MemWidth::Byte, true)),
        funct3::LH => Some((MemWidth::Half, true)),
        funct3::LW => Some((MemWidth::Word, true)),
        funct3::LBU => Some((MemWidth::Byte, false)),
        funct3::LHU => Some((MemWidth::Half, false)),
        _ => None,
    }
}

const fn store_width(f3: u32) -> Option<MemWidth> {
    match f3 {
        funct3::SB => Some(MemWidth::Byte),
        funct3::SH => Some(MemWidth::Half),
        funct3::SW => Some(MemWidth::Word),
        _ => None,
    }
}

fn imm_alu_op(inst: u32) -> Option<AluOp> {
    match (inst.funct3(), inst.funct7()) {
        (funct3::ADD_SUB, _) => Some(AluOp::Add),
        (funct3::SLT, _) => Some(AluOp::Slt),
        (funct3::SLTU, _) => Some(AluOp::Sltu),
        (funct3::XOR, _) => Some(AluOp::Xor),
        (funct3::OR, _) => Some(AluOp::Or),
        (funct3::AND, _) => Some(AluOp::And),
        (funct3::SLL, funct7::DEFAULT) => Some(AluOp::Sll),
        (funct3::SRL_SRA, funct7::DEFAULT) => Some(AluOp::Srl),
        (funct3::SRL_SRA, funct7::SRA) => Some(AluOp::Sra),
        _ => None,
    }
}

fn reg_alu_op(inst: u32) -> Option<AluOp> {
    match (inst.funct3(), inst.funct7()) {
        (funct3::ADD_SUB, funct7::DEFAULT) => Some(AluOp::Add),
        (funct3::ADD_SUB, funct7::SUB) => Some(AluOp::Sub),
        (funct3::SLL, funct7::DEFAULT) => Some(AluOp::Sll),
        (funct3::SLT, funct7::DEFAULT) => Some(AluOp::Slt),
        (funct3::SLTU, funct7::DEFAULT) => Some(AluOp::Sltu),
        (funct3::XOR, funct7::DEFAULT) => Some(AluOp::Xor),
        (funct3::SRL_SRA, funct7::DEFAULT) => Some(AluOp::Srl),
        (funct3::SRL_SRA, funct7::SRA) => Some(AluOp::Sra),
        (funct3::OR, funct7::DEFAULT) => Some(AluOp::Or),
        (funct3::AND, funct7::DEFAULT) => Some(AluOp::And),
        _ => None,
    }
}
