//! Execute (EX) Stage.
//!
//! This module computes everything an instruction does in its single cycle.
//! It performs:
//! 1. **Decode:** Control signals and the sign-extended immediate.
//! 2. **ALU:** Arithmetic, effective addresses and control-transfer targets.
//! 3. **Data Gating:** A PMP check at the effective address of loads and
//!    stores, combined with the fetch outcome into the write enables.
//! 4. **Load Data:** Reads data memory for permitted loads.
//!
//! The stage reads the pre-tick snapshot and memory only. Register writes
//! and stores come back as pending operations for the core to commit.

use crate::common::addr::{Addr, Word};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::data::AccessType;
use crate::core::cpu::ProcessorState;
use crate::core::pipeline::signals::{
    ControlSignals, JumpKind, MemWidth, OpASrc, OpBSrc, WritebackSrc,
};
use crate::core::pipeline::stages::decode::decode_control;
use crate::core::units::alu::Alu;
use crate::core::units::pmp::{AccessDecision, AccessRequest, Pmp};
use crate::isa::decode::decode;
use crate::soc::traits::Device;

/// Data-port access attempted by the instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataAccess {
    /// [`AccessType::Read`] for loads, [`AccessType::Write`] for stores.
    pub kind: AccessType,
    /// Effective address (`rs1 + imm`).
    pub address: Addr,
    /// Outcome of the PMP check over the bytes the access touches.
    pub decision: AccessDecision,
}

/// Register write committed at the end of the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Writeback {
    /// Destination register.
    pub rd: usize,
    /// Value written.
    pub value: Word,
}

/// Store committed at the end of the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOp {
    /// Byte address.
    pub address: Addr,
    /// Access width.
    pub width: MemWidth,
    /// Value, already truncated to `width`.
    pub value: Word,
}

impl StoreOp {
    /// Applies the store to `dmem`.
    pub fn commit(&self, dmem: &mut dyn Device) {
        match self.width {
            MemWidth::Byte => dmem.write_u8(self.address, self.value as u8),
            MemWidth::Half => dmem.write_u16(self.address, self.value as u16),
            MemWidth::Word => dmem.write_u32(self.address, self.value),
            MemWidth::Nop => {}
        }
    }
}

/// Result of the execute stage for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// Control signals before gating.
    pub control: ControlSignals,
    /// ALU output (effective address for memory operations, target for jumps
    /// and branches).
    pub alu_result: Word,
    /// Data access, present for loads and stores that were not squashed.
    pub data_access: Option<DataAccess>,
    /// Gated register write.
    pub writeback: Option<Writeback>,
    /// Gated store.
    pub store: Option<StoreOp>,
    /// Control-transfer target, if the instruction jumps or a branch is taken.
    pub redirect: Option<Addr>,
}

impl ExecuteOutput {
    /// Returns the data access decision, `Granted` when there was no access.
    pub fn data_decision(&self) -> AccessDecision {
        self.data_access
            .map_or(AccessDecision::Granted, |access| access.decision)
    }
}

/// Executes `inst` against the pre-tick `state`.
///
/// Write enables follow the fetch and data outcomes:
/// * register write: `reg_write && fetch_allowed && (!mem_read || data_allowed)`
/// * memory read/write: `mem_read`/`mem_write` `&& fetch_allowed && data_allowed`
///
/// A squashed instruction (`fetch_allowed == false`) therefore produces no
/// write, store or redirect whatever `inst` holds.
pub fn execute_stage(
    state: &ProcessorState,
    inst: u32,
    dmem: &dyn Device,
    pmp: &Pmp,
    fetch_allowed: bool,
) -> ExecuteOutput {
    let decoded = decode(inst);
    let control = decode_control(inst);

    let rs1 = state.regs.read(decoded.rs1);
    let rs2 = state.regs.read(decoded.rs2);
    let imm = decoded.imm as Word;

    let op_a = match control.a_src {
        OpASrc::Reg1 => rs1,
        OpASrc::Pc => state.pc,
        OpASrc::Zero => 0,
    };
    let op_b = match control.b_src {
        OpBSrc::Imm => imm,
        OpBSrc::Reg2 => rs2,
    };
    let alu_result = Alu::execute(control.alu, op_a, op_b);

    // A squashed instruction performs no data access, so nothing is checked.
    // The check spans every byte the access touches.
    let data_access = if fetch_allowed && control.accesses_memory() {
        let (kind, request) = if control.mem_read {
            (AccessType::Read, AccessRequest::load(alu_result))
        } else {
            (AccessType::Write, AccessRequest::store(alu_result))
        };
        let request = request.with_size(control.width.bytes());
        Some(DataAccess {
            kind,
            address: alu_result,
            decision: pmp.check(&request),
        })
    } else {
        None
    };
    let data_allowed = data_access.is_none_or(|access| access.decision.granted());

    let reg_write_en = control.reg_write && fetch_allowed && (!control.mem_read || data_allowed);
    let mem_read_en = control.mem_read && fetch_allowed && data_allowed;
    let mem_write_en = control.mem_write && fetch_allowed && data_allowed;

    let pc_plus_4 = state.pc.wrapping_add(INSTRUCTION_SIZE);
    let writeback = reg_write_en.then(|| {
        let value = match control.wb_src {
            WritebackSrc::Alu => alu_result,
            WritebackSrc::PcPlus4 => pc_plus_4,
            WritebackSrc::Memory if mem_read_en => {
                load(dmem, alu_result, control.width, control.signed_load)
            }
            WritebackSrc::Memory => 0,
        };
        Writeback {
            rd: decoded.rd,
            value,
        }
    });

    let store = mem_write_en.then(|| StoreOp {
        address: alu_result,
        width: control.width,
        value: truncate(rs2, control.width),
    });

    let redirect = if fetch_allowed {
        match (control.jump, control.branch) {
            (Some(JumpKind::Direct), _) => Some(alu_result),
            (Some(JumpKind::Indirect), _) => Some(rs1.wrapping_add(imm) & !1),
            (None, Some(cond)) if cond.taken(rs1, rs2) => Some(alu_result),
            _ => None,
        }
    } else {
        None
    };

    ExecuteOutput {
        control,
        alu_result,
        data_access,
        writeback,
        store,
        redirect,
    }
}

fn load(dmem: &dyn Device, addr: Addr, width: MemWidth, signed: bool) -> Word {
    match (width, signed) {
        (MemWidth::Byte, true) => dmem.read_u8(addr) as i8 as i32 as Word,
        (MemWidth::Byte, false) => dmem.read_u8(addr) as Word,
        (MemWidth::Half, true) => dmem.read_u16(addr) as i16 as i32 as Word,
        (MemWidth::Half, false) => dmem.read_u16(addr) as Word,
        (MemWidth::Word, _) => dmem.read_u32(addr),
        (MemWidth::Nop, _) => 0,
    }
}

const fn truncate(value: Word, width: MemWidth) -> Word {
    match width {
        MemWidth::Byte => value & 0xFF,
        MemWidth::Half => value & 0xFFFF,
        MemWidth::Word => value,
        MemWidth::Nop => 0,
    }
}
