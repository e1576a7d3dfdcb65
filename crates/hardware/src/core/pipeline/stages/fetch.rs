//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the core. It is responsible for:
//! 1. **Fetch Gating:** Checking read+execute permission for all four bytes
//!    of the instruction word before the instruction memory is touched.
//! 2. **Squashing:** Substituting the canonical NOP for a denied fetch.
//! 3. **Next-PC Selection:** Holding, advancing or redirecting the PC, with
//!    redirect targets checked for execute permission.
//!
//! Neither function mutates the PC; the core commits the selected value.

use crate::common::addr::Addr;
use crate::common::constants::{INSTRUCTION_NOP, INSTRUCTION_SIZE};
use crate::core::units::pmp::{AccessDecision, AccessRequest, Pmp};
use crate::soc::traits::Device;

/// Result of the fetch stage for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOutput {
    /// Address the instruction was fetched from.
    pub pc: Addr,
    /// Fetched word, or [`INSTRUCTION_NOP`] when the fetch was denied.
    pub inst: u32,
    /// Outcome of the read+execute check over `pc..pc + 4`.
    pub decision: AccessDecision,
}

impl FetchOutput {
    /// Returns true if the fetch was permitted.
    #[inline]
    pub const fn allowed(&self) -> bool {
        self.decision.granted()
    }
}

/// Read+execute request covering the instruction word at `pc`.
#[inline]
const fn fetch_request(pc: Addr) -> AccessRequest {
    AccessRequest::fetch(pc).with_size(INSTRUCTION_SIZE)
}

/// Fetches the instruction at `pc` if the PMP allows execution there.
///
/// Every byte of the word must be executable, so a PC that is not 4-aligned
/// cannot pull bytes in from a neighbouring region. A denied fetch never
/// reads `imem` and yields [`INSTRUCTION_NOP`].
pub fn fetch_stage(pc: Addr, imem: &dyn Device, pmp: &Pmp) -> FetchOutput {
    let decision = pmp.check(&fetch_request(pc));
    let inst = if decision.granted() {
        imem.read_u32(pc)
    } else {
        INSTRUCTION_NOP
    };
    FetchOutput { pc, inst, decision }
}

/// Program counter selected for the next cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextPc {
    /// The fetch was denied; the PC stays where it is.
    Hold(Addr),
    /// Fall through to `pc + 4`.
    Sequential(Addr),
    /// Control transfer to a target that may be executed.
    Redirect(Addr),
    /// Control transfer whose target lacks execute permission. The PC stays
    /// at the transfer instruction.
    RedirectDenied {
        /// Address of the transfer instruction.
        pc: Addr,
        /// Refused target.
        target: Addr,
    },
}

impl NextPc {
    /// Address the PC takes in the next cycle.
    pub const fn addr(self) -> Addr {
        match self {
            Self::Hold(pc)
            | Self::Sequential(pc)
            | Self::Redirect(pc)
            | Self::RedirectDenied { pc, .. } => pc,
        }
    }

    /// Returns true if the PC must freeze.
    pub const fn halts(self) -> bool {
        matches!(self, Self::Hold(_) | Self::RedirectDenied { .. })
    }
}

/// Selects the next PC.
///
/// With `fetch_allowed` false the PC is held. A `redirect` is only taken
/// after the word at its target passes the read+execute check.
pub fn next_pc(pc: Addr, fetch_allowed: bool, redirect: Option<Addr>, pmp: &Pmp) -> NextPc {
    if !fetch_allowed {
        return NextPc::Hold(pc);
    }
    match redirect {
        Some(target) if pmp.check(&fetch_request(target)).granted() => {
            NextPc::Redirect(target)
        }
        Some(target) => NextPc::RedirectDenied { pc, target },
        None => NextPc::Sequential(pc.wrapping_add(INSTRUCTION_SIZE)),
    }
}
