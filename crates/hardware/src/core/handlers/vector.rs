//! Vector Handlers.
//!
//! Lane-wise state transitions over lanes `0..vl` of the vector register
//! file. Every lane is active: the mask bit is decoded but never consulted.

use crate::common::SimError;
use crate::core::handlers::Operands;
use crate::core::machine::Machine;

/// Lane-wise vector operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorOp {
    /// `vs2 + vs1`.
    Add,
    /// `vs2 - vs1`.
    Sub,
    /// `vs2 * vs1`, low SEW bits.
    Mul,
    /// `vs2 & vs1`.
    And,
    /// `vs2 | vs1`.
    Or,
    /// `vs2 ^ vs1`.
    Xor,
}

impl VectorOp {
    /// Applies the operation to one pair of lanes; the caller masks to SEW.
    pub const fn apply(self, vs2: u64, vs1: u64) -> u64 {
        match self {
            Self::Add => vs2.wrapping_add(vs1),
            Self::Sub => vs2.wrapping_sub(vs1),
            Self::Mul => vs2.wrapping_mul(vs1),
            Self::And => vs2 & vs1,
            Self::Or => vs2 | vs1,
            Self::Xor => vs2 ^ vs1,
        }
    }
}

fn lane_address(base: u64, lane: usize, width: usize) -> u64 {
    base.wrapping_add((lane * width) as u64)
}

fn base_address(m: &Machine, o: Operands) -> u64 {
    u64::from(m.regs.read(o.rs1).wrapping_add(o.imm as u32))
}

/// LV: fills lanes `0..vl` of `vd` from consecutive SEW-wide memory elements.
pub fn load(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    let base = base_address(m, o);
    let width = m.vregs.lane_bytes();
    for lane in 0..m.vregs.vl() {
        let value = m.memory.read(lane_address(base, lane, width), width)?;
        m.vregs.write_lane(o.rd, lane, value);
    }
    Ok(())
}

/// SV: writes lanes `0..vl` of `vs3` to consecutive SEW-wide memory elements.
pub fn store(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    let base = base_address(m, o);
    let width = m.vregs.lane_bytes();
    for lane in 0..m.vregs.vl() {
        let value = m.vregs.read_lane(o.rd, lane);
        m.memory.write(lane_address(base, lane, width), width, value)?;
    }
    Ok(())
}

/// `vd[i] = vs2[i] op vs1[i]` for every active lane, wrapping at SEW bits.
pub fn arith(m: &mut Machine, o: Operands, op: VectorOp) -> Result<(), SimError> {
    let mask = m.vregs.sew_mask();
    for lane in 0..m.vregs.vl() {
        let vs2 = m.vregs.read_lane(o.rs2, lane);
        let vs1 = m.vregs.read_lane(o.rs1, lane);
        m.vregs.write_lane(o.rd, lane, op.apply(vs2, vs1) & mask);
    }
    Ok(())
}

/// VSETVL: `vl = vlmax` when `rs1` is `x0`, else `min(x[rs1], vlmax)`; `rd = vl`.
pub fn setvl(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    let requested = if o.rs1 == 0 {
        m.vregs.vlmax()
    } else {
        m.regs.read(o.rs1) as usize
    };
    let vl = m.vregs.set_vl(requested);
    m.regs.write(o.rd, vl as u32);
    Ok(())
}
