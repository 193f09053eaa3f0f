//! Vector Register File.
//!
//! This module implements the vector register state of the machine.
//! It performs the following:
//! 1. **Storage:** Maintains 16 vector registers of `VLEN` bits each, held as bytes.
//! 2. **Configuration:** Tracks the element width (SEW), the register grouping
//!    factor (LMUL), and the active vector length (`vl`).
//! 3. **Lane Access:** Reads and writes SEW-wide lanes, little-endian within a register.
//!
//! LMUL is validated and reported but registers are never grouped: every
//! vector instruction operates on lanes `0..vl` of single registers.

use std::fmt::Write as _;

use crate::common::{ConfigError, NUM_VREGS};

/// Element widths a vector register can be split into.
const VALID_SEW: [usize; 4] = [8, 16, 32, 64];

/// Register grouping factors accepted by the configuration.
const VALID_LMUL: [usize; 4] = [1, 2, 4, 8];

/// VLEN must be a multiple of this many bits.
const VLEN_GRANULE: usize = 64;

/// Vector register file plus its configuration state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorRegisterFile {
    regs: Vec<Vec<u8>>,
    vlen: usize,
    sew: usize,
    lmul: usize,
    vl: usize,
}

impl VectorRegisterFile {
    /// Creates a zeroed vector register file.
    ///
    /// # Arguments
    ///
    /// * `vlen` - Bits per vector register; a non-zero multiple of 64.
    /// * `sew`  - Selected element width in bits (8, 16, 32, or 64).
    /// * `lmul` - Register grouping factor (1, 2, 4, or 8).
    ///
    /// # Returns
    ///
    /// The register file with `vl = VLEN / SEW`, or the first invalid parameter.
    pub fn new(vlen: usize, sew: usize, lmul: usize) -> Result<Self, ConfigError> {
        if vlen == 0 || vlen % VLEN_GRANULE != 0 {
            return Err(ConfigError::InvalidVlen(vlen));
        }
        check_sew(sew)?;
        check_lmul(lmul)?;
        Ok(Self {
            regs: vec![vec![0; vlen / 8]; NUM_VREGS],
            vlen,
            sew,
            lmul,
            vl: vlen / sew,
        })
    }

    /// Bits per vector register.
    pub const fn vlen(&self) -> usize {
        self.vlen
    }

    /// Current element width in bits.
    pub const fn sew(&self) -> usize {
        self.sew
    }

    /// Current register grouping factor.
    pub const fn lmul(&self) -> usize {
        self.lmul
    }

    /// Current active vector length in lanes.
    pub const fn vl(&self) -> usize {
        self.vl
    }

    /// Lanes per register at the current SEW.
    pub const fn vlmax(&self) -> usize {
        self.vlen / self.sew
    }

    /// Bytes per lane at the current SEW.
    pub const fn lane_bytes(&self) -> usize {
        self.sew / 8
    }

    /// Mask selecting the low SEW bits of a lane value.
    pub const fn sew_mask(&self) -> u64 {
        if self.sew >= 64 {
            u64::MAX
        } else {
            (1u64 << self.sew) - 1
        }
    }

    /// Sets the active vector length, clamped to `vlmax`.
    ///
    /// # Returns
    ///
    /// The vector length actually granted.
    pub fn set_vl(&mut self, requested: usize) -> usize {
        self.vl = requested.min(self.vlmax());
        self.vl
    }

    /// Changes the element width. `vl` is reset to the new `vlmax`.
    pub fn set_sew(&mut self, sew: usize) -> Result<(), ConfigError> {
        check_sew(sew)?;
        self.sew = sew;
        self.vl = self.vlmax();
        Ok(())
    }

    /// Changes the recorded register grouping factor.
    pub fn set_lmul(&mut self, lmul: usize) -> Result<(), ConfigError> {
        check_lmul(lmul)?;
        self.lmul = lmul;
        Ok(())
    }

    /// Reads lane `lane` of register `reg`, zero-extended to 64 bits.
    ///
    /// Out-of-range registers or lanes read as zero.
    pub fn read_lane(&self, reg: usize, lane: usize) -> u64 {
        let width = self.lane_bytes();
        let start = lane * width;
        self.regs
            .get(reg)
            .and_then(|bytes| bytes.get(start..start + width))
            .map_or(0, |chunk| {
                chunk
                    .iter()
                    .rev()
                    .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
            })
    }

    /// Writes the low SEW bits of `value` into lane `lane` of register `reg`.
    ///
    /// Out-of-range registers or lanes are ignored.
    pub fn write_lane(&mut self, reg: usize, lane: usize, value: u64) {
        let width = self.lane_bytes();
        let start = lane * width;
        if let Some(chunk) = self
            .regs
            .get_mut(reg)
            .and_then(|bytes| bytes.get_mut(start..start + width))
        {
            chunk.copy_from_slice(&value.to_le_bytes()[..width]);
        }
    }

    /// Returns every lane of register `reg` at the current SEW.
    pub fn lanes(&self, reg: usize) -> Vec<u64> {
        (0..self.vlmax()).map(|lane| self.read_lane(reg, lane)).collect()
    }

    /// Renders every register holding at least one non-zero lane.
    pub fn dump_nonzero(&self) -> String {
        let mut out = String::new();
        for reg in 0..NUM_VREGS {
            let lanes = self.lanes(reg);
            if lanes.iter().all(|&v| v == 0) {
                continue;
            }
            let _ = write!(out, "v{reg:<2}:");
            for v in lanes {
                let _ = write!(out, " {v:#x}");
            }
            out.push('\n');
        }
        out
    }
}

fn check_sew(sew: usize) -> Result<(), ConfigError> {
    if VALID_SEW.contains(&sew) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSew(sew))
    }
}

fn check_lmul(lmul: usize) -> Result<(), ConfigError> {
    if VALID_LMUL.contains(&lmul) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLmul(lmul))
    }
}
