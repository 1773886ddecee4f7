use crate::ieee::*;
use crate::{LargeAccumulator, SmallAccumulator};

use core::fmt::{Debug, Formatter, Result};

impl Debug for SmallAccumulator {
  /// Renders only the interesting state: the special-value flags if set, and the non-zero
  /// chunks, uppermost first, each with the power of two its lowest bit stands for.
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "SmallAccumulator {{")?;
    if self.inf != 0 {
      write!(f, " inf: {:#018x},", self.inf)?;
    }
    if self.nan != 0 {
      write!(f, " nan: {:#018x},", self.nan)?;
    }
    for (i, &c) in self.chunk.iter().enumerate().rev().filter(|&(_, &c)| c != 0) {
      let weight = (i as i64) * LOW_MANTISSA_BITS as i64 - EXP_BIAS - MANTISSA_BITS as i64;
      write!(f, " chunk[{i}] (2^{weight}): {c:#x},")?;
    }
    write!(f, " adds_until_propagate: {} }}", self.adds_until_propagate)
  }
}

impl Debug for LargeAccumulator {
  /// Renders the active buckets (sign, exponent field, remaining count, accumulated bits)
  /// followed by the embedded small accumulator.
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "LargeAccumulator {{")?;
    for (ix, &count) in self.count.iter().enumerate().rev().filter(|&(_, &c)| c >= 0) {
      let sign = if ix >> EXP_BITS != 0 { '-' } else { '+' };
      let exp = ix as i64 & EXP_MASK;
      write!(f, " bucket[{sign}{exp}] ({count} left): {:#x},", self.chunk[ix])?;
    }
    write!(f, " sacc: {:?} }}", self.sacc)
  }
}
