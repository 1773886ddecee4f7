use super::*;

impl SmallAccumulator {
  /// Propagate carries chunk to chunk, restoring the canonical digit range. Must run often
  /// enough that accumulated carries cannot overflow out the top of a chunk, which is what
  /// `adds_until_propagate` guarantees.
  ///
  /// Returns the index of the uppermost non-zero chunk (0 if the represented value is zero).
  /// On return, the uppermost non-zero chunk indicates the sign of the number, is in the range
  /// `-2^32 ..= 2^32 - 1`, and is never `-1` (all ones); chunks below it are non-negative and in
  /// `0 ..= 2^32 - 1`; chunks above it are zero. The represented value is unchanged.
  pub(crate) fn carry_propagate(&mut self) -> usize {
    trace!("carry propagating, {} chunks in use", self.chunks_used());

    // Find the uppermost non-zero chunk; if there is none the number is zero.
    let Some(mut u) = self.chunk.iter().rposition(|&c| c != 0) else {
      self.adds_until_propagate = SMALL_CARRY_TERMS - 1;
      return 0;
    };

    // Skip over the unused low-order chunks.
    let mut i = 0;
    while self.chunk[i] == 0 {
      i += 1;
    }

    // Walk up from the lowest non-zero chunk, pushing each chunk's signed overflow into the
    // chunk above. `uix` tracks the uppermost chunk known to stay non-zero; the walk's upper
    // limit can grow by one when the top chunk itself overflows (the head-room in SCHUNKS
    // admits this).
    let mut uix = None;
    while i <= u {
      let c = self.chunk[i];
      if c == 0 {
        i += 1;
        continue;
      }

      // The carry is the signed high part; the arithmetic shift keeps its sign.
      let chigh = c >> LOW_MANTISSA_BITS;
      if chigh == 0 {
        uix = Some(i);
        i += 1;
        continue;
      }

      if i == u {
        if chigh == -1 {
          // Don't propagate a -1 into the all-zero region above; the collapse below handles a
          // negative top chunk.
          uix = Some(i);
          break;
        }
        // chunk[u + 1] is about to become non-zero.
        u = i + 1;
      }

      let clow = c & LOW_MANTISSA_MASK;
      if clow != 0 {
        uix = Some(i);
      }
      self.chunk[i] = clow;
      self.chunk[i + 1] += chigh;
      i += 1;
    }

    // Check again for zero: propagation may have cancelled everything that initially looked
    // non-zero (e.g. x and -x summed in separate chunks).
    let Some(mut uix) = uix else {
      self.adds_until_propagate = SMALL_CARRY_TERMS - 1;
      return 0;
    };

    // While the uppermost chunk is -1, fold it into the chunk below: -1·2^32 + c is the same
    // value with one fewer non-zero chunks. Rounding depends on the top chunk never being -1.
    while self.chunk[uix] == -1 && uix > 0 {
      self.chunk[uix] = 0;
      uix -= 1;
      self.chunk[uix] -= 1 << LOW_MANTISSA_BITS;
    }

    // One add of budget goes to the no-carry add that typically follows.
    self.adds_until_propagate = SMALL_CARRY_TERMS - 1;

    trace!("carry propagated, top chunk {}", uix);
    uix
  }
}
