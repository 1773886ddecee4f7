use super::*;

impl LargeAccumulator {
  /// Add every element of a slice.
  pub fn add_slice(&mut self, vec: &[f64]) {
    self.add_unrolled(vec.len(), |i| vec[i])
  }

  /// Add the squared norm of a slice, i.e. `Σ vᵢ²`. Each square is the ordinary hardware
  /// product; the squares are then summed exactly.
  pub fn add_sqnorm(&mut self, vec: &[f64]) {
    self.add_unrolled(vec.len(), |i| vec[i] * vec[i])
  }

  /// Add the dot product of two slices, i.e. `Σ vᵢ·wᵢ`. Each product is the ordinary hardware
  /// product; the products are then summed exactly.
  ///
  /// # Panics
  ///
  /// Panics if the slices differ in length.
  pub fn add_dot(&mut self, vec1: &[f64], vec2: &[f64]) {
    assert_eq!(vec1.len(), vec2.len(), "add_dot requires equal-length slices");
    self.add_unrolled(vec1.len(), |i| vec1[i] * vec2[i])
  }

  /// The engine behind the bulk adds, unrolled two values per iteration.
  ///
  /// The inner loop has no branches besides its own back-edge: both buckets are updated
  /// *speculatively*, and the two decremented counts plus the remaining-length countdown are
  /// folded into a single sign test (their bitwise OR is negative iff at least one of them is).
  /// When the test fires for a count rather than for the length, the speculative updates are
  /// backed out and the values re-dispatched through the slow path. The last one or two values
  /// always take the plain path, which keeps the unrolled loop free of length checks.
  #[inline]
  fn add_unrolled(&mut self, n: usize, get: impl Fn(usize) -> f64) {
    let mut v = 0;
    let mut m = n as i64 - 3;
    while m >= 0 {
      let (u1, u2, ix1, ix2, count1, mut count2) = loop {
        let u1 = get(v).to_bits();
        let u2 = get(v + 1).to_bits();
        v += 2;

        let ix1 = (u1 >> MANTISSA_BITS) as usize;
        let count1 = self.count[ix1] - 1;
        self.count[ix1] = count1;
        self.chunk[ix1] = self.chunk[ix1].wrapping_add(u1);

        let ix2 = (u2 >> MANTISSA_BITS) as usize;
        let count2 = self.count[ix2] - 1;
        self.count[ix2] = count2;
        self.chunk[ix2] = self.chunk[ix2].wrapping_add(u2);

        m -= 2;
        if (count1 as i64 | count2 as i64 | m) < 0 {
          break (u1, u2, ix1, ix2, count1, count2);
        }
      };

      // Were we actually supposed to update those buckets? If a count went negative, undo and
      // redo properly. The second bucket is backed out first unconditionally: if the first needs
      // the slow path, its transfer may recharge the bucket the second value belongs to.
      if count1 < 0 || count2 < 0 {
        self.count[ix2] = count2 + 1;
        self.chunk[ix2] = self.chunk[ix2].wrapping_sub(u2);

        if count1 < 0 {
          self.count[ix1] = count1 + 1;
          self.chunk[ix1] = self.chunk[ix1].wrapping_sub(u1);
          self.add_value_inf_nan(ix1, u1);
          count2 = self.count[ix2] - 1;
        }

        if count2 < 0 {
          self.add_value_inf_nan(ix2, u2);
        } else {
          self.count[ix2] = count2;
          self.chunk[ix2] = self.chunk[ix2].wrapping_add(u2);
        }
      }
    }

    // The last one or two values (or a whole input shorter than three).
    for i in v..n {
      self.add(get(i));
    }
  }

  /// Add the exact value held by another large accumulator into this one.
  ///
  /// The other accumulator is flattened into its embedded small accumulator, which loses no
  /// precision and does not change its represented value, and that is merged here. Associative
  /// and commutative in the represented value, like [`SmallAccumulator::merge`].
  pub fn merge(&mut self, other: &mut Self) {
    let value = other.round_to_small();
    self.sacc.merge(value);
  }
}
