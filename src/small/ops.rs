use super::*;

impl SmallAccumulator {
  /// Add every element of a slice.
  ///
  /// Interleaves carry propagation with runs of no-carry adds sized to the remaining budget, so
  /// the per-value cost is a plain two-chunk update almost all of the time. The final element is
  /// routed through [`add`](Self::add), keeping the accumulator state identical to that of
  /// implementations that stop the bulk loop one value early to prefetch safely.
  pub fn add_slice(&mut self, vec: &[f64]) {
    let mut rest = vec;
    while rest.len() > 1 {
      if self.adds_until_propagate == 0 {
        self.carry_propagate();
      }
      let m = (rest.len() - 1).min(self.adds_until_propagate as usize);
      for &v in &rest[..m] {
        self.add_no_carry(v);
      }
      self.adds_until_propagate -= m as i32;
      rest = &rest[m..];
    }
    if let Some(&last) = rest.first() {
      self.add(last);
    }
  }

  /// Add the squared norm of a slice, i.e. `Σ vᵢ²`. Each square is the ordinary hardware
  /// product; the squares are then summed exactly.
  pub fn add_sqnorm(&mut self, vec: &[f64]) {
    let mut rest = vec;
    while rest.len() > 1 {
      if self.adds_until_propagate == 0 {
        self.carry_propagate();
      }
      let m = (rest.len() - 1).min(self.adds_until_propagate as usize);
      for &v in &rest[..m] {
        self.add_no_carry(v * v);
      }
      self.adds_until_propagate -= m as i32;
      rest = &rest[m..];
    }
    if let Some(&last) = rest.first() {
      self.add(last * last);
    }
  }

  /// Add the dot product of two slices, i.e. `Σ vᵢ·wᵢ`. Each product is the ordinary hardware
  /// product; the products are then summed exactly.
  ///
  /// # Panics
  ///
  /// Panics if the slices differ in length.
  pub fn add_dot(&mut self, vec1: &[f64], vec2: &[f64]) {
    assert_eq!(vec1.len(), vec2.len(), "add_dot requires equal-length slices");

    let (mut rest1, mut rest2) = (vec1, vec2);
    while rest1.len() > 1 {
      if self.adds_until_propagate == 0 {
        self.carry_propagate();
      }
      let m = (rest1.len() - 1).min(self.adds_until_propagate as usize);
      for (&f, &g) in rest1[..m].iter().zip(&rest2[..m]) {
        self.add_no_carry(f * g);
      }
      self.adds_until_propagate -= m as i32;
      rest1 = &rest1[m..];
      rest2 = &rest2[m..];
    }
    if let (Some(&f), Some(&g)) = (rest1.first(), rest2.first()) {
      self.add(f * g);
    }
  }

  /// Add the exact value held by another accumulator into this one.
  ///
  /// The digits add chunk-wise, which costs a single unit of carry budget; the special-value
  /// flags combine by the same order-independent rules the single-value add applies.
  /// Merging is associative and commutative in the represented value, so a parallel reduction
  /// rounds to the same bits regardless of its tree shape.
  pub fn merge(&mut self, other: &Self) {
    if self.adds_until_propagate == 0 {
      self.carry_propagate();
    }
    self.merge_no_carry(other);
    self.adds_until_propagate -= 1;
  }

  pub(crate) fn merge_no_carry(&mut self, other: &Self) {
    if other.inf != 0 {
      if self.inf == 0 {
        self.inf = other.inf;
      } else if self.inf != other.inf {
        // Opposing infinities: the merged outcome is the NaN their sum would be.
        let f = f64::from_bits(other.inf as u64);
        self.inf = (f - f).to_bits() as i64;
      }
    }
    if other.nan != 0 && self.nan & MANTISSA_MASK < other.nan & MANTISSA_MASK {
      self.nan = other.nan;
    }
    for (c, &v) in self.chunk.iter_mut().zip(&other.chunk) {
      *c += v;
    }
  }
}
