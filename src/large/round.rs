use super::*;

impl LargeAccumulator {
  /// Round the represented value to a double, to nearest with ties to even.
  ///
  /// All used buckets are drained into the embedded small accumulator first, then its
  /// [rounding](SmallAccumulator::round) finishes the job. The represented value does not
  /// change: rounding twice returns the same bits twice.
  pub fn round(&mut self) -> f64 {
    self.flatten();
    self.sacc.round()
  }

  /// Flatten into the embedded small accumulator and return a reference to it, for callers
  /// that want the compact exact value rather than a double: to serialize it, ship it to
  /// another process, or merge it into another accumulator.
  ///
  /// # Example
  ///
  /// ```
  /// # use exact_sum::{LargeAccumulator, SmallAccumulator};
  /// let mut worker = LargeAccumulator::new();
  /// worker.add_slice(&[0.25, 0.5, 0.125]);
  ///
  /// // ~0.5 KiB on the wire instead of ~70 KiB.
  /// let shipped = worker.round_to_small().to_le_bytes();
  ///
  /// let mut reducer = LargeAccumulator::new();
  /// reducer.add_small(&SmallAccumulator::from_le_bytes(shipped));
  /// assert_eq!(reducer.round(), 0.875);
  /// ```
  pub fn round_to_small(&mut self) -> &SmallAccumulator {
    self.flatten();
    &self.sacc
  }

  /// Drain every used bucket into the embedded small accumulator. The used bit-sets make this
  /// proportional to the buckets actually touched: `used_used` skips 64-bucket blocks wholesale
  /// and the per-word bits walk straight to the active buckets.
  fn flatten(&mut self) {
    trace!("flattening {} buckets", self.chunks_used());

    let mut uu = self.used_used;
    while uu != 0 {
      let w = uu.trailing_zeros() as usize;
      uu &= uu - 1;

      let mut word = self.chunks_used[w];
      while word != 0 {
        let ix = (w << 6) | word.trailing_zeros() as usize;
        word &= word - 1;

        if self.count[ix] >= 0 {
          self.transfer_bucket(ix);
        }
      }
    }
  }
}
