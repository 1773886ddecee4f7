use super::*;

impl LargeAccumulator {
  /// The serialized size of a large accumulator in bytes: buckets, counts, the used bit-sets,
  /// and the embedded small accumulator.
  pub const BYTES: usize = LCHUNKS * 8 + LCHUNKS * 2 + LUSED_WORDS * 8 + 8 + SmallAccumulator::BYTES;

  /// A fresh accumulator, representing exactly `0.0`.
  pub const fn new() -> Self {
    Self {
      chunk: [0; LCHUNKS],
      count: [-1; LCHUNKS],
      chunks_used: [0; LUSED_WORDS],
      used_used: 0,
      sacc: SmallAccumulator::new(),
    }
  }

  /// Return the accumulator to its freshly-constructed state.
  pub fn reset(&mut self) {
    *self = Self::new()
  }

  /// The number of buckets currently in use (touched since the last reset). A probe for tests
  /// and diagnostics.
  pub fn chunks_used(&self) -> usize {
    self.count.iter().filter(|&&c| c >= 0).count()
  }

  /// Merge the exact value held by a small accumulator into this one (it lands in the embedded
  /// small accumulator, buckets untouched). This is how distributed reductions fold shipped
  /// partial sums into a local large accumulator.
  pub fn add_small(&mut self, value: &SmallAccumulator) {
    self.sacc.merge(value)
  }

  /// Serialize into the fixed little-endian layout: 4096 × u64 buckets, 4096 × i16 counts,
  /// 64 × u64 used bits, u64 summary bits, then the embedded small accumulator's
  /// [layout](SmallAccumulator::to_le_bytes).
  pub fn to_le_bytes(&self) -> [u8; Self::BYTES] {
    let mut bytes = [0; Self::BYTES];
    for (i, c) in self.chunk.iter().enumerate() {
      bytes[i * 8..i * 8 + 8].copy_from_slice(&c.to_le_bytes());
    }
    let base = LCHUNKS * 8;
    for (i, c) in self.count.iter().enumerate() {
      bytes[base + i * 2..base + i * 2 + 2].copy_from_slice(&c.to_le_bytes());
    }
    let base = base + LCHUNKS * 2;
    for (i, w) in self.chunks_used.iter().enumerate() {
      bytes[base + i * 8..base + i * 8 + 8].copy_from_slice(&w.to_le_bytes());
    }
    let base = base + LUSED_WORDS * 8;
    bytes[base..base + 8].copy_from_slice(&self.used_used.to_le_bytes());
    bytes[base + 8..].copy_from_slice(&self.sacc.to_le_bytes());
    bytes
  }

  /// Reconstruct an accumulator from its [serialized form](Self::to_le_bytes).
  pub fn from_le_bytes(bytes: &[u8; Self::BYTES]) -> Self {
    let mut acc = Self::new();
    for (i, c) in acc.chunk.iter_mut().enumerate() {
      *c = read_u64(&bytes[i * 8..]);
    }
    let base = LCHUNKS * 8;
    for (i, c) in acc.count.iter_mut().enumerate() {
      *c = i16::from_le_bytes([bytes[base + i * 2], bytes[base + i * 2 + 1]]);
    }
    let base = base + LCHUNKS * 2;
    for (i, w) in acc.chunks_used.iter_mut().enumerate() {
      *w = read_u64(&bytes[base + i * 8..]);
    }
    let base = base + LUSED_WORDS * 8;
    acc.used_used = read_u64(&bytes[base..]);
    let mut sacc = [0; SmallAccumulator::BYTES];
    sacc.copy_from_slice(&bytes[base + 8..]);
    acc.sacc = SmallAccumulator::from_le_bytes(sacc);
    acc
  }
}

fn read_u64(bytes: &[u8]) -> u64 {
  let mut b = [0; 8];
  b.copy_from_slice(&bytes[..8]);
  u64::from_le_bytes(b)
}

impl Default for LargeAccumulator {
  fn default() -> Self {
    Self::new()
  }
}

impl From<&SmallAccumulator> for LargeAccumulator {
  /// Start a large accumulator from the state of a small one: the small accumulator is copied
  /// into the embedded slot, the buckets start empty.
  fn from(value: &SmallAccumulator) -> Self {
    let mut acc = Self::new();
    acc.sacc = value.clone();
    acc
  }
}
