use crate::ieee::*;
use crate::small::SmallAccumulator;
use crate::trace;

/// The *large* superaccumulator: a bucket per sign+exponent combination, trading ~70 KiB of
/// state for an add path that does no decoding at all.
///
/// The top 12 bits of an incoming double (sign plus biased exponent) index straight into
/// `chunk`, and the **entire 64-bit pattern** is added to the bucket with wrapping arithmetic.
/// All values in one bucket share those top 12 bits, so their sign/exponent parts pile up in a
/// predictable way that the transfer into the embedded small
/// accumulator cancels out exactly; the mantissa sums below are exact as long as a bucket takes
/// at most 2^12 values, which is what `count` enforces.
///
/// A count of `-1` marks a bucket that has never been touched (or one of the Inf/NaN buckets,
/// which never hold sums). The `chunks_used`/`used_used` bit-sets remember which buckets have
/// ever spilled, so rounding can skip the empty ones quickly.
///
/// Because of its size, callers that move a `LargeAccumulator` around a lot may want to box it;
/// the small accumulator is the better fit for tight inline storage.
#[derive(Clone)]
pub struct LargeAccumulator {
  /// Wrapping sums of raw bit patterns, indexed by sign+exponent prefix.
  pub(crate) chunk: [u64; LCHUNKS],
  /// Adds remaining per bucket before a transfer is required; -1 for untouched or special.
  pub(crate) count: [i16; LCHUNKS],
  /// Bit per bucket: has it ever been transferred (i.e. could it hold data).
  pub(crate) chunks_used: [u64; LUSED_WORDS],
  /// Bit per `chunks_used` word: is the word non-zero.
  pub(crate) used_used: u64,
  /// The small accumulator the buckets condense into.
  pub(crate) sacc: SmallAccumulator,
}

/// Construction, probing, conversions, and the serialized layout.
mod basics;

/// Adding single values, and the bucket transfer into the embedded small accumulator.
mod add;

/// The user-facing bulk operations, unrolled two values at a time, and merging.
mod ops;

/// Rounding, by draining the buckets and deferring to the small accumulator.
mod round;
