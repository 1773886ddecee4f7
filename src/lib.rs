#![cfg_attr(not(test), no_std)]
//! This crate computes **exact** sums, dot products, and squared norms of IEEE-754
//! double-precision values.
//!
//! # Introduction
//!
//! Ordinary floating point summation rounds after every addition, so the result depends on the
//! order of the terms and can lose everything to cancellation. This crate instead accumulates the
//! terms into a fixed-size integer *superaccumulator* that represents the running sum **exactly**,
//! and rounds only once at the end, to nearest with ties to even. Consequences:
//!
//!   - The result is the correctly rounded value of the true real-arithmetic sum.
//!   - It is independent of the order the terms are added in, bit for bit.
//!   - Partial accumulators can be merged, so parallel and distributed reductions produce the
//!     same bits regardless of how the work was split.
//!
//! Two accumulator types are provided, differing only in their performance profile:
//!
//!   - [`SmallAccumulator`]: 67 signed 64-bit chunks (~0.5 KiB), each covering 32 consecutive
//!     binary exponents. Adding a value touches two chunks; carries are propagated lazily, once
//!     every couple of thousand adds.
//!   - [`LargeAccumulator`]: 4096 unsigned 64-bit buckets (~70 KiB), one per sign+exponent
//!     combination, into which raw bit patterns are summed with no decoding at all. Buckets
//!     spill into an embedded [`SmallAccumulator`] before they can overflow. Faster on large
//!     inputs, at the price of the bigger footprint.
//!
//! # Usage
//!
//! ```
//! use exact_sum::SmallAccumulator;
//!
//! // Terms that naive left-to-right addition gets wrong.
//! let mut acc = SmallAccumulator::new();
//! acc.add_slice(&[1e16, 1.0, -1e16, -1.0]);
//! assert_eq!(acc.round(), 0.0);
//!
//! // Partial sums merge without losing exactness.
//! let mut a = SmallAccumulator::new();
//! let mut b = SmallAccumulator::new();
//! a.add(2e-16);
//! b.add(1.0);
//! a.merge(&b);
//! assert_eq!(a.round(), 1.0000000000000002);
//! ```
//!
//! Accumulators are plain values: no allocation happens after construction, and a single
//! accumulator is not meant to be shared between threads. The intended concurrent pattern is one
//! accumulator per worker plus [`SmallAccumulator::merge`] (or [`LargeAccumulator::merge`]) in
//! any reduction tree.
//!
//! This crate includes benchmarks against non-exact reference summations; run them with
//! `cargo bench`.

mod ieee;

mod small;
mod large;

mod fmt;

pub use small::SmallAccumulator;
pub use large::LargeAccumulator;

// Build-time tracing hook: under `feature = "trace"` this forwards to `log::trace!`; otherwise it
// expands to nothing, so the hot paths carry no trace branches by default.
#[cfg(feature = "trace")]
macro_rules! trace {
  ($($arg:tt)*) => { ::log::trace!($($arg)*) };
}
#[cfg(not(feature = "trace"))]
macro_rules! trace {
  ($($arg:tt)*) => {{}};
}
pub(crate) use trace;

/// Conversions to arbitrary-precision rationals, used as the testing oracle.
#[cfg(test)]
mod rational;

#[cfg(test)]
const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x100} else {0x1_0000};

/// Re-export some internals for benchmarking purposes, only on `feature = "bench"`.
#[cfg(feature = "bench")]
mod bench;
