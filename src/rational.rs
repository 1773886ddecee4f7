//! This module translates accumulator state and doubles into arbitrary-precision rationals, for
//! the purposes of _testing_. The accumulators are verified by checking exact rationals: for
//! example, that the chunks of a small accumulator represent exactly the sum of the rationals of
//! the inputs, and that [`SmallAccumulator::round`] agrees with a **super-explicit** and
//! **super-obvious** reference rounding of that exact value.

use crate::ieee::*;
use crate::SmallAccumulator;

use malachite::base::num::arithmetic::traits::PowerOf2;
use malachite::base::num::conversion::traits::RoundingFrom;
use malachite::base::rounding_modes::RoundingMode;
use malachite::rational::Rational;

/// The error type returned when an accumulator holds no finite value (an Inf or NaN flag is set).
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub struct NotFinite;

impl TryFrom<&SmallAccumulator> for Rational {
  type Error = NotFinite;

  /// The exact value represented by the chunks: `Σ chunk[i] · 2^(32·i − 1075)`.
  fn try_from(acc: &SmallAccumulator) -> core::result::Result<Self, NotFinite> {
    if acc.inf != 0 || acc.nan != 0 {
      return Err(NotFinite);
    }
    let mut sum = Rational::from(0);
    for (i, &c) in acc.chunk.iter().enumerate() {
      if c != 0 {
        let weight = i as i64 * LOW_MANTISSA_BITS as i64 - EXP_BIAS - MANTISSA_BITS as i64;
        sum += Rational::from(c) * Rational::power_of_2(weight);
      }
    }
    Ok(sum)
  }
}

/// The exact sum of a slice of doubles. Panics on non-finite input; the Inf/NaN paths have their
/// own tests and no exact rational.
pub fn exact(vec: &[f64]) -> Rational {
  let mut sum = Rational::from(0);
  for &x in vec {
    sum += Rational::try_from(x).expect("exact() needs finite inputs");
  }
  sum
}

/// The reference rounding: the binary64 nearest to `value`, ties to the even mantissa, overflowing
/// to infinity from the first magnitude whose nearest representable neighbor would be 2^1024.
pub fn correctly_rounded(value: &Rational) -> f64 {
  // 2^1024 − 2^970 is halfway between MAX and 2^1024; the tie goes to the even 2^1024, which
  // overflows. Everything of greater magnitude overflows a fortiori.
  let overflow = Rational::power_of_2(1024i64) - Rational::power_of_2(970i64);
  if *value >= overflow {
    f64::INFINITY
  } else if *value <= -overflow {
    f64::NEG_INFINITY
  } else {
    f64::rounding_from(value.clone(), RoundingMode::Nearest).0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn doubles_are_exact_rationals() {
    assert_eq!(exact(&[1.0]), Rational::from(1));
    assert_eq!(exact(&[-2.5]), Rational::from_signeds(-5, 2));
    // 0.1 is not 1/10; it is the nearest double to it.
    assert_eq!(
      exact(&[0.1]),
      Rational::from_signeds(3602879701896397i64, 1i64 << 55),
    );
    // The smallest denormal.
    assert_eq!(exact(&[f64::from_bits(1)]), Rational::power_of_2(-1074i64));
  }

  #[test]
  fn accumulator_state_is_exact() {
    let mut acc = SmallAccumulator::new();
    acc.add_slice(&[1.0, 0.1, -2.5, 1e300, -1e300, f64::from_bits(1)]);
    assert_eq!(
      Rational::try_from(&acc),
      Ok(exact(&[1.0, 0.1, -2.5, f64::from_bits(1)])),
    );
  }

  #[test]
  fn specials_are_not_finite() {
    let mut acc = SmallAccumulator::new();
    acc.add(f64::NAN);
    assert_eq!(Rational::try_from(&acc), Err(NotFinite));
  }

  #[test]
  fn reference_rounding() {
    assert_eq!(correctly_rounded(&Rational::from(1)), 1.0);
    assert_eq!(correctly_rounded(&Rational::from_signeds(1, 3)).to_bits(), (1.0f64 / 3.0).to_bits());
    // A tie: 1 + 2^-53 goes to the even 1.0.
    let tie = Rational::from(1) + Rational::power_of_2(-53i64);
    assert_eq!(correctly_rounded(&tie), 1.0);
    // Overflow both ways.
    let big = Rational::power_of_2(1024i64);
    assert_eq!(correctly_rounded(&big), f64::INFINITY);
    assert_eq!(correctly_rounded(&-big), f64::NEG_INFINITY);
    // Just under the overflow threshold still rounds down to MAX.
    let near = Rational::power_of_2(1024i64)
      - Rational::power_of_2(970i64)
      - Rational::power_of_2(900i64);
    assert_eq!(correctly_rounded(&near), f64::MAX);
  }
}
