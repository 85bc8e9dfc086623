use super::*;

use core::ops::Mul;

/// Micro-percents making up a whole.
const WHOLE_MICRO_PERCENT: u64 = 100_000_000;

/// A rate expressed in micro-percent, so that `1%` is `1_000_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, SchemaType)]
pub struct Percentage(u64);

impl Percentage {
    pub const fn from_micro_percent(micro_percent: u64) -> Self {
        Self(micro_percent)
    }

    pub const fn from_percent(percent: u64) -> Self {
        Self(percent * 1_000_000)
    }

    pub const fn micro_percent(&self) -> u64 {
        self.0
    }
}

/// Portion of `rhs`, rounded down to the micro CCD.
impl Mul<Amount> for Percentage {
    type Output = Amount;

    fn mul(self, rhs: Amount) -> Self::Output {
        let portion = rhs.micro_ccd as u128 * self.0 as u128 / WHOLE_MICRO_PERCENT as u128;
        Amount::from_micro_ccd(portion as u64)
    }
}
