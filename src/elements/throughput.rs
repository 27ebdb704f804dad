use std::fmt::{self, Debug};
use std::ops::Div;

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

/// Hashing throughput in megabytes per second.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegabytesPerSecond(f64);

impl MegabytesPerSecond {
    pub const ZERO: MegabytesPerSecond = MegabytesPerSecond(0.0);

    pub fn new(mb_per_sec: f64) -> Self {
        Self(mb_per_sec)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    pub fn max(lhs: MegabytesPerSecond, rhs: MegabytesPerSecond) -> MegabytesPerSecond {
        f64::max(lhs.0, rhs.0).into()
    }
}

impl fmt::Display for MegabytesPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:.2}_MB/s", self.0))
    }
}

impl AsRef<f64> for MegabytesPerSecond {
    fn as_ref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for MegabytesPerSecond {
    fn from(rate: f64) -> Self {
        Self(rate)
    }
}

impl From<MegabytesPerSecond> for f64 {
    fn from(rate: MegabytesPerSecond) -> Self {
        rate.0
    }
}

impl From<&MegabytesPerSecond> for f64 {
    fn from(rate: &MegabytesPerSecond) -> Self {
        rate.0
    }
}

/// Ratio of two throughputs.
impl Div for MegabytesPerSecond {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}

impl AbsDiffEq for MegabytesPerSecond {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.0, &other.0, epsilon)
    }
}

impl RelativeEq for MegabytesPerSecond {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        f64::relative_eq(&self.0, &other.0, epsilon, max_relative)
    }
}
