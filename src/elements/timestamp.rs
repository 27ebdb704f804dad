use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Instant of a benchmark run, held as whole seconds and sub-second nanos since the Unix epoch.
///
/// Unlike the raw floating point column it is read from, `Timestamp` is totally ordered and
/// hashable, so records can be grouped by run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64, u32);

impl Timestamp {
    const NANOS_PER_SEC: i64 = 1_000_000_000;

    pub fn from_secs(secs: i64) -> Self {
        Self(secs, 0)
    }

    pub fn new(secs: i64, subsec_nanos: u32) -> Self {
        let carry = i64::from(subsec_nanos) / Self::NANOS_PER_SEC;
        let nanos = (i64::from(subsec_nanos) % Self::NANOS_PER_SEC) as u32;
        Self(secs + carry, nanos)
    }

    pub fn as_f64(&self) -> f64 {
        (self.0 as f64) + ((self.1 as f64) / (Self::NANOS_PER_SEC as f64))
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    pub fn as_pair(&self) -> (i64, u32) {
        (self.0, self.1)
    }

    /// Calendar instant for the timestamp, if chrono can represent it.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0, self.1).single()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "({},{})", self.0, self.1)
        } else {
            match self.to_utc() {
                Some(dt) => write!(f, "{}", dt),
                None => write!(f, "{}_s", self.as_f64()),
            }
        }
    }
}

impl From<f64> for Timestamp {
    fn from(timestamp_secs: f64) -> Self {
        let secs = timestamp_secs.floor();
        let nanos = ((timestamp_secs - secs) * Self::NANOS_PER_SEC as f64).round() as u32;
        Self::new(secs as i64, nanos)
    }
}

impl From<i64> for Timestamp {
    fn from(timestamp_secs: i64) -> Self {
        Self(timestamp_secs, 0)
    }
}

impl From<i32> for Timestamp {
    fn from(timestamp_secs: i32) -> Self {
        Self(i64::from(timestamp_secs), 0)
    }
}

impl From<Timestamp> for f64 {
    fn from(ts: Timestamp) -> Self {
        ts.as_f64()
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let secs: f64 = Deserialize::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(serde::de::Error::custom(format!(
                "timestamp must be a finite number of seconds: {}",
                secs
            )));
        }
        Ok(secs.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timestamp_from_fractional_secs() {
        assert_eq!(Timestamp::from(1_700_000_000.5).as_pair(), (1_700_000_000, 500_000_000));
        assert_eq!(Timestamp::from(-1.25).as_pair(), (-2, 750_000_000));
        assert_eq!(Timestamp::from(1_700_000_000.0), Timestamp::from_secs(1_700_000_000));
    }

    #[test]
    fn test_timestamp_ordering_follows_instant() {
        let earlier = Timestamp::new(100, 999_999_999);
        let later = Timestamp::from_secs(101);
        assert!(earlier < later);
        assert_eq!(Timestamp::new(100, 1_000_000_000), later);
    }

    #[test]
    fn test_timestamp_to_utc() {
        let ts = Timestamp::from_secs(86_400);
        let dt = ts.to_utc().unwrap();
        assert_eq!(dt.to_rfc3339(), "1970-01-02T00:00:00+00:00");
        assert_eq!(format!("{:#}", ts), "(86400,0)");
    }
}
