use std::fmt::Display;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// Latest time of day at which a customer may be reached.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Deadline(Time);

impl Deadline {
    /// Accepts `HH:MM` and `HH:MM:SS`.
    pub fn parse(value: &str) -> Result<Self, jiff::Error> {
        let value = value.trim();
        Time::strptime("%H:%M", value)
            .or_else(|_| value.parse::<Time>())
            .map(Deadline)
    }

    pub fn seconds_since_midnight(&self) -> u64 {
        let time = self.0;
        time.hour() as u64 * 3600 + time.minute() as u64 * 60 + time.second() as u64
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
        } else {
            write!(
                f,
                "{:02}:{:02}:{:02}",
                self.0.hour(),
                self.0.minute(),
                self.0.second()
            )
        }
    }
}

impl TryFrom<String> for Deadline {
    type Error = jiff::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Deadline::parse(&value)
    }
}

impl From<Deadline> for String {
    fn from(value: Deadline) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours_minutes() {
        let deadline = Deadline::parse("09:30").unwrap();
        assert_eq!(deadline.seconds_since_midnight(), 9 * 3600 + 30 * 60);
        assert_eq!(deadline.to_string(), "09:30");
    }

    #[test]
    fn test_parse_with_seconds() {
        let deadline = Deadline::parse("17:05:42").unwrap();
        assert_eq!(deadline.seconds_since_midnight(), 17 * 3600 + 5 * 60 + 42);
        assert_eq!(deadline.to_string(), "17:05:42");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Deadline::parse("25:00").is_err());
        assert!(Deadline::parse("noon").is_err());
        assert!(Deadline::parse("").is_err());
    }

    #[test]
    fn test_ordering_follows_time_of_day() {
        let early = Deadline::parse("08:00").unwrap();
        let late = Deadline::parse("18:00").unwrap();
        assert!(early < late);
    }
}
