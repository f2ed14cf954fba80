use std::{cmp::Ordering, fmt, str::FromStr, sync::OnceLock};

use chrono::Month;
use regex::Regex;

use crate::error::{Error, Result};

const MONTH_NAMES: [(&str, Month); 12] = [
    ("Jan", Month::January),
    ("Feb", Month::February),
    ("Mar", Month::March),
    ("Apr", Month::April),
    ("May", Month::May),
    ("Jun", Month::June),
    ("Jul", Month::July),
    ("Aug", Month::August),
    ("Sept", Month::September),
    ("Oct", Month::October),
    ("Nov", Month::November),
    ("Dec", Month::December),
];

/// Month names are matched exactly; `Sep` or `jan` are rejected.
pub(crate) fn parse_month(s: &str) -> Result<Month> {
    MONTH_NAMES
        .iter()
        .find(|(name, _)| *name == s)
        .map(|(_, month)| *month)
        .ok_or_else(|| Error::UnknownMonth(s.to_string()))
}

pub(crate) fn month_str(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1].0
}

/// Publication date of a post, as written in its `date:` field.
///
/// The day is only checked against `1..=31`, not against the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostDate {
    pub day: u32,
    pub month: Month,
    pub year: u32,
}

impl PostDate {
    fn key(&self) -> (u32, u32, u32) {
        (self.year, self.month.number_from_month(), self.day)
    }
}

impl Ord for PostDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for PostDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", month_str(self.month), self.day, self.year)
    }
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // month, whitespace, day, comma right after the day, year
    PATTERN.get_or_init(|| Regex::new(r"^\s*(\S+)(?:\s+(\d+)(?:,\s*(\d+))?)?").unwrap())
}

impl FromStr for PostDate {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let caps = date_pattern().captures(value);
        let tokens: Vec<&str> = caps
            .iter()
            .flat_map(|c| c.iter().skip(1).flatten())
            .map(|m| m.as_str())
            .collect();
        let [month, day, year] = tokens[..] else {
            return Err(Error::DateFieldCount {
                value: value.to_string(),
                found: tokens.len(),
            });
        };

        let number = |s: &str| {
            s.parse::<u32>().map_err(|_| Error::InvalidNumber {
                value: value.to_string(),
                number: s.to_string(),
            })
        };
        let day = number(day)?;
        let year = number(year)?;
        if !(1..=31).contains(&day) {
            return Err(Error::DayOutOfRange {
                value: value.to_string(),
                day,
            });
        }

        Ok(PostDate {
            day,
            month: parse_month(month)?,
            year,
        })
    }
}
