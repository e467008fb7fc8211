use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

const TOKENS: [(&str, Weekday); 7] = [
    ("MON", Weekday::Mon),
    ("TUE", Weekday::Tue),
    ("WED", Weekday::Wed),
    ("THU", Weekday::Thu),
    ("FRI", Weekday::Fri),
    ("SAT", Weekday::Sat),
    ("SUN", Weekday::Sun),
];

/// The set of weekdays on which a class meets, kept as a bitmask indexed from Monday.
/// The canonical text form is a comma-separated list of three-letter tokens, e.g. `MON,WED`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn intersects(&self, other: &WeekdaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn days(&self) -> Vec<Weekday> {
        TOKENS
            .iter()
            .filter(|(_, day)| self.contains(*day))
            .map(|(_, day)| *day)
            .collect()
    }

    /// Parse a weekday pattern, dropping whatever can't be understood.
    /// Return the parsed set along with the rejected tokens,
    /// so that the caller can report them without aborting.
    pub fn parse_lenient(pattern: &str) -> (Self, Vec<String>) {
        let mut set = WeekdaySet::default();
        let mut rejected = vec![];
        for token in pattern.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match parse_token(token) {
                Some(day) => set.insert(day),
                None => rejected.push(token.to_owned()),
            }
        }

        (set, rejected)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }
}

impl FromStr for WeekdaySet {
    type Err = ParseWeekdaySetError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let (set, rejected) = Self::parse_lenient(pattern);
        match rejected.into_iter().next() {
            None => Ok(set),
            Some(token) => Err(ParseWeekdaySetError(token)),
        }
    }
}

impl TryFrom<String> for WeekdaySet {
    type Error = ParseWeekdaySetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekdaySet> for String {
    fn from(value: WeekdaySet) -> Self {
        value.to_string()
    }
}

impl Display for WeekdaySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let tokens = TOKENS
            .iter()
            .filter(|(_, day)| self.contains(*day))
            .map(|(token, _)| *token)
            .collect::<Vec<_>>();
        write!(f, "{}", tokens.join(","))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = WeekdaySet::default();
        for day in iter {
            set.insert(day);
        }

        set
    }
}

fn parse_token(token: &str) -> Option<Weekday> {
    match token.to_uppercase().as_str() {
        "MON" | "MONDAY" => Some(Weekday::Mon),
        "TUE" | "TUESDAY" => Some(Weekday::Tue),
        "WED" | "WEDNESDAY" => Some(Weekday::Wed),
        "THU" | "THURSDAY" => Some(Weekday::Thu),
        "FRI" | "FRIDAY" => Some(Weekday::Fri),
        "SAT" | "SATURDAY" => Some(Weekday::Sat),
        "SUN" | "SUNDAY" => Some(Weekday::Sun),
        _ => None,
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("'{0}' isn't a valid weekday token.")]
pub struct ParseWeekdaySetError(pub String);
