use crate::weekday_set::WeekdaySet;
use chrono::NaiveTime;
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed-capacity class as declared in the catalog.
/// The enrollment engine reads these facts and never changes them.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct ClassOffering {
    id: i32,
    name: String,
    capacity: i32,
    weekdays: WeekdaySet,
    start_time: NaiveTime,
    end_time: NaiveTime,
    price: Decimal,
    open: bool,
}

impl ClassOffering {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i32,
        name: String,
        capacity: i32,
        weekdays: WeekdaySet,
        start_time: NaiveTime,
        end_time: NaiveTime,
        price: Decimal,
        open: bool,
    ) -> Self {
        Self {
            id,
            name,
            capacity,
            weekdays,
            start_time,
            end_time,
            price,
            open,
        }
    }
}

/// A class definition as submitted by catalog management.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct NewClassOffering {
    name: String,
    capacity: i32,
    weekdays: WeekdaySet,
    start_time: NaiveTime,
    end_time: NaiveTime,
    price: Decimal,
    open: bool,
}

impl NewClassOffering {
    pub fn new(
        name: String,
        capacity: i32,
        weekdays: WeekdaySet,
        start_time: NaiveTime,
        end_time: NaiveTime,
        price: Decimal,
        open: bool,
    ) -> Self {
        Self {
            name,
            capacity,
            weekdays,
            start_time,
            end_time,
            price,
            open,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use std::str::FromStr;

    /// Mon/Wed 08:00-09:00, two places.
    pub fn morning_spin() -> NewClassOffering {
        NewClassOffering {
            name: "Morning spin".to_string(),
            capacity: 2,
            weekdays: WeekdaySet::from_str("MON,WED").unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            price: Decimal::new(1250, 2),
            open: true,
        }
    }

    /// Mon/Fri 08:30-09:30, overlapping morning_spin on Mondays.
    pub fn late_morning_pump() -> NewClassOffering {
        NewClassOffering {
            name: "Late morning pump".to_string(),
            capacity: 10,
            weekdays: WeekdaySet::from_str("MON,FRI").unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            price: Decimal::new(1250, 2),
            open: true,
        }
    }

    /// Tue/Thu 08:00-09:00, no weekday shared with morning_spin.
    pub fn tuesday_yoga() -> NewClassOffering {
        NewClassOffering {
            name: "Tuesday yoga".to_string(),
            capacity: 10,
            weekdays: WeekdaySet::from_str("TUE,THU").unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            price: Decimal::new(990, 2),
            open: true,
        }
    }

    /// Mon/Wed 09:00-10:00, starting exactly when morning_spin ends.
    pub fn back_to_back_stretch() -> NewClassOffering {
        NewClassOffering {
            name: "Back-to-back stretch".to_string(),
            capacity: 10,
            weekdays: WeekdaySet::from_str("MON,WED").unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            price: Decimal::new(990, 2),
            open: true,
        }
    }

    pub fn closed_boxing() -> NewClassOffering {
        NewClassOffering {
            name: "Boxing".to_string(),
            capacity: 8,
            weekdays: WeekdaySet::from_str("SAT").unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            price: Decimal::new(1500, 2),
            open: false,
        }
    }
}
