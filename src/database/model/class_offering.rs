use crate::database::error::DatabaseError;
use chrono::NaiveTime;
use diesel::prelude::*;
use dto::weekday_set::WeekdaySet;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::class_offering)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ClassOffering {
    id: i32,
    name: String,
    capacity: i32,
    weekdays: String,
    start_time: String,
    end_time: String,
    price: String,
    open: bool,
}

impl TryFrom<ClassOffering> for dto::class_offering::ClassOffering {
    type Error = DatabaseError;

    fn try_from(value: ClassOffering) -> Result<Self, Self::Error> {
        // The catalog write path validates weekday patterns, but rows predating
        // that validation may still carry junk. A malformed pattern claims no
        // days rather than poisoning every check that reads the offering.
        let (weekdays, rejected) = WeekdaySet::parse_lenient(&value.weekdays);
        if !rejected.is_empty() {
            warn!(
                "Ignoring malformed weekday tokens [class: {}, tokens: {rejected:?}]",
                value.id
            );
        }

        Ok(dto::class_offering::ClassOffering::new(
            value.id,
            value.name,
            value.capacity,
            weekdays,
            NaiveTime::from_str(&value.start_time)?,
            NaiveTime::from_str(&value.end_time)?,
            Decimal::from_str(&value.price)?,
            value.open,
        ))
    }
}
