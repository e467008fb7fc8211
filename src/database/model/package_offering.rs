use crate::database::error::DatabaseError;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::package_offering)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PackageOffering {
    id: i32,
    name: String,
    duration_in_months: i32,
    price: String,
}

impl TryFrom<PackageOffering> for dto::package_offering::PackageOffering {
    type Error = DatabaseError;

    fn try_from(value: PackageOffering) -> Result<Self, Self::Error> {
        Ok(dto::package_offering::PackageOffering::new(
            value.id,
            value.name,
            value.duration_in_months,
            Decimal::from_str(&value.price)?,
        ))
    }
}
