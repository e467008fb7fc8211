use crate::catalog::error::CatalogError;
use crate::catalog::error::CatalogError::{
    EmptyWeekdaySet, InvalidCapacity, InvalidDuration, InvalidTimeWindow, NegativePrice,
    UnknownClassOffering, UnknownPackageOffering,
};
use crate::database::error::DatabaseError;
use crate::database::{DbPool, dao};
use diesel::SqliteConnection;
use dto::class_offering::{ClassOffering, NewClassOffering};
use dto::package_offering::{NewPackageOffering, PackageOffering};
use rust_decimal::Decimal;

pub(crate) mod error;

/// Class and package facts, current as of the call. Capacity decisions must
/// not rely on these reads: the orchestrator re-reads the offering through
/// [find_class_offering] inside its own transaction.
pub fn get_class_offering(pool: &DbPool, offering_id: i32) -> Result<ClassOffering, CatalogError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    find_class_offering(&mut connection, offering_id)
}

pub(crate) fn find_class_offering(
    connection: &mut SqliteConnection,
    offering_id: i32,
) -> Result<ClassOffering, CatalogError> {
    dao::class_offering::find_class_offering(connection, offering_id)?
        .ok_or(UnknownClassOffering(offering_id))
}

pub fn get_package_offering(
    pool: &DbPool,
    offering_id: i32,
) -> Result<PackageOffering, CatalogError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    find_package_offering(&mut connection, offering_id)
}

pub(crate) fn find_package_offering(
    connection: &mut SqliteConnection,
    offering_id: i32,
) -> Result<PackageOffering, CatalogError> {
    dao::package_offering::find_package_offering(connection, offering_id)?
        .ok_or(UnknownPackageOffering(offering_id))
}

pub fn list_class_offerings(pool: &DbPool) -> Result<Vec<ClassOffering>, CatalogError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    Ok(dao::class_offering::retrieve_class_offerings(
        &mut connection,
    )?)
}

pub fn list_package_offerings(pool: &DbPool) -> Result<Vec<PackageOffering>, CatalogError> {
    let mut connection = pool.get().map_err(DatabaseError::from)?;
    Ok(dao::package_offering::retrieve_package_offerings(
        &mut connection,
    )?)
}

/// Weekday patterns are validated here, at write time,
/// so the enrollment hot path never has to repair them.
pub fn create_class_offering(
    pool: &DbPool,
    offering: &NewClassOffering,
) -> Result<ClassOffering, CatalogError> {
    validate_class_offering(offering)?;

    let mut connection = pool.get().map_err(DatabaseError::from)?;
    let offering_id = dao::class_offering::insert_class_offering(&mut connection, offering)?;
    info!("Class offering created [class: {offering_id}]");

    find_class_offering(&mut connection, offering_id)
}

pub fn create_package_offering(
    pool: &DbPool,
    offering: &NewPackageOffering,
) -> Result<PackageOffering, CatalogError> {
    validate_package_offering(offering)?;

    let mut connection = pool.get().map_err(DatabaseError::from)?;
    let offering_id = dao::package_offering::insert_package_offering(&mut connection, offering)?;
    info!("Package offering created [package: {offering_id}]");

    find_package_offering(&mut connection, offering_id)
}

fn validate_class_offering(offering: &NewClassOffering) -> Result<(), CatalogError> {
    if *offering.capacity() < 1 {
        return Err(InvalidCapacity);
    }
    if offering.start_time() >= offering.end_time() {
        return Err(InvalidTimeWindow);
    }
    if offering.weekdays().is_empty() {
        return Err(EmptyWeekdaySet);
    }
    if offering.price() < &Decimal::ZERO {
        return Err(NegativePrice);
    }

    Ok(())
}

fn validate_package_offering(offering: &NewPackageOffering) -> Result<(), CatalogError> {
    if *offering.duration_in_months() < 1 {
        return Err(InvalidDuration);
    }
    if offering.price() < &Decimal::ZERO {
        return Err(NegativePrice);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    mod create_class_offering {
        use crate::catalog::create_class_offering;
        use crate::catalog::error::CatalogError::{
            EmptyWeekdaySet, InvalidCapacity, InvalidTimeWindow, NegativePrice,
        };
        use crate::database::with_temp_database;
        use chrono::NaiveTime;
        use dto::class_offering::NewClassOffering;
        use dto::class_offering::tests::morning_spin;
        use dto::weekday_set::WeekdaySet;
        use rust_decimal::Decimal;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let offering = morning_spin();

                let result = create_class_offering(&pool, &offering).unwrap();
                assert_eq!(offering.name(), result.name());
                assert_eq!(offering.weekdays(), result.weekdays());
            })
        }

        #[test]
        fn fail_when_no_capacity() {
            with_temp_database(|pool| {
                let offering = NewClassOffering::new(
                    "No room".to_string(),
                    0,
                    "MON".parse::<WeekdaySet>().unwrap(),
                    NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    Decimal::new(1000, 2),
                    true,
                );

                let result = create_class_offering(&pool, &offering);
                assert_eq!(Err(InvalidCapacity), result);
            })
        }

        #[test]
        fn fail_when_ends_before_it_starts() {
            with_temp_database(|pool| {
                let offering = NewClassOffering::new(
                    "Backwards".to_string(),
                    5,
                    "MON".parse::<WeekdaySet>().unwrap(),
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                    Decimal::new(1000, 2),
                    true,
                );

                let result = create_class_offering(&pool, &offering);
                assert_eq!(Err(InvalidTimeWindow), result);
            })
        }

        #[test]
        fn fail_when_no_weekday() {
            with_temp_database(|pool| {
                let offering = NewClassOffering::new(
                    "Never".to_string(),
                    5,
                    WeekdaySet::default(),
                    NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    Decimal::new(1000, 2),
                    true,
                );

                let result = create_class_offering(&pool, &offering);
                assert_eq!(Err(EmptyWeekdaySet), result);
            })
        }

        #[test]
        fn fail_when_negative_price() {
            with_temp_database(|pool| {
                let offering = NewClassOffering::new(
                    "Paying to attend".to_string(),
                    5,
                    "MON".parse::<WeekdaySet>().unwrap(),
                    NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    Decimal::new(-1000, 2),
                    true,
                );

                let result = create_class_offering(&pool, &offering);
                assert_eq!(Err(NegativePrice), result);
            })
        }
    }

    mod create_package_offering {
        use crate::catalog::create_package_offering;
        use crate::catalog::error::CatalogError::InvalidDuration;
        use crate::database::with_temp_database;
        use dto::package_offering::NewPackageOffering;
        use dto::package_offering::tests::quarterly_pass;
        use rust_decimal::Decimal;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let offering = quarterly_pass();

                let result = create_package_offering(&pool, &offering).unwrap();
                assert_eq!(offering.name(), result.name());
                assert_eq!(offering.duration_in_months(), result.duration_in_months());
            })
        }

        #[test]
        fn fail_when_no_duration() {
            with_temp_database(|pool| {
                let offering =
                    NewPackageOffering::new("Instant".to_string(), 0, Decimal::new(1000, 2));

                let result = create_package_offering(&pool, &offering);
                assert_eq!(Err(InvalidDuration), result);
            })
        }
    }

    mod get_class_offering {
        use crate::catalog::error::CatalogError::UnknownClassOffering;
        use crate::catalog::{create_class_offering, get_class_offering};
        use crate::database::with_temp_database;
        use dto::class_offering::tests::morning_spin;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let created = create_class_offering(&pool, &morning_spin()).unwrap();

                let result = get_class_offering(&pool, *created.id()).unwrap();
                assert_eq!(created, result);
            })
        }

        #[test]
        fn fail_when_unknown() {
            with_temp_database(|pool| {
                let result = get_class_offering(&pool, 42);
                assert_eq!(Err(UnknownClassOffering(42)), result);
            })
        }
    }

    mod get_package_offering {
        use crate::catalog::error::CatalogError::UnknownPackageOffering;
        use crate::catalog::{create_package_offering, get_package_offering};
        use crate::database::with_temp_database;
        use dto::package_offering::tests::quarterly_pass;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let created = create_package_offering(&pool, &quarterly_pass()).unwrap();

                let result = get_package_offering(&pool, *created.id()).unwrap();
                assert_eq!(created, result);
            })
        }

        #[test]
        fn fail_when_unknown() {
            with_temp_database(|pool| {
                let result = get_package_offering(&pool, 42);
                assert_eq!(Err(UnknownPackageOffering(42)), result);
            })
        }
    }
}
