use super::Result;
use crate::database::model::package_offering::PackageOffering;
use diesel::prelude::*;
use dto::package_offering::NewPackageOffering;

pub(crate) fn find_package_offering(
    connection: &mut SqliteConnection,
    offering_id: i32,
) -> Result<Option<dto::package_offering::PackageOffering>> {
    use crate::database::schema::package_offering;

    let result = package_offering::table
        .find(offering_id)
        .select(PackageOffering::as_select())
        .first(connection)
        .optional()?;

    result
        .map(dto::package_offering::PackageOffering::try_from)
        .transpose()
}

pub(crate) fn retrieve_package_offerings(
    connection: &mut SqliteConnection,
) -> Result<Vec<dto::package_offering::PackageOffering>> {
    use crate::database::schema::package_offering;

    let results = package_offering::table
        .select(PackageOffering::as_select())
        .load(connection)?;

    let mut offerings = Vec::new();
    for result in results {
        offerings.push(dto::package_offering::PackageOffering::try_from(result)?);
    }

    Ok(offerings)
}

pub(crate) fn insert_package_offering(
    connection: &mut SqliteConnection,
    offering: &NewPackageOffering,
) -> Result<i32> {
    use crate::database::schema::package_offering;

    let inserted_id = diesel::insert_into(package_offering::table)
        .values((
            package_offering::name.eq(offering.name().clone()),
            package_offering::duration_in_months.eq(*offering.duration_in_months()),
            package_offering::price.eq(offering.price().to_string()),
        ))
        .returning(package_offering::id)
        .get_result(connection)?;

    Ok(inserted_id)
}
