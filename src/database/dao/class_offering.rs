use super::Result;
use crate::database::model::class_offering::ClassOffering;
use diesel::prelude::*;
use dto::class_offering::NewClassOffering;

pub(crate) fn find_class_offering(
    connection: &mut SqliteConnection,
    offering_id: i32,
) -> Result<Option<dto::class_offering::ClassOffering>> {
    use crate::database::schema::class_offering;

    let result = class_offering::table
        .find(offering_id)
        .select(ClassOffering::as_select())
        .first(connection)
        .optional()?;

    result
        .map(dto::class_offering::ClassOffering::try_from)
        .transpose()
}

pub(crate) fn retrieve_class_offerings(
    connection: &mut SqliteConnection,
) -> Result<Vec<dto::class_offering::ClassOffering>> {
    use crate::database::schema::class_offering;

    let results = class_offering::table
        .select(ClassOffering::as_select())
        .load(connection)?;

    let mut offerings = Vec::new();
    for result in results {
        offerings.push(dto::class_offering::ClassOffering::try_from(result)?);
    }

    Ok(offerings)
}

pub(crate) fn insert_class_offering(
    connection: &mut SqliteConnection,
    offering: &NewClassOffering,
) -> Result<i32> {
    use crate::database::schema::class_offering;

    let inserted_id = diesel::insert_into(class_offering::table)
        .values((
            class_offering::name.eq(offering.name().clone()),
            class_offering::capacity.eq(*offering.capacity()),
            class_offering::weekdays.eq(offering.weekdays().to_string()),
            class_offering::start_time.eq(offering.start_time().to_string()),
            class_offering::end_time.eq(offering.end_time().to_string()),
            class_offering::price.eq(offering.price().to_string()),
            class_offering::open.eq(*offering.open()),
        ))
        .returning(class_offering::id)
        .get_result(connection)?;

    Ok(inserted_id)
}
