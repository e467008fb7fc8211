use diesel::prelude::*;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::member)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Member {
    id: i32,
    last_name: String,
    first_name: String,
    email_address: String,
    active: bool,
}

impl From<Member> for dto::member::Member {
    fn from(value: Member) -> Self {
        dto::member::Member::new(
            value.id,
            value.last_name,
            value.first_name,
            value.email_address,
            value.active,
        )
    }
}
