use super::Result;
use crate::database::model::member::Member;
use diesel::prelude::*;

pub(crate) fn find_member(
    connection: &mut SqliteConnection,
    member_id: i32,
) -> Result<Option<dto::member::Member>> {
    use crate::database::schema::member;

    let result = member::table
        .find(member_id)
        .select(Member::as_select())
        .first(connection)
        .optional()?;

    Ok(result.map(dto::member::Member::from))
}

/// The member table belongs to member management; the engine only ever reads it.
/// Tests still need rows in it.
#[cfg(test)]
pub(crate) fn insert_member(connection: &mut SqliteConnection, member: &dto::member::Member) {
    use crate::database::schema::member;

    diesel::insert_into(member::table)
        .values((
            member::id.eq(*member.id()),
            member::last_name.eq(member.last_name().clone()),
            member::first_name.eq(member.first_name().clone()),
            member::email_address.eq(member.email_address().clone()),
            member::active.eq(*member.active()),
        ))
        .execute(connection)
        .unwrap();
}

#[cfg(test)]
mod tests {
    mod find_member {
        use crate::database::dao::member::{find_member, insert_member};
        use crate::database::with_temp_database;
        use dto::member::tests::jon_doe;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                insert_member(&mut connection, &jon_doe());

                let result = find_member(&mut connection, *jon_doe().id()).unwrap();
                assert_eq!(Some(jon_doe()), result);
            })
        }

        #[test]
        fn none_when_unknown() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let result = find_member(&mut connection, 42).unwrap();
                assert_eq!(None, result);
            })
        }
    }
}
