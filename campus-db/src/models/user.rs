use crate::schema::users;
use crate::schema::users::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Clone, Serialize, Deserialize, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: String,
    pub hash_pwd: String,
    pub email: String,
    pub user_role: String,
    pub is_active: bool,
    pub joined_at: NaiveDateTime,
    pub last_login_at: Option<NaiveDateTime>,
}

impl User {
    pub fn get(uid: &str, conn: &mut PgConnection) -> QueryResult<Self> {
        users.find(uid).first(conn)
    }

    pub fn update_last_login(
        uid: &str,
        time: NaiveDateTime,
        conn: &mut PgConnection,
    ) -> QueryResult<usize> {
        diesel::update(users.find(uid))
            .set(last_login_at.eq(time))
            .execute(conn)
    }
}

#[derive(Insertable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: String,
    pub hash_pwd: String,
    pub email: String,
    pub user_role: String,
}

impl NewUser {
    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<User> {
        diesel::insert_into(users::table)
            .values(self)
            .get_result(conn)
    }
}
