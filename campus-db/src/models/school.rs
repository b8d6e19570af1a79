use super::user::User;
use crate::schema::schools;
use crate::schema::schools::dsl::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable, Debug, Clone, PartialEq, Serialize, Deserialize, Identifiable, Associations,
)]
#[diesel(table_name = schools)]
#[diesel(belongs_to(User, foreign_key = author_id))]
pub struct School {
    pub id: i32,
    pub school_name: String,
    pub grade: String,
    pub start_time: NaiveDateTime,
    pub number_classes: i32,
    pub author_id: String,
}

impl School {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }

    pub fn find(sid: i32, conn: &mut PgConnection) -> QueryResult<Self> {
        schools.find(sid).first(conn)
    }

    pub fn list_all(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        schools.order(id.asc()).load(conn)
    }

    /// Returns the number of rows touched, zero when `sid` is unknown.
    pub fn update(
        sid: i32,
        changes: &SchoolChanges,
        conn: &mut PgConnection,
    ) -> QueryResult<usize> {
        diesel::update(schools.find(sid)).set(changes).execute(conn)
    }

    pub fn delete(sid: i32, conn: &mut PgConnection) -> QueryResult<usize> {
        diesel::delete(schools.find(sid)).execute(conn)
    }
}

#[derive(Insertable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = schools)]
pub struct NewSchool {
    pub school_name: String,
    pub grade: String,
    pub start_time: NaiveDateTime,
    pub number_classes: i32,
    pub author_id: String,
}

impl NewSchool {
    pub fn create(&self, conn: &mut PgConnection) -> QueryResult<School> {
        diesel::insert_into(schools::table)
            .values(self)
            .get_result(conn)
    }
}

/// Editable columns only: `id` and `author_id` are never written after insert.
#[derive(AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = schools)]
pub struct SchoolChanges {
    pub school_name: String,
    pub grade: String,
    pub start_time: NaiveDateTime,
    pub number_classes: i32,
}

impl SchoolChanges {
    pub fn apply_to(self, school: &mut School) {
        school.school_name = self.school_name;
        school.grade = self.grade;
        school.start_time = self.start_time;
        school.number_classes = self.number_classes;
    }
}
