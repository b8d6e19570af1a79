use chrono::NaiveDateTime;

use super::{affected, SchoolStore, StoreResult, UserStore};
use crate::connection::{Conn, PgPool};
use crate::models::school::{NewSchool, School, SchoolChanges};
use crate::models::user::{NewUser, User};

#[derive(Clone)]
pub struct PgSchoolStore {
    pool: PgPool,
}

impl PgSchoolStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> StoreResult<Conn> {
        Ok(self.pool.get()?)
    }
}

impl SchoolStore for PgSchoolStore {
    fn get(&self, id: i32) -> StoreResult<School> {
        Ok(School::find(id, &mut *self.conn()?)?)
    }

    fn all(&self) -> StoreResult<Vec<School>> {
        Ok(School::list_all(&mut *self.conn()?)?)
    }

    fn create(&self, school: NewSchool) -> StoreResult<School> {
        Ok(school.create(&mut *self.conn()?)?)
    }

    fn update(&self, id: i32, changes: SchoolChanges) -> StoreResult<()> {
        affected(School::update(id, &changes, &mut *self.conn()?)?)
    }

    fn delete(&self, id: i32) -> StoreResult<()> {
        affected(School::delete(id, &mut *self.conn()?)?)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    fn get(&self, id: &str) -> StoreResult<User> {
        Ok(User::get(id, &mut *self.pool.get()?)?)
    }

    fn create(&self, user: NewUser) -> StoreResult<User> {
        Ok(user.create(&mut *self.pool.get()?)?)
    }

    fn touch_last_login(&self, id: &str, at: NaiveDateTime) -> StoreResult<()> {
        affected(User::update_last_login(id, at, &mut *self.pool.get()?)?)
    }
}
