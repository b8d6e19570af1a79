use chrono::NaiveDateTime;
use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::models::school::{NewSchool, School, SchoolChanges};
use crate::models::user::{NewUser, User};

pub use self::memory::{MemorySchoolStore, MemoryUserStore};
pub use self::pg::{PgSchoolStore, PgUserStore};

pub mod memory;
pub mod pg;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    Conflict,
    #[error("query: {0}")]
    Query(DieselError),
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => StoreError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                StoreError::Conflict
            }
            err => StoreError::Query(err),
        }
    }
}

/// Single-record persistence for schools. Every call is one statement; there
/// is no transaction spanning calls.
pub trait SchoolStore: Send + Sync {
    fn get(&self, id: i32) -> StoreResult<School>;

    /// All schools in ascending id order.
    fn all(&self) -> StoreResult<Vec<School>>;

    fn create(&self, school: NewSchool) -> StoreResult<School>;

    fn update(&self, id: i32, changes: SchoolChanges) -> StoreResult<()>;

    fn delete(&self, id: i32) -> StoreResult<()>;
}

pub trait UserStore: Send + Sync {
    fn get(&self, id: &str) -> StoreResult<User>;

    /// Fails with [`StoreError::Conflict`] when the id is taken.
    fn create(&self, user: NewUser) -> StoreResult<User>;

    fn touch_last_login(&self, id: &str, at: NaiveDateTime) -> StoreResult<()>;
}

fn affected(rows: usize) -> StoreResult<()> {
    if rows == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}
