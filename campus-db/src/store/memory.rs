use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{NaiveDateTime, Utc};

use super::{SchoolStore, StoreError, StoreResult, UserStore};
use crate::models::school::{NewSchool, School, SchoolChanges};
use crate::models::user::{NewUser, User};

#[derive(Debug, Default)]
struct SchoolTable {
    last_id: i32,
    rows: BTreeMap<i32, School>,
}

/// Process-local school table with the same observable behavior as the
/// Postgres store: serial ids that are never reused and id-ordered listing.
#[derive(Debug, Default)]
pub struct MemorySchoolStore {
    table: Mutex<SchoolTable>,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<T>(&self, f: impl FnOnce(&mut SchoolTable) -> StoreResult<T>) -> StoreResult<T> {
        // Each operation leaves the map consistent, so a poisoned lock is still usable.
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut table)
    }
}

impl SchoolStore for MemorySchoolStore {
    fn get(&self, id: i32) -> StoreResult<School> {
        self.with_table(|t| t.rows.get(&id).cloned().ok_or(StoreError::NotFound))
    }

    fn all(&self) -> StoreResult<Vec<School>> {
        self.with_table(|t| Ok(t.rows.values().cloned().collect()))
    }

    fn create(&self, school: NewSchool) -> StoreResult<School> {
        self.with_table(|t| {
            t.last_id += 1;
            let created = School {
                id: t.last_id,
                school_name: school.school_name,
                grade: school.grade,
                start_time: school.start_time,
                number_classes: school.number_classes,
                author_id: school.author_id,
            };
            t.rows.insert(created.id, created.clone());
            Ok(created)
        })
    }

    fn update(&self, id: i32, changes: SchoolChanges) -> StoreResult<()> {
        self.with_table(|t| {
            let row = t.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
            changes.apply_to(row);
            Ok(())
        })
    }

    fn delete(&self, id: i32) -> StoreResult<()> {
        self.with_table(|t| t.rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound))
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    rows: Mutex<BTreeMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, id: &str) -> StoreResult<User> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows.get(id).cloned().ok_or(StoreError::NotFound)
    }

    fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        if rows.contains_key(&user.id) {
            return Err(StoreError::Conflict);
        }
        let created = User {
            id: user.id,
            hash_pwd: user.hash_pwd,
            email: user.email,
            user_role: user.user_role,
            is_active: true,
            joined_at: Utc::now().naive_utc(),
            last_login_at: None,
        };
        rows.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    fn touch_last_login(&self, id: &str, at: NaiveDateTime) -> StoreResult<()> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let user = rows.get_mut(id).ok_or(StoreError::NotFound)?;
        user.last_login_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_school(name: &str, author: &str) -> NewSchool {
        NewSchool {
            school_name: name.to_owned(),
            grade: "10".to_owned(),
            start_time: NaiveDate::from_ymd_opt(2021, 6, 1)
                .and_then(|d| d.and_hms_opt(8, 30, 0))
                .unwrap(),
            number_classes: 7,
            author_id: author.to_owned(),
        }
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = MemorySchoolStore::new();
        let first = store.create(new_school("A", "u")).unwrap();
        store.delete(first.id).unwrap();
        let second = store.create(new_school("B", "u")).unwrap();
        assert_ne!(first.id, second.id);
        assert!(matches!(store.get(first.id), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_update_keeps_id_and_author() {
        let store = MemorySchoolStore::new();
        let school = store.create(new_school("A", "u")).unwrap();
        let changes = SchoolChanges {
            school_name: "B".to_owned(),
            grade: "11".to_owned(),
            start_time: school.start_time,
            number_classes: 3,
        };
        store.update(school.id, changes).unwrap();

        let updated = store.get(school.id).unwrap();
        assert_eq!(updated.id, school.id);
        assert_eq!(updated.author_id, "u");
        assert_eq!(updated.school_name, "B");
        assert_eq!(updated.grade, "11");
        assert_eq!(updated.number_classes, 3);
    }

    #[test]
    fn test_missing_rows_report_not_found() {
        let store = MemorySchoolStore::new();
        assert!(matches!(store.get(1), Err(StoreError::NotFound)));
        assert!(matches!(store.delete(1), Err(StoreError::NotFound)));
        let changes = SchoolChanges {
            school_name: "B".to_owned(),
            grade: "11".to_owned(),
            start_time: Utc::now().naive_utc(),
            number_classes: 3,
        };
        assert!(matches!(store.update(1, changes), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_list_is_id_ordered() {
        let store = MemorySchoolStore::new();
        for name in ["C", "A", "B"] {
            store.create(new_school(name, "u")).unwrap();
        }
        let ids: Vec<i32> = store.all().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_user_is_a_conflict() {
        let store = MemoryUserStore::new();
        let user = NewUser {
            id: "alice".to_owned(),
            hash_pwd: "x".to_owned(),
            email: "alice@example.com".to_owned(),
            user_role: "USER".to_owned(),
        };
        store.create(user.clone()).unwrap();
        assert!(matches!(store.create(user), Err(StoreError::Conflict)));
    }
}
