//! Runs against a real database. Point `DATABASE_URL` at a scratch Postgres
//! instance and use `cargo test -- --ignored`.

use campus_db::connection::create_connection_pool;
use campus_db::models::school::{NewSchool, SchoolChanges};
use campus_db::models::user::NewUser;
use campus_db::run_migrations;
use campus_db::store::{PgSchoolStore, PgUserStore, SchoolStore, StoreError, UserStore};
use chrono::{NaiveDate, NaiveDateTime, Utc};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 6, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn new_school(name: &str, author: &str) -> NewSchool {
    NewSchool {
        school_name: name.to_owned(),
        grade: "10".to_owned(),
        start_time: at(8, 30),
        number_classes: 7,
        author_id: author.to_owned(),
    }
}

#[test]
#[ignore = "needs DATABASE_URL"]
fn school_store_round_trip_on_postgres() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
    let pool = create_connection_pool(&url).unwrap();
    run_migrations(&pool).unwrap();

    let author = format!("pg-store-{}", Utc::now().timestamp_micros());
    PgUserStore::new(pool.clone())
        .create(NewUser {
            id: author.clone(),
            hash_pwd: "x".to_owned(),
            email: format!("{}@example.com", author),
            user_role: "USER".to_owned(),
        })
        .unwrap();

    let store = PgSchoolStore::new(pool);
    let first = store.create(new_school("Lincoln HS", &author)).unwrap();
    let second = store.create(new_school("Grant MS", &author)).unwrap();
    assert!(first.id < second.id);
    assert_eq!(store.get(first.id).unwrap(), first);

    let all = store.all().unwrap();
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    let ours: Vec<i32> = all
        .iter()
        .filter(|s| s.author_id == author)
        .map(|s| s.id)
        .collect();
    assert_eq!(ours, vec![first.id, second.id]);

    let changes = SchoolChanges {
        school_name: "Lincoln High".to_owned(),
        grade: "11".to_owned(),
        start_time: at(9, 15),
        number_classes: 8,
    };
    store.update(first.id, changes).unwrap();
    let updated = store.get(first.id).unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.author_id, author);
    assert_eq!(updated.grade, "11");
    assert_eq!(updated.start_time, at(9, 15));

    store.delete(first.id).unwrap();
    store.delete(second.id).unwrap();
    assert!(matches!(store.get(first.id), Err(StoreError::NotFound)));
    assert!(matches!(store.delete(first.id), Err(StoreError::NotFound)));
    let changes = SchoolChanges {
        school_name: "Gone".to_owned(),
        grade: "K".to_owned(),
        start_time: at(7, 0),
        number_classes: 1,
    };
    assert!(matches!(store.update(first.id, changes), Err(StoreError::NotFound)));
}
