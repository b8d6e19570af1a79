diesel::table! {
    schools (id) {
        id -> Int4,
        school_name -> Varchar,
        grade -> Varchar,
        start_time -> Timestamp,
        number_classes -> Int4,
        author_id -> Varchar,
    }
}

diesel::table! {
    users (id) {
        id -> Varchar,
        hash_pwd -> Varchar,
        email -> Text,
        user_role -> Varchar,
        is_active -> Bool,
        joined_at -> Timestamp,
        last_login_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(schools -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(schools, users);
