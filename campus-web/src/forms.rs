//! Form binding and validation for the HTML pages.
//!
//! Forms hold the raw submitted strings so an invalid submission can be shown
//! back to the user unchanged, with the per-field errors collected in
//! `errors`.

use std::collections::BTreeMap;

use campus_db::models::school::{NewSchool, School, SchoolChanges};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Deserialize;

pub const GRADES: [&str; 14] = [
    "PK", "K", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];

const MAX_NAME_LEN: usize = 100;

pub type FieldErrors = BTreeMap<&'static str, &'static str>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolForm {
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub number_classes: String,
    #[serde(skip)]
    pub errors: FieldErrors,
}

/// A validated school submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolInput {
    pub school_name: String,
    pub grade: String,
    pub start_time: NaiveTime,
    pub number_classes: i32,
}

impl SchoolForm {
    /// Pre-populates the edit form from a stored record.
    pub fn from_school(school: &School) -> Self {
        let time = school.start_time.time();
        let start_time = if time.second() == 0 {
            time.format("%H:%M")
        } else {
            time.format("%H:%M:%S")
        };

        SchoolForm {
            school_name: school.school_name.clone(),
            grade: school.grade.clone(),
            start_time: start_time.to_string(),
            number_classes: school.number_classes.to_string(),
            errors: FieldErrors::new(),
        }
    }

    /// Checks every field, replacing any previous errors. Returns the typed
    /// input only when no field failed.
    pub fn validate(&mut self) -> Option<SchoolInput> {
        self.errors.clear();

        let school_name = self.school_name.trim();
        if school_name.is_empty() {
            self.errors.insert("school_name", "This field is required.");
        } else if school_name.chars().count() > MAX_NAME_LEN {
            self.errors
                .insert("school_name", "Field cannot be longer than 100 characters.");
        }

        let grade = self.grade.trim();
        if !GRADES.contains(&grade) {
            self.errors.insert("grade", "Not a valid choice.");
        }

        let start_time = parse_time(self.start_time.trim());
        if start_time.is_none() {
            self.errors.insert("start_time", "Not a valid time value.");
        }

        let number_classes = match self.number_classes.trim().parse::<i32>() {
            Ok(n) if n < 0 => {
                self.errors
                    .insert("number_classes", "Number must be at least 0.");
                None
            }
            Ok(n) => Some(n),
            Err(_) => {
                self.errors
                    .insert("number_classes", "Not a valid integer value.");
                None
            }
        };

        if !self.errors.is_empty() {
            return None;
        }
        Some(SchoolInput {
            school_name: school_name.to_owned(),
            grade: grade.to_owned(),
            start_time: start_time?,
            number_classes: number_classes?,
        })
    }

    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

impl SchoolInput {
    /// The stored start time is the submitted time of day on `today`.
    pub fn into_new_school(self, author_id: String, today: NaiveDate) -> NewSchool {
        NewSchool {
            school_name: self.school_name,
            grade: self.grade,
            start_time: today.and_time(self.start_time),
            number_classes: self.number_classes,
            author_id,
        }
    }

    pub fn into_changes(self, today: NaiveDate) -> SchoolChanges {
        SchoolChanges {
            school_name: self.school_name,
            grade: self.grade,
            start_time: today.and_time(self.start_time),
            number_classes: self.number_classes,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(skip)]
    pub errors: FieldErrors,
}

impl SignUpForm {
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        self.id = self.id.trim().to_owned();
        self.email = self.email.trim().to_owned();

        if self.id.is_empty() {
            self.errors.insert("id", "This field is required.");
        }
        if !self.email.contains('@') {
            self.errors.insert("email", "Invalid email address.");
        }
        if self.password.is_empty() {
            self.errors.insert("password", "This field is required.");
        }
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }
}
