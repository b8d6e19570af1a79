pub mod school;
pub mod user;
