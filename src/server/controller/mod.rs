pub mod admin;
pub mod home;
pub mod student;
pub mod teacher;
