mod availability;
mod lesson;
mod student_profile;
mod teacher_profile;
mod user;
