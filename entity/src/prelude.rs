pub use super::availability::Entity as Availability;
pub use super::lesson::Entity as Lesson;
pub use super::student_profile::Entity as StudentProfile;
pub use super::teacher_profile::Entity as TeacherProfile;
pub use super::user::Entity as User;
