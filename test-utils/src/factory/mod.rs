//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` shortcut for
//! the defaults. Factories never create their dependencies implicitly; use `helpers`
//! for a teacher or student with a profile attached.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let (teacher, _) = factory::helpers::create_teacher(&db).await?;
//! let (student, _) = factory::helpers::create_student(&db).await?;
//! let slot = factory::availability::create_availability(&db, teacher.id).await?;
//! let lesson = factory::lesson::create_lesson(&db, teacher.id, student.id).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let lesson = factory::lesson::LessonFactory::new(&db, teacher.id, student.id)
//!     .instrument("Violin")
//!     .price(45.0)
//!     .status("Cancelled")
//!     .build()
//!     .await?;
//! ```

pub mod availability;
pub mod helpers;
pub mod lesson;
pub mod student_profile;
pub mod teacher_profile;
pub mod user;

pub use availability::create_availability;
pub use lesson::create_lesson;
pub use student_profile::create_student_profile;
pub use teacher_profile::create_teacher_profile;
pub use user::create_user;
