pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_user_table;
mod m20250301_000002_create_teacher_profile_table;
mod m20250301_000003_create_student_profile_table;
mod m20250301_000004_create_availability_table;
mod m20250301_000005_create_lesson_table;
mod m20250308_000006_create_scheduling_indices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_user_table::Migration),
            Box::new(m20250301_000002_create_teacher_profile_table::Migration),
            Box::new(m20250301_000003_create_student_profile_table::Migration),
            Box::new(m20250301_000004_create_availability_table::Migration),
            Box::new(m20250301_000005_create_lesson_table::Migration),
            Box::new(m20250308_000006_create_scheduling_indices::Migration),
        ]
    }
}
