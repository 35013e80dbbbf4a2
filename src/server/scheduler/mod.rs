pub mod lesson_maintenance;
