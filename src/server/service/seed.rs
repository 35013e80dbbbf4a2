//! Demo data generation for the admin area.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::{
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
    Rng, SeedableRng,
};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        auth::UserRole,
        lesson::{LessonMode, LessonStatus},
    },
    server::{
        data::{
            availability::AvailabilityRepository, lesson::LessonRepository,
            student_profile::StudentProfileRepository, teacher_profile::TeacherProfileRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            availability::CreateAvailabilityParams,
            lesson::CreateLessonParams,
            profile::{CreateStudentProfileParams, CreateTeacherProfileParams},
            seed::{SeedParams, SeedSummary},
            user::CreateUserParams,
        },
        service::auth::spawn_hash_password,
    },
};

const SEED_PASSWORD: &str = "password";
const SEED_EMAIL_DOMAIN: &str = "lessonboard.local";

const INSTRUMENTS: &[&str] = &["Piano", "Guitar", "Violin", "Drums", "Saxophone", "Flute"];
const REFERRAL_SOURCES: &[&str] = &["Social Media", "Friend", "Flyer", "Search", "Other"];
const FIRST_NAMES: &[&str] = &[
    "Ada", "Ben", "Clara", "Dmitri", "Elena", "Felix", "Grace", "Hugo", "Ines", "Jonas", "Kira",
    "Leo", "Maya", "Nils", "Olga", "Pablo", "Rosa", "Sami", "Tara", "Viktor",
];
const LAST_NAMES: &[&str] = &[
    "Bach", "Chopin", "Dvorak", "Elgar", "Faure", "Grieg", "Holst", "Ives", "Janacek", "Liszt",
    "Mahler", "Ravel", "Satie", "Verdi",
];
const LESSON_MINUTES: &[i32] = &[30, 45, 60, 90];

/// Lesson day offsets relative to today, so demo data has both history and bookings ahead.
const LESSON_DAY_RANGE: std::ops::Range<i64> = -120..60;
const FIRST_LESSON_HOUR: i64 = 9;
const LAST_LESSON_HOUR: i64 = 19;

struct PlannedTeacher {
    name: String,
    instruments: Vec<String>,
    custom_lesson_rate: Option<f64>,
    slots: Vec<(DateTime<Utc>, i32)>,
}

struct PlannedStudent {
    name: String,
    instrument_interest: String,
    referral_source: String,
}

struct PlannedLesson {
    teacher: usize,
    student: usize,
    instrument: String,
    start_time: DateTime<Utc>,
    duration: i32,
    mode: LessonMode,
    cancelled: bool,
}

struct SeedPlan {
    teachers: Vec<PlannedTeacher>,
    students: Vec<PlannedStudent>,
    lessons: Vec<PlannedLesson>,
}

fn random_name(rng: &mut StdRng) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
    format!("{} {}", first, last)
}

fn random_instrument(rng: &mut StdRng) -> String {
    INSTRUMENTS.choose(rng).copied().unwrap_or("Piano").to_string()
}

/// Draws every random value up front so no generator is held across database calls.
fn plan(params: &SeedParams, now: DateTime<Utc>) -> SeedPlan {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();

    let teachers: Vec<PlannedTeacher> = (0..params.teachers)
        .map(|_| {
            let instrument_count = rng.random_range(1..=2);
            let instruments: Vec<String> = INSTRUMENTS
                .choose_multiple(&mut rng, instrument_count)
                .map(|i| i.to_string())
                .collect();

            let custom_lesson_rate = if rng.random_bool(0.75) {
                Some(f64::from(rng.random_range(25..=45)))
            } else {
                None
            };

            let mut days: Vec<i64> = (1..=30).collect();
            let slot_count = rng.random_range(3..=5);
            let slots = days
                .partial_shuffle(&mut rng, slot_count)
                .0
                .iter()
                .map(|&day| {
                    let hour = rng.random_range(FIRST_LESSON_HOUR..=LAST_LESSON_HOUR);
                    let duration = LESSON_MINUTES.choose(&mut rng).copied().unwrap_or(60);
                    (today + Duration::days(day) + Duration::hours(hour), duration)
                })
                .collect();

            PlannedTeacher {
                name: random_name(&mut rng),
                instruments,
                custom_lesson_rate,
                slots,
            }
        })
        .collect();

    let students: Vec<PlannedStudent> = (0..params.students)
        .map(|_| PlannedStudent {
            name: random_name(&mut rng),
            instrument_interest: random_instrument(&mut rng),
            referral_source: REFERRAL_SOURCES
                .choose(&mut rng)
                .copied()
                .unwrap_or("Other")
                .to_string(),
        })
        .collect();

    let lesson_count = if teachers.is_empty() || students.is_empty() {
        0
    } else {
        params.lessons
    };
    let lessons = (0..lesson_count)
        .map(|_| {
            let teacher = rng.random_range(0..teachers.len());
            let day = rng.random_range(LESSON_DAY_RANGE);
            let hour = rng.random_range(FIRST_LESSON_HOUR..=LAST_LESSON_HOUR);

            PlannedLesson {
                teacher,
                student: rng.random_range(0..students.len()),
                instrument: teachers[teacher]
                    .instruments
                    .choose(&mut rng)
                    .cloned()
                    .unwrap_or_else(|| "Piano".to_string()),
                start_time: today + Duration::days(day) + Duration::hours(hour),
                duration: LESSON_MINUTES.choose(&mut rng).copied().unwrap_or(60),
                mode: if rng.random_bool(0.5) {
                    LessonMode::InPerson
                } else {
                    LessonMode::Virtual
                },
                cancelled: rng.random_bool(0.1),
            }
        })
        .collect();

    SeedPlan {
        teachers,
        students,
        lessons,
    }
}

pub struct SeedService<'a> {
    db: &'a DatabaseConnection,
    default_rate: f64,
}

impl<'a> SeedService<'a> {
    pub fn new(db: &'a DatabaseConnection, default_rate: f64) -> Self {
        Self { db, default_rate }
    }

    /// Clears or generates demo data in a single transaction.
    ///
    /// With `clear` set every lesson, slot, profile and non-admin user is deleted and
    /// nothing is generated. Otherwise teachers (with future slots), students and lessons
    /// are added next to the existing data. Lessons cost the teacher's effective rate.
    /// Past lessons are completed, future ones scheduled, and about one in ten is
    /// cancelled. All seeded accounts share the password `password`.
    pub async fn run(&self, params: SeedParams, now: DateTime<Utc>) -> Result<SeedSummary, AppError> {
        if params.clear {
            return self.clear().await;
        }

        let plan = plan(&params, now);
        let password_hash = spawn_hash_password(SEED_PASSWORD.to_string()).await?;

        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);
        let base = user_repo.count().await?;

        let mut summary = SeedSummary::default();
        let mut teacher_ids = Vec::with_capacity(plan.teachers.len());
        let mut teacher_rates = Vec::with_capacity(plan.teachers.len());

        for (i, teacher) in plan.teachers.into_iter().enumerate() {
            let user = user_repo
                .create(CreateUserParams {
                    role: UserRole::Teacher,
                    name: teacher.name,
                    email: format!("teacher{}@{}", base + i as u64 + 1, SEED_EMAIL_DOMAIN),
                    password_hash: password_hash.clone(),
                    contact_info: None,
                })
                .await?;

            TeacherProfileRepository::new(&txn)
                .create(CreateTeacherProfileParams {
                    user_id: user.id,
                    instruments: teacher.instruments,
                    bio: Some("Demo teacher".to_string()),
                    custom_lesson_rate: teacher.custom_lesson_rate,
                })
                .await?;

            for (start_time, duration) in teacher.slots {
                AvailabilityRepository::new(&txn)
                    .create(CreateAvailabilityParams {
                        teacher_id: user.id,
                        start_time,
                        duration,
                    })
                    .await?;
                summary.availabilities += 1;
            }

            teacher_ids.push(user.id);
            teacher_rates.push(teacher.custom_lesson_rate.unwrap_or(self.default_rate));
            summary.teachers += 1;
        }

        let student_base = base + teacher_ids.len() as u64;
        let mut student_ids = Vec::with_capacity(plan.students.len());

        for (i, student) in plan.students.into_iter().enumerate() {
            let user = user_repo
                .create(CreateUserParams {
                    role: UserRole::Student,
                    name: student.name,
                    email: format!("student{}@{}", student_base + i as u64 + 1, SEED_EMAIL_DOMAIN),
                    password_hash: password_hash.clone(),
                    contact_info: None,
                })
                .await?;

            StudentProfileRepository::new(&txn)
                .create(CreateStudentProfileParams {
                    user_id: user.id,
                    instrument_interest: student.instrument_interest,
                    referral_source: student.referral_source,
                })
                .await?;

            student_ids.push(user.id);
            summary.students += 1;
        }

        let lesson_repo = LessonRepository::new(&txn);
        for planned in plan.lessons {
            let lesson = lesson_repo
                .create(CreateLessonParams {
                    teacher_id: teacher_ids[planned.teacher],
                    student_id: student_ids[planned.student],
                    instrument: planned.instrument,
                    start_time: planned.start_time,
                    duration: planned.duration,
                    mode: planned.mode,
                    price: teacher_rates[planned.teacher],
                    recurring_series_id: None,
                    sheet_music_path: None,
                })
                .await?;

            let status = if planned.cancelled {
                Some(LessonStatus::Cancelled)
            } else if planned.start_time < now {
                Some(LessonStatus::Completed)
            } else {
                None
            };
            if let Some(status) = status {
                lesson_repo.update_status(lesson.id, status).await?;
            }

            summary.lessons += 1;
        }

        txn.commit().await?;

        tracing::info!(
            teachers = summary.teachers,
            students = summary.students,
            availabilities = summary.availabilities,
            lessons = summary.lessons,
            "Generated demo data"
        );

        Ok(summary)
    }

    async fn clear(&self) -> Result<SeedSummary, AppError> {
        let txn = self.db.begin().await?;

        let lessons = LessonRepository::new(&txn).delete_all().await?;
        let availabilities = AvailabilityRepository::new(&txn).delete_all().await?;
        TeacherProfileRepository::new(&txn).delete_all().await?;
        StudentProfileRepository::new(&txn).delete_all().await?;
        let users = UserRepository::new(&txn).delete_non_admins().await?;

        txn.commit().await?;

        tracing::info!(lessons, availabilities, users, "Cleared all non-admin data");

        Ok(SeedSummary {
            cleared: true,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(teachers: u32, students: u32, lessons: u32) -> SeedParams {
        SeedParams {
            teachers,
            students,
            lessons,
            clear: false,
        }
    }

    #[test]
    fn plan_respects_requested_counts() {
        let now = Utc::now();
        let plan = plan(&params(3, 7, 40), now);

        assert_eq!(plan.teachers.len(), 3);
        assert_eq!(plan.students.len(), 7);
        assert_eq!(plan.lessons.len(), 40);
        assert!(plan.lessons.iter().all(|l| l.teacher < 3 && l.student < 7));
    }

    #[test]
    fn teachers_get_three_to_five_future_slots() {
        let now = Utc::now();
        let plan = plan(&params(10, 0, 0), now);

        for teacher in &plan.teachers {
            assert!((3..=5).contains(&teacher.slots.len()));
            assert!(teacher.slots.iter().all(|(start, _)| *start > now));
            assert!(!teacher.instruments.is_empty());
        }
    }

    #[test]
    fn lessons_use_an_instrument_of_their_teacher() {
        let plan = plan(&params(4, 4, 50), Utc::now());

        for lesson in &plan.lessons {
            assert!(plan.teachers[lesson.teacher]
                .instruments
                .contains(&lesson.instrument));
        }
    }

    #[test]
    fn no_lessons_without_participants() {
        assert!(plan(&params(0, 5, 10), Utc::now()).lessons.is_empty());
    }

    mod database {
        use test_utils::{builder::TestBuilder, factory};

        use super::*;

        /// Tests generated data lands in the database with flat teacher pricing.
        ///
        /// Expected: requested counts, seeded accounts can log in
        #[tokio::test]
        async fn generates_demo_data() -> Result<(), AppError> {
            let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
            let db = test.database().await.unwrap();

            let summary = SeedService::new(db, 30.0)
                .run(params(2, 3, 12), Utc::now())
                .await?;

            assert_eq!(summary.teachers, 2);
            assert_eq!(summary.students, 3);
            assert_eq!(summary.lessons, 12);
            assert!(!summary.cleared);

            let teachers = TeacherProfileRepository::new(db).get_all().await?;
            let lessons = LessonRepository::new(db).get_all().await?;
            assert_eq!(lessons.len(), 12);
            for lesson in &lessons {
                let (profile, _) = teachers
                    .iter()
                    .find(|(profile, _)| profile.user_id == lesson.teacher_id)
                    .unwrap();
                assert_eq!(lesson.price, profile.custom_lesson_rate.unwrap_or(30.0));
            }

            crate::server::service::auth::AuthService::new(db)
                .login("teacher1@lessonboard.local", SEED_PASSWORD)
                .await?;

            Ok(())
        }

        /// Tests clearing keeps admins and removes everything else.
        ///
        /// Expected: only the admin user remains
        #[tokio::test]
        async fn clear_keeps_admins() -> Result<(), AppError> {
            let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
            let db = test.database().await.unwrap();

            let admin = factory::helpers::create_admin(db).await?;
            let (teacher, _) = factory::helpers::create_teacher(db).await?;
            let (student, _) = factory::helpers::create_student(db).await?;
            factory::create_availability(db, teacher.id).await?;
            factory::create_lesson(db, teacher.id, student.id).await?;

            let summary = SeedService::new(db, 30.0)
                .run(
                    SeedParams {
                        clear: true,
                        ..params(5, 5, 5)
                    },
                    Utc::now(),
                )
                .await?;

            assert!(summary.cleared);
            assert_eq!(summary.teachers, 0);

            let user_repo = UserRepository::new(db);
            assert_eq!(user_repo.count().await?, 1);
            assert!(user_repo.find_by_id(admin.id).await?.is_some());
            assert!(LessonRepository::new(db).get_all().await?.is_empty());

            Ok(())
        }
    }
}
