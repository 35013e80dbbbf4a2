//! Admin reporting.
//!
//! The aggregations are plain functions over loaded lessons so they can be tested without
//! a database; `ReportService` only loads the rows and hands them over.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Datelike;
use sea_orm::DatabaseConnection;

use crate::{
    model::lesson::LessonStatus,
    server::{
        data::{lesson::LessonRepository, student_profile::StudentProfileRepository},
        error::AppError,
        model::{
            lesson::{AdminLessonField, AdminLessonQuery, AdminLessonSort, Lesson, LessonDetails},
            report::{
                AdminDashboard, AdminLessons, InstrumentCount, QuarterlyRevenue, ReferralShare,
                Reports, RevenueBreakdown, RevenueDistribution, RevenueShare, UserMetrics,
            },
        },
        service::lesson::with_names,
    },
};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Revenue and lesson count of non-cancelled lessons per calendar quarter, oldest first.
pub fn quarterly_revenue(lessons: &[Lesson]) -> Vec<QuarterlyRevenue> {
    let mut quarters: BTreeMap<(i32, u32), (f64, u64)> = BTreeMap::new();

    for lesson in lessons
        .iter()
        .filter(|l| l.status != LessonStatus::Cancelled)
    {
        let key = (lesson.start_time.year(), lesson.start_time.month0() / 3 + 1);
        let entry = quarters.entry(key).or_default();
        entry.0 += lesson.price;
        entry.1 += 1;
    }

    quarters
        .into_iter()
        .map(|((year, quarter), (revenue, lesson_count))| QuarterlyRevenue {
            year,
            quarter,
            revenue: round2(revenue),
            lesson_count,
        })
        .collect()
}

/// Lesson count per instrument, most booked first. Ties are ordered by name.
pub fn popular_instruments(lessons: &[Lesson]) -> Vec<InstrumentCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for lesson in lessons {
        *counts.entry(lesson.instrument.as_str()).or_default() += 1;
    }

    let mut result: Vec<InstrumentCount> = counts
        .into_iter()
        .map(|(instrument, count)| InstrumentCount {
            instrument: instrument.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.instrument.cmp(&b.instrument)));
    result
}

/// Share of student profiles per referral source, largest first.
pub fn referral_breakdown(sources: &[String]) -> Vec<ReferralShare> {
    let total = sources.len();
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for source in sources {
        *counts.entry(source.as_str()).or_default() += 1;
    }

    let mut result: Vec<ReferralShare> = counts
        .into_iter()
        .map(|(source, count)| ReferralShare {
            source: source.to_string(),
            count,
            percentage: round2(count as f64 * 100.0 / total as f64),
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    result
}

pub fn user_metrics(lessons: &[Lesson]) -> UserMetrics {
    let teachers: BTreeSet<i32> = lessons.iter().map(|l| l.teacher_id).collect();
    let students: BTreeSet<i32> = lessons.iter().map(|l| l.student_id).collect();

    UserMetrics {
        teachers: teachers.len() as u64,
        students: students.len() as u64,
    }
}

/// Percentage of booking students with more than one lesson; 0 without bookings.
pub fn repeat_booking_rate(lessons: &[Lesson]) -> f64 {
    let mut per_student: HashMap<i32, u32> = HashMap::new();
    for lesson in lessons {
        *per_student.entry(lesson.student_id).or_default() += 1;
    }

    if per_student.is_empty() {
        return 0.0;
    }

    let repeat = per_student.values().filter(|&&count| count > 1).count();
    round2(repeat as f64 * 100.0 / per_student.len() as f64)
}

/// Ranks revenue shares and finds the shortest prefix reaching half of `total`.
///
/// Ranking is by revenue descending, then name. With zero total the cutoff is empty.
pub fn revenue_breakdown(mut shares: Vec<RevenueShare>, total: f64) -> RevenueBreakdown {
    shares.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut cutoff_count = 0;
    if total > 0.0 {
        let mut running = 0.0;
        for share in &shares {
            running += share.revenue;
            cutoff_count += 1;
            if running >= total * 0.5 {
                break;
            }
        }
    }

    RevenueBreakdown {
        ranking: shares,
        cutoff_count,
    }
}

/// Revenue of non-cancelled lessons per instrument and per student.
pub fn revenue_distribution(lessons: &[LessonDetails]) -> RevenueDistribution {
    let active: Vec<&LessonDetails> = lessons
        .iter()
        .filter(|d| d.lesson.status != LessonStatus::Cancelled)
        .collect();
    let total: f64 = active.iter().map(|d| d.lesson.price).sum();

    let mut by_instrument: HashMap<&str, f64> = HashMap::new();
    let mut by_student: HashMap<i32, (&str, f64)> = HashMap::new();
    for details in &active {
        *by_instrument
            .entry(details.lesson.instrument.as_str())
            .or_default() += details.lesson.price;
        by_student
            .entry(details.lesson.student_id)
            .or_insert((details.student_name.as_str(), 0.0))
            .1 += details.lesson.price;
    }

    let instruments = by_instrument
        .into_iter()
        .map(|(name, revenue)| RevenueShare {
            name: name.to_string(),
            revenue: round2(revenue),
        })
        .collect();
    let students = by_student
        .into_values()
        .map(|(name, revenue)| RevenueShare {
            name: name.to_string(),
            revenue: round2(revenue),
        })
        .collect();

    RevenueDistribution {
        total_revenue: round2(total),
        instruments: revenue_breakdown(instruments, total),
        students: revenue_breakdown(students, total),
    }
}

/// Filters and sorts the admin lesson overview.
///
/// Filtering matches a case-insensitive substring of the chosen column. The name lists
/// are taken from the filtered lessons, distinct and sorted.
pub fn admin_lessons(lessons: Vec<LessonDetails>, query: AdminLessonQuery) -> AdminLessons {
    let mut lessons: Vec<LessonDetails> = match &query.filter {
        Some((field, value)) => {
            let needle = value.to_lowercase();
            lessons
                .into_iter()
                .filter(|d| {
                    let haystack = match field {
                        AdminLessonField::Teacher => &d.teacher_name,
                        AdminLessonField::Student => &d.student_name,
                        AdminLessonField::Instrument => &d.lesson.instrument,
                    };
                    haystack.to_lowercase().contains(&needle)
                })
                .collect()
        }
        None => lessons,
    };

    match query.sort {
        AdminLessonSort::Date => lessons.sort_by_key(|d| d.lesson.start_time),
        AdminLessonSort::DateDesc => {
            lessons.sort_by_key(|d| std::cmp::Reverse(d.lesson.start_time))
        }
        AdminLessonSort::Teacher => lessons.sort_by(|a, b| {
            a.teacher_name
                .cmp(&b.teacher_name)
                .then(a.lesson.start_time.cmp(&b.lesson.start_time))
        }),
        AdminLessonSort::Student => lessons.sort_by(|a, b| {
            a.student_name
                .cmp(&b.student_name)
                .then(a.lesson.start_time.cmp(&b.lesson.start_time))
        }),
        AdminLessonSort::Instrument => lessons.sort_by(|a, b| {
            a.lesson
                .instrument
                .cmp(&b.lesson.instrument)
                .then(a.lesson.start_time.cmp(&b.lesson.start_time))
        }),
    }

    let distinct = |f: fn(&LessonDetails) -> &str| -> Vec<String> {
        lessons
            .iter()
            .map(f)
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };
    let teachers = distinct(|d| d.teacher_name.as_str());
    let students = distinct(|d| d.student_name.as_str());
    let instruments = distinct(|d| d.lesson.instrument.as_str());

    AdminLessons {
        lessons,
        teachers,
        students,
        instruments,
        query,
    }
}

pub struct ReportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn lessons(&self) -> Result<Vec<Lesson>, AppError> {
        LessonRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(Lesson::from_entity)
            .collect()
    }

    async fn lesson_details(&self) -> Result<Vec<LessonDetails>, AppError> {
        let lessons = LessonRepository::new(self.db).get_all().await?;
        with_names(self.db, lessons).await
    }

    async fn referral_sources(&self) -> Result<Vec<String>, AppError> {
        Ok(StudentProfileRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|profile| profile.referral_source)
            .collect())
    }

    pub async fn dashboard(&self) -> Result<AdminDashboard, AppError> {
        let lessons = self.lessons().await?;

        Ok(AdminDashboard {
            total_lessons: lessons.len() as u64,
            user_metrics: user_metrics(&lessons),
            quarterly_revenue: quarterly_revenue(&lessons),
            popular_instruments: popular_instruments(&lessons),
        })
    }

    pub async fn reports(&self) -> Result<Reports, AppError> {
        let lessons = self.lessons().await?;
        let sources = self.referral_sources().await?;

        Ok(Reports {
            quarterly_revenue: quarterly_revenue(&lessons),
            referral_breakdown: referral_breakdown(&sources),
            popular_instruments: popular_instruments(&lessons),
            user_metrics: user_metrics(&lessons),
            repeat_booking_rate: repeat_booking_rate(&lessons),
        })
    }

    pub async fn user_metrics(&self) -> Result<UserMetrics, AppError> {
        Ok(user_metrics(&self.lessons().await?))
    }

    pub async fn repeat_booking_rate(&self) -> Result<f64, AppError> {
        Ok(repeat_booking_rate(&self.lessons().await?))
    }

    pub async fn revenue_distribution(&self) -> Result<RevenueDistribution, AppError> {
        Ok(revenue_distribution(&self.lesson_details().await?))
    }

    pub async fn admin_lessons(&self, query: AdminLessonQuery) -> Result<AdminLessons, AppError> {
        Ok(admin_lessons(self.lesson_details().await?, query))
    }
}
