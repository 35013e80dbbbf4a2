use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::lesson::LessonDto;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct QuarterlyRevenueDto {
    /// `YYYY Qn`
    pub quarter: String,
    pub revenue: f64,
    pub lesson_count: u64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct InstrumentCountDto {
    pub instrument: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ReferralBreakdownDto {
    pub source: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct UserMetricsDto {
    pub total_teachers: u64,
    pub total_students: u64,
    pub total_users: u64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RepeatBookingRateDto {
    /// Percentage of booking students with more than one lesson.
    pub repeat_booking_rate: f64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct AdminDashboardDto {
    pub total_lessons: u64,
    pub total_teachers: u64,
    pub total_students: u64,
    pub quarterly_revenue: Vec<QuarterlyRevenueDto>,
    pub popular_instruments: Vec<InstrumentCountDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ReportsDto {
    pub quarterly_revenue: Vec<QuarterlyRevenueDto>,
    pub referral_breakdown: Vec<ReferralBreakdownDto>,
    pub popular_instruments: Vec<InstrumentCountDto>,
    pub user_metrics: UserMetricsDto,
    pub repeat_booking_rate: f64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RevenueShareDto {
    pub name: String,
    pub revenue: f64,
}

/// Revenue ranking for one dimension plus its 50 % cutoff.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RevenueBreakdownDto {
    pub ranking: Vec<RevenueShareDto>,
    pub top_for_50_percent: Vec<RevenueShareDto>,
    pub count_for_50_percent: usize,
    pub revenue_for_50_percent: f64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RevenueDistributionDto {
    pub total_revenue: f64,
    pub instruments: RevenueBreakdownDto,
    pub students: RevenueBreakdownDto,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct AdminLessonFiltersDto {
    pub teachers: Vec<String>,
    pub students: Vec<String>,
    pub instruments: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct AdminLessonsDto {
    pub lessons: Vec<LessonDto>,
    pub filters: AdminLessonFiltersDto,
    pub current_sort: String,
    pub current_filter_by: Option<String>,
    pub current_filter_value: Option<String>,
    pub total_count: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Default)]
pub struct SeedResultDto {
    pub cleared: bool,
    pub teachers: usize,
    pub students: usize,
    pub availabilities: usize,
    pub lessons: usize,
}
