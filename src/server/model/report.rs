//! Aggregated reporting models for the admin area.

use crate::{
    model::report::{
        AdminDashboardDto, AdminLessonFiltersDto, AdminLessonsDto, InstrumentCountDto,
        QuarterlyRevenueDto, ReferralBreakdownDto, ReportsDto, RevenueBreakdownDto,
        RevenueDistributionDto, RevenueShareDto, UserMetricsDto,
    },
    server::model::lesson::{AdminLessonQuery, LessonDetails},
};

#[derive(Debug, Clone, PartialEq)]
pub struct QuarterlyRevenue {
    pub year: i32,
    /// 1 to 4
    pub quarter: u32,
    pub revenue: f64,
    pub lesson_count: u64,
}

impl QuarterlyRevenue {
    pub fn label(&self) -> String {
        format!("{} Q{}", self.year, self.quarter)
    }

    pub fn into_dto(self) -> QuarterlyRevenueDto {
        QuarterlyRevenueDto {
            quarter: self.label(),
            revenue: self.revenue,
            lesson_count: self.lesson_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentCount {
    pub instrument: String,
    pub count: u64,
}

impl InstrumentCount {
    pub fn into_dto(self) -> InstrumentCountDto {
        InstrumentCountDto {
            instrument: self.instrument,
            count: self.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferralShare {
    pub source: String,
    pub count: u64,
    pub percentage: f64,
}

impl ReferralShare {
    pub fn into_dto(self) -> ReferralBreakdownDto {
        ReferralBreakdownDto {
            source: self.source,
            count: self.count,
            percentage: self.percentage,
        }
    }
}

/// Distinct teachers and students that appear in at least one lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserMetrics {
    pub teachers: u64,
    pub students: u64,
}

impl UserMetrics {
    pub fn into_dto(self) -> UserMetricsDto {
        UserMetricsDto {
            total_teachers: self.teachers,
            total_students: self.students,
            total_users: self.teachers + self.students,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueShare {
    pub name: String,
    pub revenue: f64,
}

impl RevenueShare {
    fn into_dto(self) -> RevenueShareDto {
        RevenueShareDto {
            name: self.name,
            revenue: self.revenue,
        }
    }
}

/// Revenue ranking (descending) and the length of the prefix that reaches half of the
/// total.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevenueBreakdown {
    pub ranking: Vec<RevenueShare>,
    pub cutoff_count: usize,
}

impl RevenueBreakdown {
    pub fn top(&self) -> &[RevenueShare] {
        &self.ranking[..self.cutoff_count.min(self.ranking.len())]
    }

    pub fn top_revenue(&self) -> f64 {
        self.top().iter().map(|s| s.revenue).sum()
    }

    pub fn into_dto(self) -> RevenueBreakdownDto {
        let top_for_50_percent = self.top().iter().cloned().map(RevenueShare::into_dto).collect();
        let revenue_for_50_percent = self.top_revenue();

        RevenueBreakdownDto {
            count_for_50_percent: self.cutoff_count,
            revenue_for_50_percent,
            top_for_50_percent,
            ranking: self.ranking.into_iter().map(RevenueShare::into_dto).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevenueDistribution {
    pub total_revenue: f64,
    pub instruments: RevenueBreakdown,
    pub students: RevenueBreakdown,
}

impl RevenueDistribution {
    pub fn into_dto(self) -> RevenueDistributionDto {
        RevenueDistributionDto {
            total_revenue: self.total_revenue,
            instruments: self.instruments.into_dto(),
            students: self.students.into_dto(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboard {
    pub total_lessons: u64,
    pub user_metrics: UserMetrics,
    pub quarterly_revenue: Vec<QuarterlyRevenue>,
    pub popular_instruments: Vec<InstrumentCount>,
}

impl AdminDashboard {
    pub fn into_dto(self) -> AdminDashboardDto {
        AdminDashboardDto {
            total_lessons: self.total_lessons,
            total_teachers: self.user_metrics.teachers,
            total_students: self.user_metrics.students,
            quarterly_revenue: self
                .quarterly_revenue
                .into_iter()
                .map(QuarterlyRevenue::into_dto)
                .collect(),
            popular_instruments: self
                .popular_instruments
                .into_iter()
                .map(InstrumentCount::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    pub quarterly_revenue: Vec<QuarterlyRevenue>,
    pub referral_breakdown: Vec<ReferralShare>,
    pub popular_instruments: Vec<InstrumentCount>,
    pub user_metrics: UserMetrics,
    pub repeat_booking_rate: f64,
}

impl Reports {
    pub fn into_dto(self) -> ReportsDto {
        ReportsDto {
            quarterly_revenue: self
                .quarterly_revenue
                .into_iter()
                .map(QuarterlyRevenue::into_dto)
                .collect(),
            referral_breakdown: self
                .referral_breakdown
                .into_iter()
                .map(ReferralShare::into_dto)
                .collect(),
            popular_instruments: self
                .popular_instruments
                .into_iter()
                .map(InstrumentCount::into_dto)
                .collect(),
            user_metrics: self.user_metrics.into_dto(),
            repeat_booking_rate: self.repeat_booking_rate,
        }
    }
}

/// Filtered and sorted admin lesson overview.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminLessons {
    pub lessons: Vec<LessonDetails>,
    pub teachers: Vec<String>,
    pub students: Vec<String>,
    pub instruments: Vec<String>,
    pub query: AdminLessonQuery,
}

impl AdminLessons {
    pub fn into_dto(self) -> AdminLessonsDto {
        let total_count = self.lessons.len();
        let (current_filter_by, current_filter_value) = match self.query.filter {
            Some((field, value)) => (Some(field.as_str().to_string()), Some(value)),
            None => (None, None),
        };

        AdminLessonsDto {
            lessons: self
                .lessons
                .into_iter()
                .map(LessonDetails::into_dto)
                .collect(),
            filters: AdminLessonFiltersDto {
                teachers: self.teachers,
                students: self.students,
                instruments: self.instruments,
            },
            current_sort: self.query.sort.as_str().to_string(),
            current_filter_by,
            current_filter_value,
            total_count,
        }
    }
}
