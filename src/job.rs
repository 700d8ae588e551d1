//! Job metadata: duration category, upgrade impact and schedule class
//!
//! Each label is a closed enum carrying its numeric parameters and its
//! sampling weight, so the generator never branches on strings.

use serde::{Deserialize, Serialize};

/// Base duration class of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Short,
    Medium,
    Long,
    VeryLong,
}

impl JobCategory {
    /// Sampling weights used when labelling a job catalog
    pub const WEIGHTS: [(JobCategory, f64); 4] = [
        (JobCategory::Short, 0.70),
        (JobCategory::Medium, 0.25),
        (JobCategory::Long, 0.04),
        (JobCategory::VeryLong, 0.01),
    ];

    /// Half-open base duration range `[lo, hi)` in seconds
    pub fn base_range_secs(self) -> (i64, i64) {
        match self {
            JobCategory::Short => (1, 120),
            JobCategory::Medium => (120, 900),
            JobCategory::Long => (900, 86_400),
            JobCategory::VeryLong => (86_400, 259_200),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobCategory::Short => "short",
            JobCategory::Medium => "medium",
            JobCategory::Long => "long",
            JobCategory::VeryLong => "very_long",
        }
    }
}

/// How an upgrade changes a job's duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeImpact {
    Improved,
    Regressed,
    Unchanged,
}

impl UpgradeImpact {
    pub const WEIGHTS: [(UpgradeImpact, f64); 3] = [
        (UpgradeImpact::Improved, 0.50),
        (UpgradeImpact::Regressed, 0.20),
        (UpgradeImpact::Unchanged, 0.30),
    ];

    /// Post-cutover multiplier range, `None` when durations are left untouched
    pub fn multiplier_range(self) -> Option<(f64, f64)> {
        match self {
            UpgradeImpact::Improved => Some((0.5, 0.9)),
            UpgradeImpact::Regressed => Some((1.1, 1.5)),
            UpgradeImpact::Unchanged => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpgradeImpact::Improved => "improved",
            UpgradeImpact::Regressed => "regressed",
            UpgradeImpact::Unchanged => "unchanged",
        }
    }
}

/// Submission cadence of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleClass {
    /// Every 15 minutes
    FixedInterval,
    Daily,
    Monthly,
    Unscheduled,
}

/// Request-time grid a scheduler submission snaps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleGrid {
    /// Floor to a multiple of this many seconds past midnight
    Interval(u32),
    /// Floor to midnight
    Day,
    /// Floor to midnight on the first of the month
    Month,
}

impl ScheduleClass {
    pub const WEIGHTS: [(ScheduleClass, f64); 4] = [
        (ScheduleClass::FixedInterval, 0.60),
        (ScheduleClass::Daily, 0.20),
        (ScheduleClass::Monthly, 0.05),
        (ScheduleClass::Unscheduled, 0.15),
    ];

    /// Longest legitimate run for this cadence, in seconds
    pub fn max_duration_secs(self) -> i64 {
        match self {
            ScheduleClass::FixedInterval => 900,
            ScheduleClass::Daily => 86_400,
            ScheduleClass::Monthly | ScheduleClass::Unscheduled => 259_200,
        }
    }

    /// Alignment grid for scheduler submissions; unscheduled jobs have none
    pub fn grid(self) -> Option<ScheduleGrid> {
        match self {
            ScheduleClass::FixedInterval => Some(ScheduleGrid::Interval(15 * 60)),
            ScheduleClass::Daily => Some(ScheduleGrid::Day),
            ScheduleClass::Monthly => Some(ScheduleGrid::Month),
            ScheduleClass::Unscheduled => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleClass::FixedInterval => "15min",
            ScheduleClass::Daily => "daily",
            ScheduleClass::Monthly => "monthly",
            ScheduleClass::Unscheduled => "unscheduled",
        }
    }
}

/// Fixed labels of one job, assigned once per simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetadata {
    pub name: String,
    pub category: JobCategory,
    pub impact: UpgradeImpact,
    pub schedule: ScheduleClass,
}
