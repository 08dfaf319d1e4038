use crate::types::{AggregateRecord, AlertRecord, Status};

/// Daily productive cases needed to meet target.
pub const TARGET_CASES: u64 = 20;
/// Below this a day is flagged as underperforming.
pub const WARNING_CASES: u64 = 15;

pub fn classify(total_cases: u64) -> Status {
    match total_cases {
        TARGET_CASES.. => Status::MeetsTarget,
        WARNING_CASES..TARGET_CASES => Status::SlightlyBelow,
        0..WARNING_CASES => Status::BelowTarget,
    }
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::MeetsTarget => "Meets target",
            Status::SlightlyBelow => "Slightly below target",
            Status::BelowTarget => "Below target",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Status::MeetsTarget => "Good performance. Stay consistent.",
            Status::SlightlyBelow => "Slightly under target. Monitor workload or distractions.",
            Status::BelowTarget => "Underperforming. Review task distribution or support needs.",
        }
    }
}

pub fn alert(record: AggregateRecord) -> AlertRecord {
    let status = classify(record.total_cases);
    AlertRecord {
        key: record.key,
        total_cases: record.total_cases,
        status,
        recommendation: status.recommendation(),
    }
}
