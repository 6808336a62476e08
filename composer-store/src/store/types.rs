use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Planned,
    Success,
    PartialOrFailed,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Planned => "planned",
            RecordStatus::Success => "success",
            RecordStatus::PartialOrFailed => "partial_or_failed",
        }
    }

    pub fn from_success(success: bool) -> Self {
        if success {
            RecordStatus::Success
        } else {
            RecordStatus::PartialOrFailed
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRunRecord {
    pub goal: String,
    pub plan_summary: String,
    pub apis_used: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize)]
pub struct RunRecord {
    pub id: i64,
    pub goal: String,
    pub plan_summary: String,
    pub apis_used: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
