use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day selected by the user, always rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceDate(NaiveDate);

impl AttendanceDate {
    /// Parses a `YYYY-MM-DD` string. Missing or blank input is rejected too.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        let raw = raw.unwrap_or_default();
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Self)
            .map_err(|_| AppError::InvalidDate(raw.to_string()))
    }

    /// Zero padded form used for the query and the export file name.
    pub fn normalized(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttendanceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Display projection of an attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, sqlx::FromRow)]
pub struct AttendanceEntry {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "09:00:00")]
    pub time: String,
}

/// Export projection of an attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, sqlx::FromRow)]
pub struct AttendanceRecord {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "09:00:00")]
    pub time: String,
    #[schema(example = "2024-01-01")]
    pub date: String,
}

/// Result of a date lookup. An empty day is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAttendance<T> {
    Found(Vec<T>),
    NoData,
}

impl<T> From<Vec<T>> for DayAttendance<T> {
    fn from(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            DayAttendance::NoData
        } else {
            DayAttendance::Found(rows)
        }
    }
}
