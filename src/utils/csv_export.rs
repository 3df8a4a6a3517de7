use crate::error::{AppError, AppResult};
use crate::model::attendance::{AttendanceDate, AttendanceRecord};
use csv::{Terminator, WriterBuilder};

pub const CSV_HEADER: [&str; 3] = ["name", "time", "date"];

/// Serializes rows as CSV with a `name,time,date` header and CRLF line ends.
pub fn to_csv(rows: &[AttendanceRecord]) -> AppResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record([&row.name, &row.time, &row.date])?;
    }

    wtr.into_inner().map_err(|e| AppError::Io(e.into_error()))
}

/// `attendance_<YYYY-MM-DD>.csv`
pub fn export_file_name(date: &AttendanceDate) -> String {
    format!("attendance_{}.csv", date.normalized())
}
