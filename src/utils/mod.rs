pub mod csv_export;
pub mod face_status;
pub mod flash;
pub mod launcher;
