use crate::model::attendance::{AttendanceEntry, AttendanceRecord};
use crate::model::face_status::FaceStatus;
use crate::models::DateSelection;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Face Attendance",
        version = "0.1.0",
        description = r#"
## Face Attendance front-end

Small web front-end around the face registration and recognition programs.

- **Registration**: opens the camera window that saves face images per person
- **Recognition**: builds the feature file when missing, then starts the recognizer
- **Attendance**: lists the rows the recognizer wrote for a given day
- **Export**: downloads a day as `attendance_<date>.csv`

Launch results are shown once on the next page load.
"#,
    ),
    paths(
        crate::api::index::index,
        crate::api::index::status,

        crate::api::attendance::attendance,
        crate::api::attendance::export,

        crate::api::launch::start_register,
        crate::api::launch::start_attendance
    ),
    components(
        schemas(
            FaceStatus,
            DateSelection,
            AttendanceEntry,
            AttendanceRecord
        )
    ),
    tags(
        (name = "Pages", description = "Index page and status"),
        (name = "Attendance", description = "Attendance lookup and CSV export"),
        (name = "Launch", description = "External registration and recognizer programs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/status",
            "/attendance",
            "/export",
            "/start_register",
            "/start_attendance",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
