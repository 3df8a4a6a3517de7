use crate::api::index::{probe_status, render_index};
use crate::db::AttendanceStore;
use crate::model::attendance::AttendanceDate;
use crate::models::DateSelection;
use crate::utils::csv_export::{export_file_name, to_csv};
use crate::utils::face_status::FaceStatusProbe;
use crate::utils::flash::{self, Flash};
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, error::ErrorInternalServerError, web};
use tracing::{debug, error, info};

/// Show attendance for one day
#[utoipa::path(
    post,
    path = "/attendance",
    request_body(content = DateSelection, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Index page with the day's rows or a no-data notice", body = String, content_type = "text/html"),
        (status = 302, description = "Date missing or not YYYY-MM-DD, back to the index"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn attendance(
    store: web::Data<AttendanceStore>,
    probe: web::Data<FaceStatusProbe>,
    flash: Flash,
    form: web::Form<DateSelection>,
) -> actix_web::Result<HttpResponse> {
    let raw = form.selected_date.as_deref();
    let date = match AttendanceDate::parse(raw) {
        Ok(d) => d,
        Err(e) => {
            debug!(error = %e, "Rejected attendance query");
            return Ok(flash::redirect("/"));
        }
    };

    let rows = store.entries_for(&date).await.map_err(|e| {
        error!(error = %e, date = %date, "Attendance query failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let status = probe_status(&probe).await?;
    Ok(render_index(&status, &flash, raw.unwrap_or_default(), Some(&rows)))
}

/// Download one day as CSV
#[utoipa::path(
    get,
    path = "/export",
    params(DateSelection),
    responses(
        (status = 200, description = "CSV attachment named attendance_<date>.csv", body = String, content_type = "text/csv"),
        (status = 302, description = "Date missing or not YYYY-MM-DD, back to the index"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn export(
    store: web::Data<AttendanceStore>,
    query: web::Query<DateSelection>,
) -> actix_web::Result<HttpResponse> {
    let date = match AttendanceDate::parse(query.selected_date.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            debug!(error = %e, "Rejected export");
            return Ok(flash::redirect("/"));
        }
    };

    let rows = store.records_for(&date).await.map_err(|e| {
        error!(error = %e, date = %date, "Export query failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let body = to_csv(&rows).map_err(|e| {
        error!(error = %e, date = %date, "CSV serialization failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    info!(date = %date, rows = rows.len(), "Exported attendance");

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/csv"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export_file_name(&date))],
        })
        .body(body))
}
