use crate::model::attendance::{AttendanceEntry, DayAttendance};
use crate::model::face_status::FaceStatus;
use crate::utils::face_status::FaceStatusProbe;
use crate::utils::flash::Flash;
use crate::view::IndexView;
use actix_web::{HttpResponse, error::ErrorInternalServerError, web};
use tracing::error;

/// Index page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Status page", body = String, content_type = "text/html"),
        (status = 500, description = "Faces directory could not be read")
    ),
    tag = "Pages"
)]
pub async fn index(
    probe: web::Data<FaceStatusProbe>,
    flash: Flash,
) -> actix_web::Result<HttpResponse> {
    let status = probe_status(&probe).await?;
    Ok(render_index(&status, &flash, "", None))
}

/// Face data status as JSON
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Current face data status", body = FaceStatus),
        (status = 500, description = "Faces directory could not be read")
    ),
    tag = "Pages"
)]
pub async fn status(probe: web::Data<FaceStatusProbe>) -> actix_web::Result<HttpResponse> {
    let status = probe_status(&probe).await?;
    Ok(HttpResponse::Ok().json(status))
}

pub(crate) async fn probe_status(
    probe: &web::Data<FaceStatusProbe>,
) -> actix_web::Result<FaceStatus> {
    let probe = probe.clone();
    web::block(move || probe.probe()).await?.map_err(|e| {
        error!(error = %e, "Failed to inspect face data");
        ErrorInternalServerError("Internal Server Error")
    })
}

/// Renders the index page and clears a shown notification.
pub(crate) fn render_index(
    status: &FaceStatus,
    flash: &Flash,
    selected_date: &str,
    attendance: Option<&DayAttendance<AttendanceEntry>>,
) -> HttpResponse {
    let html = IndexView {
        status,
        notice: flash.message(),
        selected_date,
        attendance,
    }
    .render();

    let mut builder = HttpResponse::Ok();
    flash.consume(&mut builder);
    builder.content_type("text/html; charset=utf-8").body(html)
}
