use crate::utils::flash;
use crate::utils::launcher::{Launcher, Started, recognizer_notice, registration_notice};
use actix_web::{HttpResponse, web};
use tracing::info;

/// Open the face registration window
#[utoipa::path(
    post,
    path = "/start_register",
    responses(
        (status = 302, description = "Back to the index with a launch notice")
    ),
    tag = "Launch"
)]
pub async fn start_register(launcher: web::Data<Launcher>) -> actix_web::Result<HttpResponse> {
    let launcher = launcher.into_inner();
    let outcome = web::block(move || launcher.launch_registration()).await?;

    if outcome.is_ok() {
        info!("Face registration launched");
    }
    Ok(flash::redirect_with("/", &registration_notice(&outcome)))
}

/// Start the attendance recognizer, extracting features first if needed
#[utoipa::path(
    post,
    path = "/start_attendance",
    responses(
        (status = 302, description = "Back to the index with a launch notice")
    ),
    tag = "Launch"
)]
pub async fn start_attendance(launcher: web::Data<Launcher>) -> actix_web::Result<HttpResponse> {
    let launcher = launcher.into_inner();
    // blocks this request while extraction runs
    let outcome = web::block(move || launcher.launch_attendance_recognizer()).await?;

    if let Ok(Started::Recognizer { extracted_features }) = &outcome {
        info!(extracted_features, "Attendance recognizer launched");
    }
    Ok(flash::redirect_with("/", &recognizer_notice(&outcome)))
}
