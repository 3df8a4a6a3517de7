pub mod attendance;
pub mod face_status;
