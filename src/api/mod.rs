pub mod attendance;
pub mod index;
pub mod launch;
