use dotenvy::dotenv;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub log_dir: String,

    /// Working directory of the launched programs
    pub work_dir: PathBuf,
    pub faces_dir: PathBuf,
    pub features_file: PathBuf,

    // External programs
    pub interpreter: PathBuf,
    pub register_script: PathBuf,
    pub extract_script: PathBuf,
    pub recognize_script: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let work_dir = env::var("WORK_DIR")
            .map(PathBuf::from)
            .or_else(|_| env::current_dir())
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:5050".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| default_database_url(&work_dir)),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            faces_dir: path_var(&work_dir, "FACES_DIR", "data/data_faces_from_camera"),
            features_file: path_var(&work_dir, "FEATURES_FILE", "data/features_all.csv"),

            interpreter: env::var("PYTHON_EXECUTABLE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("python3")),
            register_script: path_var(
                &work_dir,
                "REGISTER_SCRIPT",
                "get_faces_from_camera_tkinter.py",
            ),
            extract_script: path_var(&work_dir, "EXTRACT_SCRIPT", "features_extraction_to_csv.py"),
            recognize_script: path_var(&work_dir, "RECOGNIZE_SCRIPT", "attendance_taker.py"),

            work_dir,
        }
    }

    /// Config rooted at `work_dir` with every path at its default location.
    #[cfg(test)]
    pub fn rooted_at(work_dir: &Path) -> Self {
        Self {
            server_addr: "127.0.0.1:5050".to_string(),
            database_url: default_database_url(work_dir),
            log_dir: work_dir.join("logs").display().to_string(),
            work_dir: work_dir.to_path_buf(),
            faces_dir: work_dir.join("data").join("data_faces_from_camera"),
            features_file: work_dir.join("data").join("features_all.csv"),
            interpreter: PathBuf::from("python3"),
            register_script: work_dir.join("get_faces_from_camera_tkinter.py"),
            extract_script: work_dir.join("features_extraction_to_csv.py"),
            recognize_script: work_dir.join("attendance_taker.py"),
        }
    }
}

/// The recognizer runs in `work_dir` and writes `attendance.db` there.
fn default_database_url(work_dir: &Path) -> String {
    format!("sqlite://{}", work_dir.join("attendance.db").display())
}

/// Reads a path variable, resolving relative values against `work_dir`.
fn path_var(work_dir: &Path, key: &str, default: &str) -> PathBuf {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        work_dir.join(path)
    }
}
