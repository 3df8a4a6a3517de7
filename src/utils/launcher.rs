//! Starts the external face registration, feature extraction and recognizer
//! programs.
//!
//! Registration and recognition are desktop windows driven by the user, so they
//! are started detached: the request returns as soon as the process exists and
//! nothing reports back on whether it is still alive. Feature extraction is the
//! one step that runs to completion, because the recognizer needs its output.

use crate::config::Config;
use crate::error::LaunchError;
use crate::utils::face_status::FaceStatusProbe;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An interpreter plus the script it should run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub interpreter: PathBuf,
    pub script: PathBuf,
    pub work_dir: PathBuf,
}

impl Program {
    /// Short name for messages and logs.
    pub fn name(&self) -> String {
        self.script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.script.display().to_string())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.script).current_dir(&self.work_dir);
        cmd
    }
}

/// How programs reach the operating system.
pub trait ProcessRunner: Send + Sync {
    /// Starts `program` and returns without waiting for it.
    fn spawn_detached(&self, program: &Program) -> Result<(), LaunchError>;

    /// Runs `program` and waits; a non-zero exit is an error.
    fn run_to_completion(&self, program: &Program) -> Result<(), LaunchError>;
}

/// `std::process` backed runner.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandRunner;

impl ProcessRunner for CommandRunner {
    fn spawn_detached(&self, program: &Program) -> Result<(), LaunchError> {
        let name = program.name();
        let mut child = program
            .command()
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: name.clone(),
                source,
            })?;

        info!(program = %name, pid = child.id(), "Started detached program");

        // only reaps the child so it does not linger as a zombie
        std::thread::spawn(move || match child.wait() {
            Ok(status) => debug!(program = %name, %status, "Detached program exited"),
            Err(e) => debug!(program = %name, error = %e, "Could not wait for detached program"),
        });

        Ok(())
    }

    fn run_to_completion(&self, program: &Program) -> Result<(), LaunchError> {
        let name = program.name();
        let status = program
            .command()
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: name.clone(),
                source,
            })?;

        if status.success() {
            info!(program = %name, "Program finished");
            Ok(())
        } else {
            Err(LaunchError::Failed {
                program: name,
                status: status.to_string(),
            })
        }
    }
}

/// What a successful launch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Started {
    Registration,
    Recognizer { extracted_features: bool },
}

#[derive(Clone)]
pub struct Launcher {
    probe: FaceStatusProbe,
    register: Program,
    extract: Program,
    recognize: Program,
    runner: Arc<dyn ProcessRunner>,
}

impl Launcher {
    pub fn new(config: &Config, probe: FaceStatusProbe, runner: Arc<dyn ProcessRunner>) -> Self {
        let program = |script: &PathBuf| Program {
            interpreter: config.interpreter.clone(),
            script: script.clone(),
            work_dir: config.work_dir.clone(),
        };

        Self {
            probe,
            register: program(&config.register_script),
            extract: program(&config.extract_script),
            recognize: program(&config.recognize_script),
            runner,
        }
    }

    pub fn launch_registration(&self) -> Result<Started, LaunchError> {
        self.runner.spawn_detached(&self.register)?;
        Ok(Started::Registration)
    }

    /// Starts the recognizer, building the feature file first when missing.
    pub fn launch_attendance_recognizer(&self) -> Result<Started, LaunchError> {
        let status = self.probe.probe()?;
        if !status.has_images {
            return Err(LaunchError::NoFaceImages);
        }

        let extracted_features = !status.has_features;
        if extracted_features {
            info!(program = %self.extract.name(), "Feature file missing, extracting");
            self.runner.run_to_completion(&self.extract)?;
        }

        self.runner.spawn_detached(&self.recognize)?;
        Ok(Started::Recognizer { extracted_features })
    }
}

/// Message shown after a registration attempt.
pub fn registration_notice(outcome: &Result<Started, LaunchError>) -> String {
    match outcome {
        Ok(_) => {
            "Face registration window launched. Save several images, then close it.".to_string()
        }
        Err(e) => {
            warn!(error = %e, "Registration launch failed");
            format!("Failed to start registration: {e}")
        }
    }
}

/// Message shown after a recognizer attempt.
pub fn recognizer_notice(outcome: &Result<Started, LaunchError>) -> String {
    match outcome {
        Ok(_) => "Attendance recognizer launched. Press 'q' in the window to quit.".to_string(),
        Err(LaunchError::NoFaceImages) => {
            "No face images found. Please open Face Registration and save several images first."
                .to_string()
        }
        Err(e) => {
            warn!(error = %e, "Recognizer launch failed");
            format!("Failed to start attendance recognizer: {e}")
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        Detached(String),
        Waited(String),
    }

    /// Records every call; optionally fails extraction or spawning.
    #[derive(Default)]
    pub(crate) struct RecordingRunner {
        pub calls: Mutex<Vec<Call>>,
        pub fail_extraction: bool,
        pub fail_spawn: bool,
    }

    impl RecordingRunner {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn spawn_detached(&self, program: &Program) -> Result<(), LaunchError> {
            if self.fail_spawn {
                return Err(LaunchError::Spawn {
                    program: program.name(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                });
            }
            self.calls.lock().unwrap().push(Call::Detached(program.name()));
            Ok(())
        }

        fn run_to_completion(&self, program: &Program) -> Result<(), LaunchError> {
            self.calls.lock().unwrap().push(Call::Waited(program.name()));
            if self.fail_extraction {
                return Err(LaunchError::Failed {
                    program: program.name(),
                    status: "exit status: 1".to_string(),
                });
            }
            Ok(())
        }
    }

    pub(crate) fn launcher(root: &Path, runner: Arc<RecordingRunner>) -> Launcher {
        let config = Config::rooted_at(root);
        let probe = FaceStatusProbe::new(&config.faces_dir, &config.features_file);
        Launcher::new(&config, probe, runner)
    }

    pub(crate) fn add_face(root: &Path) {
        let dir = root.join("data").join("data_faces_from_camera").join("Alice");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("img_face_1.jpg"), b"x").unwrap();
    }

    fn add_features(root: &Path) {
        fs::write(root.join("data").join("features_all.csv"), b"Alice,0.1").unwrap();
    }

    #[test]
    fn registration_is_started_detached() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::default());

        let outcome = launcher(dir.path(), runner.clone()).launch_registration();

        assert!(matches!(outcome, Ok(Started::Registration)));
        assert_eq!(
            runner.calls(),
            vec![Call::Detached("get_faces_from_camera_tkinter.py".into())]
        );
    }

    #[test]
    fn registration_spawn_failure_becomes_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(RecordingRunner {
            fail_spawn: true,
            ..Default::default()
        });

        let outcome = launcher(dir.path(), runner).launch_registration();

        assert!(matches!(outcome, Err(LaunchError::Spawn { .. })));
        assert!(registration_notice(&outcome).starts_with("Failed to start registration: "));
    }

    #[test]
    fn recognizer_without_images_starts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Arc::new(RecordingRunner::default());

        let outcome = launcher(dir.path(), runner.clone()).launch_attendance_recognizer();

        assert!(matches!(outcome, Err(LaunchError::NoFaceImages)));
        assert!(runner.calls().is_empty());
        assert!(recognizer_notice(&outcome).starts_with("No face images found."));
    }

    #[test]
    fn missing_features_are_extracted_once_before_recognizer() {
        let dir = tempfile::tempdir().unwrap();
        add_face(dir.path());
        let runner = Arc::new(RecordingRunner::default());

        let outcome = launcher(dir.path(), runner.clone()).launch_attendance_recognizer();

        assert!(matches!(outcome, Ok(Started::Recognizer { extracted_features: true })));
        assert_eq!(
            runner.calls(),
            vec![
                Call::Waited("features_extraction_to_csv.py".into()),
                Call::Detached("attendance_taker.py".into()),
            ]
        );
    }

    #[test]
    fn existing_features_skip_extraction() {
        let dir = tempfile::tempdir().unwrap();
        add_face(dir.path());
        add_features(dir.path());
        let runner = Arc::new(RecordingRunner::default());

        let outcome = launcher(dir.path(), runner.clone()).launch_attendance_recognizer();

        assert!(matches!(outcome, Ok(Started::Recognizer { extracted_features: false })));
        assert_eq!(runner.calls(), vec![Call::Detached("attendance_taker.py".into())]);
    }

    #[test]
    fn failed_extraction_never_starts_recognizer() {
        let dir = tempfile::tempdir().unwrap();
        add_face(dir.path());
        let runner = Arc::new(RecordingRunner {
            fail_extraction: true,
            ..Default::default()
        });

        let outcome = launcher(dir.path(), runner.clone()).launch_attendance_recognizer();

        assert!(matches!(outcome, Err(LaunchError::Failed { .. })));
        assert_eq!(
            runner.calls(),
            vec![Call::Waited("features_extraction_to_csv.py".into())]
        );
        assert_eq!(
            recognizer_notice(&outcome),
            "Failed to start attendance recognizer: \
             features_extraction_to_csv.py failed (exit status: 1)"
        );
    }

    #[test]
    fn command_runner_reports_missing_interpreter() {
        let dir = tempfile::tempdir().unwrap();
        let program = Program {
            interpreter: dir.path().join("no-such-interpreter"),
            script: dir.path().join("script.py"),
            work_dir: dir.path().to_path_buf(),
        };

        assert!(matches!(
            CommandRunner.spawn_detached(&program),
            Err(LaunchError::Spawn { .. })
        ));
        assert!(matches!(
            CommandRunner.run_to_completion(&program),
            Err(LaunchError::Spawn { .. })
        ));
    }

    /// `sh <work_dir>/<name>` where the script holds `body`.
    #[cfg(unix)]
    fn shell_program(work_dir: &Path, name: &str, body: &str) -> Program {
        let script = work_dir.join(name);
        fs::write(&script, body).unwrap();
        Program {
            interpreter: PathBuf::from("sh"),
            script,
            work_dir: work_dir.to_path_buf(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_runner_fails_on_non_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let program = shell_program(dir.path(), "extract.sh", "exit 3\n");

        match CommandRunner.run_to_completion(&program) {
            Err(LaunchError::Failed { program, status }) => {
                assert_eq!(program, "extract.sh");
                assert!(status.contains('3'), "{status}");
            }
            other => panic!("expected a failed exit, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_runner_waits_for_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let program = shell_program(
            dir.path(),
            "extract.sh",
            "touch features_all.csv\nexit 0\n",
        );

        assert!(CommandRunner.run_to_completion(&program).is_ok());
        // ran in work_dir and finished before returning
        assert!(dir.path().join("features_all.csv").exists());
    }

    #[cfg(unix)]
    #[test]
    fn command_runner_starts_detached_program() {
        let dir = tempfile::tempdir().unwrap();
        let program = shell_program(dir.path(), "recognize.sh", "touch started\n");

        assert!(CommandRunner.spawn_detached(&program).is_ok());

        let marker = dir.path().join("started");
        for _ in 0..100 {
            if marker.exists() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        assert!(marker.exists(), "detached program never ran");
    }

    #[cfg(unix)]
    #[test]
    fn failed_real_extraction_never_starts_recognizer() {
        let dir = tempfile::tempdir().unwrap();
        add_face(dir.path());
        fs::write(dir.path().join("features_extraction_to_csv.py"), "exit 2\n").unwrap();
        fs::write(dir.path().join("attendance_taker.py"), "touch recognizer_ran\n").unwrap();

        let mut config = Config::rooted_at(dir.path());
        config.interpreter = PathBuf::from("sh");
        let probe = FaceStatusProbe::new(&config.faces_dir, &config.features_file);
        let launcher = Launcher::new(&config, probe, Arc::new(CommandRunner));

        let outcome = launcher.launch_attendance_recognizer();

        assert!(matches!(outcome, Err(LaunchError::Failed { .. })));
        std::thread::sleep(std::time::Duration::from_millis(200));
        assert!(!dir.path().join("recognizer_ran").exists());
    }
}
