use crate::model::face_status::FaceStatus;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Looks at the faces directory and the feature file on every call.
#[derive(Clone, Debug)]
pub struct FaceStatusProbe {
    faces_dir: PathBuf,
    features_file: PathBuf,
}

impl FaceStatusProbe {
    pub fn new(faces_dir: impl Into<PathBuf>, features_file: impl Into<PathBuf>) -> Self {
        Self {
            faces_dir: faces_dir.into(),
            features_file: features_file.into(),
        }
    }

    pub fn probe(&self) -> io::Result<FaceStatus> {
        let mut status = FaceStatus {
            has_features: self.features_file.exists(),
            ..FaceStatus::default()
        };

        // a missing faces directory just means nobody registered yet
        if self.faces_dir.is_dir() {
            walk(&self.faces_dir, true, &mut status)?;
        }

        Ok(status)
    }
}

fn is_image(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Depth-first walk in name order. Symlinked directories are not followed.
fn walk(dir: &Path, is_root: bool, status: &mut FaceStatus) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut images = 0usize;
    let mut subdirs = Vec::new();

    for entry in entries {
        let file_type = entry.file_type()?;
        let path = entry.path();

        if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            continue;
        } else if is_image(&entry.file_name().to_string_lossy()) {
            images += 1;
        }
    }

    if images > 0 {
        status.has_images = true;
        if !is_root {
            if let Some(name) = dir.file_name() {
                status.people.push(name.to_string_lossy().into_owned());
            }
        }
    }

    for sub in subdirs {
        walk(&sub, false, status)?;
    }

    Ok(())
}
