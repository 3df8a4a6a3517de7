use serde::Serialize;
use utoipa::ToSchema;

/// Snapshot of the face data on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FaceStatus {
    /// At least one image exists anywhere under the faces directory
    pub has_images: bool,
    /// The precomputed feature file exists
    pub has_features: bool,
    /// Folders (below the faces directory) holding at least one image
    #[schema(example = json!(["Alice", "Bob"]))]
    pub people: Vec<String>,
}
