/// Storage namespace of an object.
///
/// Blobs and commits live in separate bucket directories under `objects/`, so
/// the kind of an object decides where its digest is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Commit,
}

impl ObjectKind {
    /// Bucket directory name under `objects/`
    pub fn bucket(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blobs",
            ObjectKind::Commit => "commits",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Blob => write!(f, "blob"),
            ObjectKind::Commit => write!(f, "commit"),
        }
    }
}
