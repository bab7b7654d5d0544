use crate::store::StoreError;

/// Domain-level failure category surfaced by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    Unknown,
}

/// Repository failure tagged with the operation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{op}: user already exists")]
    AlreadyExists { op: &'static str },
    #[error("{op}: user not found")]
    NotFound { op: &'static str },
    #[error("{op}: unknown store failure")]
    Unknown {
        op: &'static str,
        #[source]
        source: StoreError,
    },
}

impl RepoError {
    /// Classify a store failure for `op`. Unique violations and missing rows
    /// keep their meaning; everything else becomes `Unknown`.
    pub(crate) fn from_store(op: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => Self::AlreadyExists { op },
            StoreError::NoRows => Self::NotFound { op },
            source => Self::Unknown { op, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            Self::AlreadyExists { op } | Self::NotFound { op } | Self::Unknown { op, .. } => *op,
        }
    }
}
