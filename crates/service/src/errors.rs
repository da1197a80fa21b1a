use std::fmt;

use thiserror::Error;

/// What went wrong, independent of which field it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    FieldRequired,
    FieldQuality,
    FieldTypeMismatch,
    FieldNotUnique,
    FieldInvalid,
    DateFormat,
    DateValues,
    /// Backend failure unrelated to the request contents.
    Storage,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::NotFound => "product not found",
            Self::AlreadyExists => "product already exists",
            Self::FieldRequired => "field required",
            Self::FieldQuality => "field quality",
            Self::FieldTypeMismatch => "field type mismatch",
            Self::FieldNotUnique => "field not unique",
            Self::FieldInvalid => "field invalid",
            Self::DateFormat => "date format not valid",
            Self::DateValues => "date value not valid",
            Self::Storage => "storage failure",
        }
    }

    /// Kinds produced by input validation rather than by storage.
    pub fn is_validation(self) -> bool {
        !matches!(self, Self::NotFound | Self::AlreadyExists | Self::Storage)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Service-level failure tagged with the attribute that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {field}")]
pub struct ServiceError {
    kind: ErrorKind,
    field: &'static str,
}

impl ServiceError {
    pub fn new(kind: ErrorKind, field: &'static str) -> Self { Self { kind, field } }

    pub fn not_found(field: &'static str) -> Self { Self::new(ErrorKind::NotFound, field) }
    pub fn already_exists(field: &'static str) -> Self { Self::new(ErrorKind::AlreadyExists, field) }
    pub fn field_required(field: &'static str) -> Self { Self::new(ErrorKind::FieldRequired, field) }
    pub fn type_mismatch(field: &'static str) -> Self { Self::new(ErrorKind::FieldTypeMismatch, field) }
    pub fn field_invalid(field: &'static str) -> Self { Self::new(ErrorKind::FieldInvalid, field) }
    pub fn date_format(field: &'static str) -> Self { Self::new(ErrorKind::DateFormat, field) }
    pub fn storage(field: &'static str) -> Self { Self::new(ErrorKind::Storage, field) }

    pub fn kind(&self) -> ErrorKind { self.kind }
    pub fn field(&self) -> &'static str { self.field }
    pub fn is_validation(&self) -> bool { self.kind.is_validation() }
}

/// Raw storage failures, before the service attaches field context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("product code value already exists")]
    CodeValueAlreadyExists,
    #[error("product not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}
