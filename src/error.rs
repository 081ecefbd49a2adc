use thiserror::Error;

/// Errors reported by sky computations and catalogue loading.
///
/// Domain and referential errors are precondition violations: the
/// operation that raised them produced nothing. Only the I/O variants are
/// expected when reading real resource files.
#[derive(Error, Debug)]
pub enum SkyError {
    /// A value lies outside the domain required by a constructor.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An asterism line names a Hipparcos id absent from the catalogue.
    #[error("asterism references unknown star HIP {hipparcos_id}")]
    UnknownStar { hipparcos_id: u32 },

    /// An asterism holds a star that is not one of the catalogue's stars.
    #[error("asterism {asterism} references star '{star}' which is not in the catalogue")]
    ForeignStar { asterism: usize, star: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, SkyError>;

/// Shorthand used by validating constructors.
pub(crate) fn invalid_argument<T>(message: impl Into<String>) -> Result<T> {
    Err(SkyError::InvalidArgument(message.into()))
}
