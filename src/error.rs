use thiserror::Error;

/// Hard failures of the feature pipeline. Per-keypoint rejections are not errors,
/// see `features::sift_feature::RefinementOutcome`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SiftError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("logic error: {0}")]
    LogicError(String),
}

pub type Result<T> = std::result::Result<T, SiftError>;
