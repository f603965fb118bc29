use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid pixel buffer of {len} bytes: {reason}")]
    InvalidBuffer { len: usize, reason: String },

    #[error("invalid page number {page}: {reason}")]
    InvalidPageNumber { page: i64, reason: String },
}

impl CoreError {
    pub(crate) fn invalid_buffer(len: usize, reason: impl Into<String>) -> Self {
        CoreError::InvalidBuffer {
            len,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_page(page: impl Into<i64>, reason: impl Into<String>) -> Self {
        CoreError::InvalidPageNumber {
            page: page.into(),
            reason: reason.into(),
        }
    }
}
