use derive_more::{Display, Error};

/// Failures raised by views and cursors. They always travel wrapped into an [`eyre::Report`];
/// use [`eyre::Report::downcast_ref`] to tell them apart from I/O or user errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Error)]
pub enum ViewError {
    /// Iteration had to cross the end of the underlying sequence before the adaptor's contract
    /// was satisfied (missing end-of-line, too few elements for an `_or_throw` bound, ...).
    #[display("unexpected end of input: {message}")]
    UnexpectedEndOfInput { message: String },
    /// A view can't be constructed because a parameter is known to be unsatisfiable up-front.
    #[display("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ViewError {
    pub fn unexpected_end(message: impl Into<String>) -> Self {
        Self::UnexpectedEndOfInput {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Returns `true` if the report wraps [`ViewError::UnexpectedEndOfInput`].
    pub fn is_unexpected_end(report: &eyre::Report) -> bool {
        matches!(
            report.downcast_ref::<ViewError>(),
            Some(ViewError::UnexpectedEndOfInput { .. })
        )
    }

    /// Returns `true` if the report wraps [`ViewError::InvalidArgument`].
    pub fn is_invalid_argument(report: &eyre::Report) -> bool {
        matches!(
            report.downcast_ref::<ViewError>(),
            Some(ViewError::InvalidArgument { .. })
        )
    }
}
