//! Generic error handling utilities
//!
//! Lets the CLI report any failure the same way while keeping messages for
//! malformed input distinct from system failures.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// True when the message is something the user can fix directly,
    /// such as a malformed requirement or a bad config value
    fn is_user_actionable(&self) -> bool;

    /// The specific message to show for user-actionable errors
    fn user_message(&self) -> Option<String>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context, with the full error available at debug level.
///
/// ```rust,no_run
/// # use vips_version::core::error_handling::log_error_with_context;
/// # use vips_version::core::error::VersionError;
/// log_error_with_context(&VersionError::Empty, "Parsing requirement");
/// // Logs: "FATAL: Version string is empty"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", fatal_message(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// The primary line `log_error_with_context` emits after "FATAL: "
pub fn fatal_message<E: ContextualError>(error: &E, operation_context: &str) -> String {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            return user_msg;
        }
    }
    operation_context.to_string()
}
