use std::fmt;

/// Evaluates to the value inside `$expr`,
/// or logs the failure and evaluates to `$never` if `$expr` is `None` or `Err`.
///
/// `expect` logs at error level and is meant for broken invariants.
/// `warn` logs at warning level and is meant for bad input that can be skipped.
#[macro_export]
macro_rules! try_log {
    (
        $expr:expr,
        $severity:ident $must:literal $(
            (
                $($must_args:expr),* $(,)?
            )
        )?
        or $never:expr
    ) => {
        {
            #[allow(clippy::question_mark)]
            if let Some(value) = $crate::TryLog::convert_or_log(
                $expr,
                $crate::try_log::severity!($severity),
                format_args!($must, $($($must_args),*)?),
            ) {
                value
            } else {
                $never
            }
        }
    }
}

pub use try_log;

#[macro_export]
macro_rules! try_log_return {
    ($expr:expr, $severity:ident $must:literal $(, $($must_args:expr),*)? $(,)?) => {
        $crate::try_log!($expr, $severity $must $(($($must_args),*))? or return)
    }
}

pub use try_log_return;

#[doc(hidden)]
#[macro_export]
macro_rules! try_log_severity {
    (expect) => {
        $crate::try_log::Severity::Error
    };
    (warn) => {
        $crate::try_log::Severity::Warn
    };
}

#[doc(hidden)]
pub use try_log_severity as severity;

/// The log level used when a [`try_log!`](crate::try_log!) expression fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
}

impl Severity {
    fn log(self, message: fmt::Arguments) {
        match self {
            Severity::Error => bevy::log::error!("{message}"),
            Severity::Warn => bevy::log::warn!("{message}"),
        }
    }
}

/// An expression that can be used for `$expr` in [`try_log!`](crate::try_log!).
pub trait TryLog<T> {
    /// Returns the successful result as `Some`, or log the error with `must`.
    fn convert_or_log(this: Self, severity: Severity, must: impl fmt::Display) -> Option<T>;
}

impl<T> TryLog<T> for Option<T> {
    fn convert_or_log(this: Self, severity: Severity, must: impl fmt::Display) -> Option<T> {
        if this.is_none() {
            severity.log(format_args!("{must}"));
        }
        this
    }
}

impl<T, E: fmt::Display> TryLog<T> for Result<T, E> {
    fn convert_or_log(this: Self, severity: Severity, must: impl fmt::Display) -> Option<T> {
        match this {
            Ok(value) => Some(value),
            Err(err) => {
                severity.log(format_args!("{must}: {err}"));
                None
            }
        }
    }
}
