//! Error macros for cardmatch

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::MatchError::invalid_value($context, $value))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::MatchError::UsageError($msg.to_string()))
    };
}

/// Macro for mapping database errors to an opaque storage failure
#[macro_export]
macro_rules! map_db_err {
    ($op:expr) => {
        |e| $crate::error::MatchError::storage($op, e)
    };
}
