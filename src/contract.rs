//! # Contract Checks
//!
//! Fail-fast assertions for programmer errors. A broken contract means the
//! transcoder was misconfigured or has a bug, never that a frame was bad, so
//! these panic rather than return a [`FoveaError`](crate::error::FoveaError).
//!
//! - [`requires!`](crate::requires): precondition on entry
//! - [`ensures!`](crate::ensures): postcondition on exit
//! - [`invariant!`](crate::invariant): internal consistency in between
//!
//! All three stay active in release builds.

/// Panic with a `precondition violated` message when `cond` is false.
#[macro_export]
macro_rules! requires {
    ($cond:expr $(,)?) => {
        $crate::requires!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            panic!("precondition violated: {}", format_args!($($arg)+));
        }
    };
}

/// Panic with a `postcondition violated` message when `cond` is false.
#[macro_export]
macro_rules! ensures {
    ($cond:expr $(,)?) => {
        $crate::ensures!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            panic!("postcondition violated: {}", format_args!($($arg)+));
        }
    };
}

/// Panic with an `invariant violated` message when `cond` is false.
#[macro_export]
macro_rules! invariant {
    ($cond:expr $(,)?) => {
        $crate::invariant!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            panic!("invariant violated: {}", format_args!($($arg)+));
        }
    };
}
