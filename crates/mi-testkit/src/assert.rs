//! Fatal test assertions
//!
//! Every invariant violation in the harness ends up here. A failure logs at
//! `error` level and panics, which aborts the current test. All entry
//! points are `#[track_caller]`, and so is every harness accessor built on
//! them, so the reported location is the line in the test body that made
//! the failing request.

use std::fmt::{Debug, Display};
use std::panic::Location;

/// Abort the current test.
#[track_caller]
pub fn fail(message: impl Display) -> ! {
    let location = Location::caller();
    log::error!("{} (at {})", message, location);
    panic!("{} (at {})", message, location);
}

/// Abort unless `expected == actual`.
#[track_caller]
pub fn assert_equal<T: PartialEq + Debug>(expected: T, actual: T, message: impl Display) {
    if expected != actual {
        fail(format_args!(
            "{}: expected {:?}, got {:?}",
            message, expected, actual
        ));
    }
}

/// Abort unless `condition` holds.
#[track_caller]
pub fn assert_that(condition: bool, message: impl Display) {
    if !condition {
        fail(message);
    }
}
