// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{FreezeError, ThawError};

#[test]
fn freeze_error_messages_are_distinct() {
    assert_ne!(FreezeError::Overflow.to_string(), FreezeError::AllocationFailed.to_string());
}

#[test]
fn thaw_error_implements_std_error() {
    fn assert_error<E: core::error::Error>(_: &E) {}
    assert_error(&ThawError::Overflow);
}

#[test]
fn freeze_error_implements_std_error() {
    fn assert_error<E: core::error::Error>(_: &E) {}
    assert_error(&FreezeError::Overflow);
}
