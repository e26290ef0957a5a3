// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Tunables;
use contfreeze_abi::WordOffset;

#[test]
fn default_bulk_threshold_matches_the_documented_constant() {
    let cfg = Tunables::default();
    assert_eq!(cfg.bulk_thaw_threshold, WordOffset::new(Tunables::DEFAULT_BULK_THAW_THRESHOLD_WORDS));
}

#[test]
fn defaults_are_nonzero() {
    let cfg = Tunables::default();
    assert!(cfg.metadata_words > WordOffset::ZERO);
    assert!(cfg.align_wiggle > WordOffset::ZERO);
}
