// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostic counters, surfaced through `tracing` when the `std` feature
//! is enabled and otherwise just plain data a caller can inspect.

/// Running counts for a single freeze call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreezeStats {
    pub frames_fast: usize,
    pub frames_slow: usize,
    pub pins: usize,
}

impl FreezeStats {
    pub fn record_fast(&mut self, frame_count: usize) {
        self.frames_fast += frame_count;
    }

    pub fn record_slow(&mut self, frame_count: usize) {
        self.frames_slow += frame_count;
    }

    pub fn record_pin(&mut self) {
        self.pins += 1;
    }
}

/// Running counts for a single thaw call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThawStats {
    pub frames_bulk: usize,
    pub frames_slow: usize,
    pub deopts: usize,
}

impl ThawStats {
    pub fn record_bulk(&mut self, frame_count: usize) {
        self.frames_bulk += frame_count;
    }

    pub fn record_slow(&mut self, frame_count: usize) {
        self.frames_slow += frame_count;
    }

    pub fn record_deopt(&mut self) {
        self.deopts += 1;
    }
}

#[cfg(test)]
mod stats_test;
