//! Global timing and feature defaults.
//!
//! Mirrors the original library's `SMTD_GLOBAL_*` compile-time defines as a
//! runtime-constructible config struct, in the style of the teacher's
//! `TapHoldConfig::new`/`TapHoldConfig::from_ms`. Per-key classifiers may
//! override any of these through `Classifier::timeout_override` /
//! `Classifier::feature_override`; `RuntimeConfig` supplies only the
//! fallback.

/// Which of the three named timeout windows a lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeout {
    /// How long a freshly touched key waits before being promoted to `Hold`.
    Tap,
    /// How long a key sits in `Sequence` waiting for another touch before
    /// the sequence is considered finished.
    Sequence,
    /// How long a released key waits (in `TouchRelease`/`HoldRelease`) for a
    /// following key before the release is finalized.
    Release,
}

/// A toggleable behavior a classifier may opt in or out of per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Whether repeated taps within a sequence each emit their own `Tap`
    /// action as the sequence times out, rather than staying silent until
    /// resolved by a following key.
    AggregateTaps,
}

/// Global fallback timing and feature configuration.
///
/// Durations are stored in milliseconds, matching the host clock's
/// resolution (spec's `timer_read32`/`timer_elapsed32`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    tap_term_ms: u32,
    sequence_term_ms: u32,
    release_term_ms: u32,
    simultaneous_presses_delay_ms: u32,
    aggregate_taps: bool,
}

impl RuntimeConfig {
    /// Builds a config from an explicit tapping term, deriving the sequence
    /// and release terms the same way the original library's global
    /// defaults do (`TAPPING_TERM / 2` and `TAPPING_TERM / 4`).
    ///
    /// # Errors
    ///
    /// [`crate::CoreError::InvalidTimeout`] if `tapping_term_ms` is zero (a
    /// zero tap term would make `T_SEQUENCE`/`T_RELEASE` zero too, firing
    /// every timer immediately).
    pub const fn from_tapping_term_ms(tapping_term_ms: u32) -> crate::error::CoreResult<Self> {
        if tapping_term_ms == 0 {
            return Err(crate::error::CoreError::InvalidTimeout);
        }
        Ok(Self {
            tap_term_ms: tapping_term_ms,
            sequence_term_ms: tapping_term_ms / 2,
            release_term_ms: tapping_term_ms / 4,
            simultaneous_presses_delay_ms: 0,
            aggregate_taps: false,
        })
    }

    /// # Errors
    ///
    /// [`crate::CoreError::InvalidTimeout`] if any of `tap_term_ms`,
    /// `sequence_term_ms`, `release_term_ms` is zero.
    pub const fn new(
        tap_term_ms: u32,
        sequence_term_ms: u32,
        release_term_ms: u32,
        simultaneous_presses_delay_ms: u32,
        aggregate_taps: bool,
    ) -> crate::error::CoreResult<Self> {
        if tap_term_ms == 0 || sequence_term_ms == 0 || release_term_ms == 0 {
            return Err(crate::error::CoreError::InvalidTimeout);
        }
        Ok(Self {
            tap_term_ms,
            sequence_term_ms,
            release_term_ms,
            simultaneous_presses_delay_ms,
            aggregate_taps,
        })
    }

    pub const fn get(&self, which: Timeout) -> u32 {
        match which {
            Timeout::Tap => self.tap_term_ms,
            Timeout::Sequence => self.sequence_term_ms,
            Timeout::Release => self.release_term_ms,
        }
    }

    pub const fn simultaneous_presses_delay_ms(&self) -> u32 {
        self.simultaneous_presses_delay_ms
    }

    pub const fn aggregate_taps(&self) -> bool {
        self.aggregate_taps
    }
}

impl Default for RuntimeConfig {
    /// 200ms tapping term, matching QMK's common `TAPPING_TERM` default.
    #[allow(clippy::missing_panics_doc)]
    fn default() -> Self {
        match Self::from_tapping_term_ms(200) {
            Ok(cfg) => cfg,
            Err(_) => unreachable!("200ms is a non-zero literal"),
        }
    }
}
