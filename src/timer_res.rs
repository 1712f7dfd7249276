//! Scoped request for the finest OS timer resolution.
//!
//! On Windows the default timer granularity is around 15.6 ms, far too coarse for a 16 ms sleep quantum, so
//! `timeBeginPeriod(1)` is requested for the guard's lifetime. Other platforms have no equivalent mode and the
//! guard does nothing.

/// While alive, the host timer runs at its finest resolution (where the platform supports it). Resolution is
/// restored on drop.
#[derive(Debug)]
pub struct HighResTimer {
    active: bool,
}

impl HighResTimer {
    /// Requests the finest timer resolution.
    pub fn acquire() -> Self {
        let active = platform::begin();
        log::debug!("high-resolution timer active: {active}");
        Self { active }
    }

    /// Returns `true` if the platform honored the request.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for HighResTimer {
    fn drop(&mut self) {
        if self.active {
            platform::end();
            log::debug!("high-resolution timer released");
        }
    }
}

#[cfg(windows)]
mod platform {
    const PERIOD_MS: u32 = 1;
    const TIMERR_NOERROR: u32 = 0;

    #[link(name = "winmm")]
    extern "system" {
        fn timeBeginPeriod(period: u32) -> u32;
        fn timeEndPeriod(period: u32) -> u32;
    }

    pub(super) fn begin() -> bool {
        // SAFETY: plain Win32 call with no pointer arguments.
        unsafe { timeBeginPeriod(PERIOD_MS) == TIMERR_NOERROR }
    }

    pub(super) fn end() {
        // SAFETY: paired with a successful `timeBeginPeriod(PERIOD_MS)`.
        unsafe {
            timeEndPeriod(PERIOD_MS);
        }
    }
}

#[cfg(not(windows))]
mod platform {
    pub(super) fn begin() -> bool {
        false
    }

    pub(super) fn end() {}
}
