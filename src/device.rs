use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

/// A host-provided addressable-LED capability.
///
/// The interpreter drives a device exclusively through this trait; it
/// performs no range validation or clamping itself, and it owns no timing
/// policy. Hosts implement the trait once per physical (or simulated) strip
/// and hand an instance to [`Interpreter::new`].
///
/// [`Interpreter::new`]: crate::interpreter::evaluator::core::Interpreter::new
pub trait LedDevice {
    /// Fills the whole strip with the given hue/saturation/value triple.
    ///
    /// Argument ranges are a device policy; values arrive exactly as the
    /// script computed them.
    fn fill_hsv(&mut self, hue: f64, saturation: f64, value: f64);

    /// Suspends execution for `milliseconds`.
    ///
    /// The wait must be preemptible: implementations poll `cancel` and
    /// return [`DelayStatus::Interrupted`] as soon as it fires, so a script
    /// stuck in a `loop` can be torn down promptly.
    fn delay(&mut self, milliseconds: f64, cancel: &CancelToken) -> DelayStatus;
}

/// Reports whether a [`LedDevice::delay`] ran to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayStatus {
    /// The full duration elapsed.
    Completed,
    /// The wait was cut short by cancellation.
    Interrupted,
}

/// A shared cancellation signal for one running script.
///
/// Each interpreter instance owns a token and exposes a clonable handle via
/// [`Interpreter::cancel_token`]; any thread holding a clone can request
/// teardown. The interpreter checks the token at the top of every `loop`
/// iteration, and devices check it while sleeping in `delay`.
///
/// ## Example
/// ```
/// use lumen::device::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
///
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
///
/// [`Interpreter::cancel_token`]: crate::interpreter::evaluator::core::Interpreter::cancel_token
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests teardown of the script holding this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any
    /// clone of this token.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A device that discards every call.
///
/// Useful for doctests, dry runs, and hosts that only want the syntactic
/// phases. `delay` returns immediately without sleeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLed;

impl LedDevice for NullLed {
    fn fill_hsv(&mut self, _hue: f64, _saturation: f64, _value: f64) {}

    fn delay(&mut self, _milliseconds: f64, cancel: &CancelToken) -> DelayStatus {
        if cancel.is_cancelled() {
            DelayStatus::Interrupted
        } else {
            DelayStatus::Completed
        }
    }
}

/// Granularity of the preemptible sleep in [`ConsoleLed`].
const SLEEP_SLICE: Duration = Duration::from_millis(5);

/// A diagnostic device that logs fills and sleeps in real time.
///
/// `fill_hsv` emits a `tracing` event instead of driving hardware, and
/// `delay` sleeps the requested wall-clock duration in small slices, polling
/// the cancel token between slices.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLed;

impl LedDevice for ConsoleLed {
    fn fill_hsv(&mut self, hue: f64, saturation: f64, value: f64) {
        tracing::info!(hue, saturation, value, "fill_hsv");
    }

    fn delay(&mut self, milliseconds: f64, cancel: &CancelToken) -> DelayStatus {
        if !milliseconds.is_finite() || milliseconds <= 0.0 {
            return DelayStatus::Completed;
        }

        tracing::trace!(milliseconds, "delay");
        let mut remaining = Duration::from_secs_f64(milliseconds / 1000.0);
        while !remaining.is_zero() {
            if cancel.is_cancelled() {
                return DelayStatus::Interrupted;
            }
            let slice = remaining.min(SLEEP_SLICE);
            thread::sleep(slice);
            remaining -= slice;
        }

        DelayStatus::Completed
    }
}
