//! The process-wide runtime configuration.
//!
//! Plotting code usually reads one shared configuration. This module keeps an
//! [`RcParams`] behind a mutex and offers the convenience functions the crate
//! root re-exports. Everything here is a thin wrapper over [`Styler`] and
//! [`RcParams`]; code that wants isolation should own its own `RcParams`.
//!
//! ```rust
//! use plotstyle::{runtime, StyleOptions};
//!
//! runtime::style_context("MNRAS", &StyleOptions::new().silent(true).dictionary(), |applied| {
//!     assert_eq!(runtime::with_rc(|rc| rc.get_f64("font.size")), Some(8.0));
//!     assert_eq!(applied.key(), "MNRAS");
//! })
//! .unwrap();
//! ```
//!
//! Access is serialized by the mutex, but interleaved applications from
//! several threads still race at the level of whole styles.

use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use plotstyle_rc::{RcParams, RcSnapshot};

use crate::apply::{apply_custom, AppliedStyle, StyleOptions, Styler};
use crate::error::StyleError;

static RUNTIME: Lazy<Mutex<RcParams>> = Lazy::new(|| Mutex::new(RcParams::defaults()));

fn lock() -> MutexGuard<'static, RcParams> {
    RUNTIME.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Applies a built-in style to the process-wide configuration.
pub fn apply_style(name: &str, options: &StyleOptions) -> Result<AppliedStyle, StyleError> {
    Styler::new().apply(&mut lock(), name, options)
}

/// Enables LaTeX text with a custom preamble and extra options.
///
/// Returns the option names that were dropped.
pub fn apply_custom_style<I, K, V>(params: I, latex_preamble: &str) -> Vec<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    apply_custom(&mut lock(), params, latex_preamble)
}

/// Restores the process-wide configuration to library defaults.
pub fn reset_defaults() {
    lock().reset();
    log::debug!("Runtime configuration reset to defaults");
}

/// A copy of the current process-wide configuration.
pub fn current() -> RcParams {
    lock().clone()
}

/// Runs `f` with shared access to the process-wide configuration.
pub fn with_rc<T>(f: impl FnOnce(&RcParams) -> T) -> T {
    f(&*lock())
}

/// Runs `f` with exclusive access to the process-wide configuration.
pub fn with_rc_mut<T>(f: impl FnOnce(&mut RcParams) -> T) -> T {
    f(&mut *lock())
}

struct RestoreOnDrop(Option<RcSnapshot>);

impl Drop for RestoreOnDrop {
    fn drop(&mut self) {
        if let Some(snapshot) = self.0.take() {
            lock().restore(snapshot);
        }
    }
}

/// Applies a style for the duration of `f`.
///
/// The previous configuration is restored when `f` returns, when applying
/// fails, and when `f` panics. The lock is not held while `f` runs, so `f`
/// may use [`with_rc`] and the other functions here.
pub fn style_context<T, F>(name: &str, options: &StyleOptions, f: F) -> Result<T, StyleError>
where
    F: FnOnce(&AppliedStyle) -> T,
{
    let _restore = RestoreOnDrop(Some(lock().snapshot()));
    let applied = apply_style(name, options)?;
    Ok(f(&applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn quiet() -> StyleOptions {
        StyleOptions::new().silent(true).dictionary()
    }

    #[test]
    #[serial]
    fn test_apply_and_reset() {
        reset_defaults();
        apply_style("AGU", &quiet()).unwrap();
        assert_eq!(with_rc(|rc| rc.get("font.size").map(str::to_string)).as_deref(), Some("8"));

        reset_defaults();
        assert_eq!(current(), RcParams::defaults());
    }

    #[test]
    #[serial]
    fn test_applications_stack_without_reset() {
        reset_defaults();
        with_rc_mut(|rc| rc.set("lines.markersize", "12")).unwrap();
        apply_style("AAS", &quiet()).unwrap();
        assert_eq!(with_rc(|rc| rc.get_f64("lines.markersize")), Some(12.0));

        apply_style("AAS", &quiet().reset_first(true)).unwrap();
        assert_eq!(with_rc(|rc| rc.get_f64("lines.markersize")), Some(6.0));
        reset_defaults();
    }

    #[test]
    #[serial]
    fn test_style_context_restores() {
        reset_defaults();
        apply_style("AGU", &quiet()).unwrap();
        let before = current();

        let seen = style_context("Caltech Thesis", &quiet(), |applied| {
            assert_eq!(applied.key(), "Caltech Thesis");
            with_rc(|rc| rc.get_f64("font.size"))
        })
        .unwrap();

        assert_eq!(seen, Some(12.0));
        assert_eq!(current(), before);
        reset_defaults();
    }

    #[test]
    #[serial]
    fn test_style_context_restores_on_error() {
        reset_defaults();
        let result = style_context("Unknown", &quiet(), |_| ());
        assert!(matches!(result, Err(StyleError::UnknownStyle { .. })));
        assert_eq!(current(), RcParams::defaults());
    }

    #[test]
    #[serial]
    fn test_style_context_restores_on_panic() {
        reset_defaults();
        let outcome = std::panic::catch_unwind(|| {
            let _ = style_context("AGU", &quiet().presentation(true), |_| panic!("boom"));
        });
        assert!(outcome.is_err());
        assert_eq!(current(), RcParams::defaults());
    }

    #[test]
    #[serial]
    fn test_apply_custom_style() {
        reset_defaults();
        let dropped = apply_custom_style([("font.size", "14")], r"\usepackage{amsmath}");
        assert!(dropped.is_empty());
        assert_eq!(with_rc(|rc| rc.get_bool("text.usetex")), Some(true));
        reset_defaults();
    }
}
