//! Call-boundary fault barrier.
//!
//! Hosts embedding the engine must never terminate because of an
//! internal fault (for example an assertion violation during layout
//! calibration on a pathological document). `guarded` runs an extraction
//! closure under `catch_unwind` and converts a panic into the ordinary
//! error channel, so callers see `BicError::Fault` instead of an
//! unwinding process.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{BicError, Result};

/// Run `f`, converting any panic into `BicError::Fault`.
pub fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(BicError::Fault(panic_message(&payload))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
