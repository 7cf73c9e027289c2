use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Result, WizardError};
use tracing::{debug, error};

/// Catches panics raised while rendering the wizard tree.
///
/// Once tripped, every call fails fast with the original message until
/// `reset` is called (the host does this when the wizard is dismissed).
/// The process panic hook is replaced only while a guarded call runs.
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    failure: Option<String>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guard<R>(&mut self, f: impl FnOnce() -> R) -> Result<R> {
        if let Some(message) = &self.failure {
            return Err(WizardError::ViewPanicked(message.clone()));
        }

        // Swap in a quiet hook so a caught panic does not print over the screen
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| {
            debug!("Wizard view panic at {:?}", info.location());
        }));
        let outcome = panic::catch_unwind(AssertUnwindSafe(f));
        panic::set_hook(previous);

        match outcome {
            Ok(value) => Ok(value),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Wizard view panicked: {}", message);
                self.failure = Some(message.clone());
                Err(WizardError::ViewPanicked(message))
            }
        }
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn reset(&mut self) {
        self.failure = None;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
