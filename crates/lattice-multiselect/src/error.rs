//! Error types for the multi-select widget.
//!
//! None of these are fatal. Settings errors only arise from unparseable
//! JSON; interaction errors report activations that do not correspond to an
//! option; [`Declined`] hands the control back when a widget cannot bind.

use std::fmt;

/// Result type alias for settings operations.
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while reading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings text is not valid JSON.
    #[error("Settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported by the toggle handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    /// The activated row's correlation index has no option.
    #[error("No option at index {index} (option count {len})")]
    UnknownRow { index: usize, len: usize },
}

/// Why a widget refused to bind to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeclineReason {
    /// Another widget is already bound to the control.
    #[error("Control is already bound to a multi-select widget")]
    AlreadyBound,
    /// The control does not accept multiple values.
    #[error("Control does not accept multiple values")]
    NotMultiple,
}

/// A refused bind, carrying the untouched control back to the caller.
pub struct Declined<C> {
    reason: DeclineReason,
    control: C,
}

impl<C> Declined<C> {
    pub(crate) fn new(reason: DeclineReason, control: C) -> Self {
        Self { reason, control }
    }

    /// Why the bind was refused.
    pub fn reason(&self) -> DeclineReason {
        self.reason
    }

    /// Takes the control back.
    pub fn into_control(self) -> C {
        self.control
    }
}

impl<C> fmt::Debug for Declined<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declined").field("reason", &self.reason).finish_non_exhaustive()
    }
}

impl<C> fmt::Display for Declined<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multi-select declined to bind: {}", self.reason)
    }
}

impl<C> std::error::Error for Declined<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}
