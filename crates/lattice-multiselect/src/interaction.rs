//! Pointer and keyboard activation of rows.
//!
//! A click with the primary button, or a press of an action key
//! ([`Key::Space`] or [`Key::Enter`]), on a rendered row toggles the option
//! behind it. Both inputs go through the same [`toggle`] operation.
//!
//! Activations the widget intercepts are *accepted*: the host must then
//! suppress its default handling (scrolling on Space, form submission on
//! Enter, focus changes on click). Activations on disabled rows are accepted
//! too, they just do not change anything.

use lattice_multiselect_core::logging::targets;

use crate::control::SelectControl;
use crate::error::InteractionError;
use crate::model::OptionModel;

/// Common data for activation events.
#[derive(Debug, Clone, Copy)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl Default for EventBase {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event; the host should skip its default handling.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Any other button.
    Other,
}

/// Keys the widget distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Space bar; toggles the focused row.
    Space,
    /// Enter/Return; toggles the focused row.
    Enter,
    /// A printable character.
    Character(char),
    /// Any other key.
    Other,
}

impl Key {
    /// Returns `true` for the keys that toggle a focused row.
    pub fn is_action_key(self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

/// What triggered an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationInput {
    /// A pointer click.
    Pointer(MouseButton),
    /// A key press.
    Key(Key),
}

/// A pointer or key event aimed at the widget.
#[derive(Debug, Clone, Copy)]
pub struct RowActivation {
    /// Base event data.
    pub base: EventBase,
    /// What was pressed.
    pub input: ActivationInput,
    /// Correlation index of the row under the event, if the target is a row.
    pub row: Option<usize>,
}

impl RowActivation {
    /// A primary-button click on a row.
    pub fn click(row: usize) -> Self {
        Self::new(ActivationInput::Pointer(MouseButton::Left), Some(row))
    }

    /// A key press on a row.
    pub fn key(row: usize, key: Key) -> Self {
        Self::new(ActivationInput::Key(key), Some(row))
    }

    /// An activation with an arbitrary input and optional target row.
    pub fn new(input: ActivationInput, row: Option<usize>) -> Self {
        Self {
            base: EventBase::new(),
            input,
            row,
        }
    }

    /// Whether the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base.is_accepted()
    }

    /// The row this activation toggles, or `None` if the widget does not
    /// intercept it (no row target, wrong button, non-action key).
    pub fn target(&self) -> Option<usize> {
        let triggers = match self.input {
            ActivationInput::Pointer(button) => button == MouseButton::Left,
            ActivationInput::Key(key) => key.is_action_key(),
        };
        if triggers { self.row } else { None }
    }
}

/// Outcome of a toggle on an existing option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The selected flag was flipped.
    Toggled {
        /// Correlation index of the option.
        index: usize,
        /// The new selected state.
        selected: bool,
    },
    /// The option is disabled; nothing changed.
    Rejected,
}

impl ToggleOutcome {
    /// Returns `true` if the option's state changed.
    pub fn is_toggled(self) -> bool {
        matches!(self, Self::Toggled { .. })
    }
}

/// Flips the selected flag of the option at `index` unless it is disabled.
///
/// # Errors
///
/// Returns [`InteractionError::UnknownRow`] if no option has that index.
pub fn toggle<C: SelectControl>(
    model: &mut OptionModel<C>,
    index: usize,
) -> Result<ToggleOutcome, InteractionError> {
    let option = model.get(index).ok_or(InteractionError::UnknownRow {
        index,
        len: model.len(),
    })?;

    if option.disabled {
        tracing::debug!(target: targets::INTERACTION, index, "toggle rejected: option disabled");
        return Ok(ToggleOutcome::Rejected);
    }

    let selected = !option.selected;
    model.set_selected(index, selected);
    tracing::debug!(target: targets::INTERACTION, index, selected, value = %option.value, "toggled option");

    Ok(ToggleOutcome::Toggled { index, selected })
}
