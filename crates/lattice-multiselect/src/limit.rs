//! Maximum-selection-count policy.
//!
//! When the number of selected options reaches the configured limit, every
//! unselected option is disabled so it cannot be picked. When the count
//! drops back below the limit, options are re-enabled, except those that
//! were already disabled when the widget was initialized.
//!
//! The policy is a two-state machine:
//!
//! ```text
//!             count == limit
//!   ┌──────┐ ───────────────> ┌────────┐
//!   │ Open │                  │ Locked │
//!   └──────┘ <─────────────── └────────┘
//!              count < limit
//! ```
//!
//! Which state a widget is in is tracked by its own [`LimitState`].

use std::fmt;
use std::num::NonZeroUsize;

use lattice_multiselect_core::logging::targets;
use serde::{Deserialize, Deserializer, Serialize};

use crate::control::SelectControl;
use crate::model::OptionModel;
use crate::settings::parse_limit;

/// The configured maximum number of selected options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i64")]
pub enum SelectionLimit {
    /// Any number of options may be selected.
    #[default]
    Unlimited,
    /// At most this many options may be selected.
    AtMost(NonZeroUsize),
}

impl SelectionLimit {
    /// Creates a limit from a raw count; zero means unlimited.
    pub fn at_most(count: usize) -> Self {
        NonZeroUsize::new(count).map_or(Self::Unlimited, Self::AtMost)
    }

    /// The maximum, or `None` if unlimited.
    pub fn get(self) -> Option<usize> {
        match self {
            Self::Unlimited => None,
            Self::AtMost(n) => Some(n.get()),
        }
    }

    /// Returns `true` if no limit applies.
    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

/// Any value `<= 0` (including the conventional `-1`) is unlimited.
impl From<i64> for SelectionLimit {
    fn from(raw: i64) -> Self {
        usize::try_from(raw).map_or(Self::Unlimited, Self::at_most)
    }
}

impl From<SelectionLimit> for i64 {
    fn from(limit: SelectionLimit) -> Self {
        limit
            .get()
            .and_then(|n| i64::try_from(n).ok())
            .unwrap_or(-1)
    }
}

/// Accepts the same loose forms as settings JSON: integers, floats and
/// numeric strings. Anything unusable is unlimited.
impl<'de> Deserialize<'de> for SelectionLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(|value| parse_limit(&value))
    }
}

impl fmt::Display for SelectionLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => write!(f, "unlimited"),
            Self::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

/// Whether limit-induced disablement is currently in force.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitState {
    limit_active: bool,
}

impl LimitState {
    /// Returns `true` while the policy holds options disabled.
    pub fn is_active(&self) -> bool {
        self.limit_active
    }
}

/// Payload of the "limit reached" notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitReached {
    /// The configured maximum.
    pub limit: usize,
    /// Number of selected options when the limit was reached.
    pub selected: usize,
}

/// Outcome of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitTransition {
    /// No state change.
    Unchanged,
    /// The limit was just reached and unselected options were disabled.
    Locked(LimitReached),
    /// The count dropped below the limit and options were re-enabled.
    Unlocked,
}

/// Applies a [`SelectionLimit`] to an option model.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitPolicy {
    limit: SelectionLimit,
}

impl LimitPolicy {
    /// Creates a policy for the given limit.
    pub fn new(limit: SelectionLimit) -> Self {
        Self { limit }
    }

    /// The configured limit.
    pub fn limit(&self) -> SelectionLimit {
        self.limit
    }

    /// Evaluates the policy and updates `disabled` flags in place.
    ///
    /// Disabling is idempotent, so evaluating repeatedly at the limit is
    /// harmless; only the first evaluation reports [`LimitTransition::Locked`].
    pub fn apply<C: SelectControl>(
        &self,
        model: &mut OptionModel<C>,
        state: &mut LimitState,
    ) -> LimitTransition {
        let Some(limit) = self.limit.get() else {
            return LimitTransition::Unchanged;
        };

        let options = model.list();
        let selected = options.iter().filter(|o| o.selected).count();

        if selected == limit {
            let was_active = state.limit_active;
            state.limit_active = true;

            for option in options.iter().filter(|o| !o.selected && !o.disabled) {
                model.set_disabled(option.index, true);
            }

            if was_active {
                return LimitTransition::Unchanged;
            }

            tracing::debug!(target: targets::LIMIT, limit, selected, "selection limit reached");
            LimitTransition::Locked(LimitReached { limit, selected })
        } else if state.limit_active && selected < limit {
            for option in options.iter().filter(|o| o.disabled && !o.origin_disabled) {
                model.set_disabled(option.index, false);
            }
            state.limit_active = false;

            tracing::debug!(target: targets::LIMIT, limit, selected, "selection limit released");
            LimitTransition::Unlocked
        } else {
            LimitTransition::Unchanged
        }
    }
}
