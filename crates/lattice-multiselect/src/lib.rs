//! Lattice Multiselect - a dual-pane replacement for multi-value selection
//! controls.
//!
//! The widget binds to an authoritative [`SelectControl`](control::SelectControl)
//! and presents its options as two panes: every option (filtered by a search
//! query, grouped as in the source) on one side and the selected options on
//! the other. Activating a row toggles its option in the control; a
//! configurable limit disables the remaining options once enough are picked.
//!
//! # Example
//!
//! ```
//! use lattice_multiselect::prelude::*;
//!
//! let mut control = MemorySelect::new();
//! let fruit = control.add_group("Fruit");
//! control.push(OptionSnapshot::new("apple", "Apple").with_group(fruit.clone()));
//! control.push(OptionSnapshot::new("pear", "Pear").with_group(fruit));
//! control.push(OptionSnapshot::new("kale", "Kale"));
//!
//! let mut widget = MultiSelectBuilder::new()
//!     .settings(Settings::builder().limit(1).build())
//!     .on_limit_reached(|event| println!("limit of {} reached", event.limit))
//!     .attach(control)
//!     .unwrap();
//!
//! widget.handle(SelectEvent::Activate(RowActivation::click(0)));
//!
//! // Pear and Kale are now locked.
//! assert!(widget.limit_state().is_active());
//! assert!(widget.frame().projection.available_rows().skip(1).all(|row| row.disabled));
//! ```

pub mod control;
pub mod controller;
mod debug;
mod error;
pub mod interaction;
pub mod limit;
pub mod model;
pub mod projection;
pub mod settings;

pub use lattice_multiselect_core::logging;
pub use lattice_multiselect_core::{ConnectionGuard, ConnectionId, Signal};

pub use error::{DeclineReason, Declined, InteractionError, SettingsError, SettingsResult};

/// Commonly used types.
pub mod prelude {
    pub use crate::control::{MemorySelect, OptionGroup, OptionSnapshot, SelectControl, SharedControl};
    pub use crate::controller::{MultiSelect, MultiSelectBuilder, RenderFrame, SearchBox, SelectEvent};
    pub use crate::error::{DeclineReason, Declined, InteractionError};
    pub use crate::interaction::{Key, MouseButton, RowActivation, ToggleOutcome};
    pub use crate::limit::{LimitReached, SelectionLimit};
    pub use crate::projection::{AvailableNode, GroupNode, Projection, Row};
    pub use crate::settings::Settings;
    pub use lattice_multiselect_core::Signal;
}
