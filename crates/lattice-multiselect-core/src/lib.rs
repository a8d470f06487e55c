//! Core systems for lattice-multiselect.
//!
//! This crate provides the foundational pieces shared by the widget crate:
//!
//! - **Signal/Slot System**: Type-safe notification of render frames,
//!   selection changes and limit events
//! - **Logging**: Tracing targets, span names and tree visualization
//! - **Errors**: Core error types
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_multiselect_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::SignalError;
pub use logging::{DebugNode, PerfSpan, TreeDebug, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
