//! Host binding for the authoritative selection control.
//!
//! A [`SelectControl`] is whatever owns the real selection state: a native
//! list box, a DOM `<select multiple>`, a form field in a TUI. The widget
//! reads ordered [`OptionSnapshot`]s from it and writes `selected`/`disabled`
//! flags back.
//!
//! [`MemorySelect`] is a plain in-memory control, handy for tests and for
//! hosts that keep selection state in their own structures.
//!
//! # Example
//!
//! ```
//! use lattice_multiselect::control::{MemorySelect, OptionSnapshot, SelectControl};
//!
//! let mut control = MemorySelect::new();
//! control.push(OptionSnapshot::new("apple", "Apple"));
//!
//! let citrus = control.add_group("Citrus");
//! control.push(OptionSnapshot::new("lemon", "Lemon").with_group(citrus.clone()));
//! control.push(OptionSnapshot::new("lime", "Lime").with_group(citrus));
//!
//! assert_eq!(control.option_count(), 3);
//! assert!(control.is_multiple());
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

/// Identity of an option group.
///
/// Groups are compared by key; two groups with the same label but different
/// keys are distinct. An empty label means the group has no caption.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionGroup {
    key: u32,
    label: String,
}

impl OptionGroup {
    /// Creates a group with an explicit key.
    pub fn new(key: u32, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }

    /// The identity key of the group.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// The caption of the group (may be empty).
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A point-in-time copy of one option as the host control sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSnapshot {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether the option is currently selected.
    pub selected: bool,
    /// Whether the option is currently disabled.
    pub disabled: bool,
    /// The enclosing group, if any.
    pub group: Option<OptionGroup>,
    /// Style classes carried over to rendered rows.
    pub classes: Vec<String>,
}

impl OptionSnapshot {
    /// Creates an enabled, unselected, ungrouped option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
            disabled: false,
            group: None,
            classes: Vec::new(),
        }
    }

    /// Sets the selected flag.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Sets the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Places the option inside a group.
    pub fn with_group(mut self, group: OptionGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// Adds a style class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// The authoritative control a multi-select widget is bound to.
///
/// Indices are positions in the ordered option list. Write operations with
/// an out-of-range index are programming errors; implementations may panic.
pub trait SelectControl {
    /// Returns `true` if the control accepts multiple selected values.
    fn is_multiple(&self) -> bool;

    /// Number of options.
    fn option_count(&self) -> usize;

    /// Snapshot of the option at `index`.
    fn option(&self, index: usize) -> Option<OptionSnapshot>;

    /// Snapshot of every option in order.
    fn options(&self) -> Vec<OptionSnapshot> {
        (0..self.option_count()).filter_map(|i| self.option(i)).collect()
    }

    /// Writes the selected flag of an option.
    fn set_selected(&mut self, index: usize, selected: bool);

    /// Writes the disabled flag of an option.
    fn set_disabled(&mut self, index: usize, disabled: bool);

    /// Returns `true` if a widget has already been bound to this control.
    fn is_bound(&self) -> bool;

    /// Marks the control as bound. Called once during initialization.
    fn mark_bound(&mut self);
}

/// A simple in-memory selection control.
#[derive(Debug, Clone)]
pub struct MemorySelect {
    options: Vec<OptionSnapshot>,
    multiple: bool,
    bound: bool,
    next_group_key: u32,
}

impl Default for MemorySelect {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySelect {
    /// Creates an empty multi-valued control.
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            multiple: true,
            bound: false,
            next_group_key: 0,
        }
    }

    /// Creates an empty single-valued control.
    ///
    /// Widgets decline to bind to it.
    pub fn single() -> Self {
        Self {
            multiple: false,
            ..Self::new()
        }
    }

    /// Creates a multi-valued control from a list of options.
    pub fn with_options(options: impl IntoIterator<Item = OptionSnapshot>) -> Self {
        let mut control = Self::new();
        control.extend(options);
        control
    }

    /// Allocates a new group with a unique key.
    pub fn add_group(&mut self, label: impl Into<String>) -> OptionGroup {
        let group = OptionGroup::new(self.next_group_key, label);
        self.next_group_key = self.next_group_key.saturating_add(1);
        group
    }

    /// Appends an option.
    pub fn push(&mut self, option: OptionSnapshot) {
        if let Some(group) = &option.group {
            self.next_group_key = self.next_group_key.max(group.key().saturating_add(1));
        }
        self.options.push(option);
    }

    /// Appends several options.
    pub fn extend(&mut self, options: impl IntoIterator<Item = OptionSnapshot>) {
        for option in options {
            self.push(option);
        }
    }

    /// Values of the selected options in order.
    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.clone())
            .collect()
    }

    /// Read-only view of all options.
    pub fn as_slice(&self) -> &[OptionSnapshot] {
        &self.options
    }

    fn slot_mut(&mut self, index: usize) -> &mut OptionSnapshot {
        let len = self.options.len();
        match self.options.get_mut(index) {
            Some(option) => option,
            None => panic!("option index {index} out of range (len {len})"),
        }
    }
}

impl SelectControl for MemorySelect {
    fn is_multiple(&self) -> bool {
        self.multiple
    }

    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn option(&self, index: usize) -> Option<OptionSnapshot> {
        self.options.get(index).cloned()
    }

    fn options(&self) -> Vec<OptionSnapshot> {
        self.options.clone()
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        self.slot_mut(index).selected = selected;
    }

    fn set_disabled(&mut self, index: usize, disabled: bool) {
        self.slot_mut(index).disabled = disabled;
    }

    fn is_bound(&self) -> bool {
        self.bound
    }

    fn mark_bound(&mut self) {
        self.bound = true;
    }
}

/// A control shared between the widget and the host.
///
/// The host keeps a clone of the `Arc` to mutate the control externally and
/// then tells the widget via `MultiSelect::external_change`.
pub type SharedControl<C> = Arc<RwLock<C>>;

impl<C: SelectControl> SelectControl for Arc<RwLock<C>> {
    fn is_multiple(&self) -> bool {
        self.read().is_multiple()
    }

    fn option_count(&self) -> usize {
        self.read().option_count()
    }

    fn option(&self, index: usize) -> Option<OptionSnapshot> {
        self.read().option(index)
    }

    fn options(&self) -> Vec<OptionSnapshot> {
        self.read().options()
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        self.write().set_selected(index, selected);
    }

    fn set_disabled(&mut self, index: usize, disabled: bool) {
        self.write().set_disabled(index, disabled);
    }

    fn is_bound(&self) -> bool {
        self.read().is_bound()
    }

    fn mark_bound(&mut self) {
        self.write().mark_bound();
    }
}
