//! Option model adapter.
//!
//! [`OptionModel`] wraps a [`SelectControl`] and is the only writer of the
//! authoritative option flags. It also remembers each option's *origin
//! disabled* state: the `disabled` flag as it was when the widget was
//! initialized. The limit policy uses that snapshot to tell options it
//! disabled itself apart from options the host disabled on purpose.

use lattice_multiselect_core::logging::targets;

use crate::control::{OptionGroup, SelectControl};

/// One selectable item, as seen by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Position in the control; the correlation key for rendered rows.
    pub index: usize,
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether the option is selected.
    pub selected: bool,
    /// Whether the option is disabled right now.
    pub disabled: bool,
    /// Whether the option was disabled when the widget was initialized.
    pub origin_disabled: bool,
    /// The enclosing group, if any.
    pub group: Option<OptionGroup>,
    /// Style classes of the option.
    pub classes: Vec<String>,
}

/// Adapter over the authoritative control.
#[derive(Debug)]
pub struct OptionModel<C> {
    control: C,
    origin_disabled: Vec<bool>,
    captured: bool,
}

impl<C: SelectControl> OptionModel<C> {
    /// Wraps a control. Origin state is not captured yet.
    pub fn new(control: C) -> Self {
        Self {
            control,
            origin_disabled: Vec::new(),
            captured: false,
        }
    }

    /// Stamps every option's origin-disabled flag from its current state.
    ///
    /// Only the first call has an effect; returns `true` if this call
    /// performed the capture.
    pub fn capture_origin_disabled(&mut self) -> bool {
        if self.captured {
            tracing::warn!(target: targets::MODEL, "origin-disabled state already captured, ignoring");
            return false;
        }

        self.origin_disabled = self.control.options().iter().map(|o| o.disabled).collect();
        self.captured = true;
        tracing::debug!(
            target: targets::MODEL,
            options = self.origin_disabled.len(),
            origin_disabled = self.origin_disabled.iter().filter(|d| **d).count(),
            "captured origin-disabled state"
        );
        true
    }

    /// Whether the origin snapshot has been taken.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Brings the origin snapshot in line with the control's option count.
    ///
    /// The option set is not supposed to change size while bound. If it
    /// does, appended options are snapshotted from their current `disabled`
    /// flag and removed ones are forgotten.
    pub fn reconcile(&mut self) {
        if !self.captured {
            return;
        }

        let count = self.control.option_count();
        let known = self.origin_disabled.len();
        if count == known {
            return;
        }

        tracing::warn!(
            target: targets::MODEL,
            known,
            count,
            "option count changed while bound; extending origin snapshot"
        );

        if count < known {
            self.origin_disabled.truncate(count);
        } else {
            for index in known..count {
                let disabled = self.control.option(index).is_some_and(|o| o.disabled);
                self.origin_disabled.push(disabled);
            }
        }
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.control.option_count()
    }

    /// Returns `true` if the control has no options.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All options in authoritative order.
    pub fn list(&self) -> Vec<SelectOption> {
        self.control
            .options()
            .into_iter()
            .enumerate()
            .map(|(index, snapshot)| SelectOption {
                index,
                origin_disabled: self.origin_disabled(index),
                value: snapshot.value,
                label: snapshot.label,
                selected: snapshot.selected,
                disabled: snapshot.disabled,
                group: snapshot.group,
                classes: snapshot.classes,
            })
            .collect()
    }

    /// The option at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<SelectOption> {
        self.control.option(index).map(|snapshot| SelectOption {
            index,
            origin_disabled: self.origin_disabled(index),
            value: snapshot.value,
            label: snapshot.label,
            selected: snapshot.selected,
            disabled: snapshot.disabled,
            group: snapshot.group,
            classes: snapshot.classes,
        })
    }

    /// Returns `false` iff the option is disabled.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn is_selectable(&self, index: usize) -> bool {
        match self.control.option(index) {
            Some(option) => !option.disabled,
            None => panic!("option index {index} out of range (len {})", self.len()),
        }
    }

    /// The origin-disabled flag of an option (`false` before capture).
    pub fn origin_disabled(&self, index: usize) -> bool {
        self.origin_disabled.get(index).copied().unwrap_or(false)
    }

    /// Writes the selected flag.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_selected(&mut self, index: usize, selected: bool) {
        self.check_index(index);
        self.control.set_selected(index, selected);
    }

    /// Writes the disabled flag.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_disabled(&mut self, index: usize, disabled: bool) {
        self.check_index(index);
        self.control.set_disabled(index, disabled);
    }

    /// Number of selected options.
    pub fn selected_count(&self) -> usize {
        self.control.options().iter().filter(|o| o.selected).count()
    }

    /// Values of the selected options in order.
    pub fn selected_values(&self) -> Vec<String> {
        self.control
            .options()
            .into_iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect()
    }

    /// The wrapped control.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// Mutable access to the wrapped control.
    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    /// Unwraps the control.
    pub fn into_control(self) -> C {
        self.control
    }

    fn check_index(&self, index: usize) {
        let len = self.len();
        assert!(index < len, "option index {index} out of range (len {len})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{MemorySelect, OptionSnapshot};

    fn model() -> OptionModel<MemorySelect> {
        OptionModel::new(MemorySelect::with_options([
            OptionSnapshot::new("a", "Alpha"),
            OptionSnapshot::new("b", "Beta").with_disabled(true),
            OptionSnapshot::new("c", "Gamma").with_selected(true),
        ]))
    }

    #[test]
    fn test_list_preserves_order_and_flags() {
        let model = model();
        let options = model.list();

        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "a");
        assert_eq!(options[1].index, 1);
        assert!(options[1].disabled);
        assert!(options[2].selected);
    }

    #[test]
    fn test_capture_origin_disabled_once() {
        let mut model = model();
        assert!(!model.origin_disabled(1));

        assert!(model.capture_origin_disabled());
        assert!(model.origin_disabled(1));
        assert!(!model.origin_disabled(0));

        // Later changes do not move the snapshot.
        model.set_disabled(0, true);
        model.set_disabled(1, false);
        assert!(!model.capture_origin_disabled());
        assert!(!model.origin_disabled(0));
        assert!(model.origin_disabled(1));
    }

    #[test]
    fn test_is_selectable() {
        let model = model();
        assert!(model.is_selectable(0));
        assert!(!model.is_selectable(1));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_selected_out_of_range() {
        let mut model = model();
        model.set_selected(10, true);
    }

    #[test]
    fn test_selected_values() {
        let mut model = model();
        model.set_selected(0, true);

        assert_eq!(model.selected_count(), 2);
        assert_eq!(model.selected_values(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_reconcile_appended_options() {
        let mut model = model();
        model.capture_origin_disabled();

        model
            .control_mut()
            .push(OptionSnapshot::new("d", "Delta").with_disabled(true));
        model.reconcile();

        assert!(model.origin_disabled(3));
        assert!(model.get(3).is_some_and(|o| o.origin_disabled));
    }
}
