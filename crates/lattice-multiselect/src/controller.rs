//! Synchronization controller.
//!
//! [`MultiSelect`] binds one [`SelectControl`] and keeps the rendered two-pane
//! view consistent with it. Every state change goes through the same
//! recompute pass:
//!
//! ```text
//!   event ──> Idle ──> Recomputing ──> Idle
//!                      │ limit policy
//!                      │ projection
//!                      └ publish RenderFrame
//! ```
//!
//! Three kinds of events trigger a recompute: an external change of the
//! control, new search input, and a toggle from a row activation. A toggle
//! additionally emits [`MultiSelect::changed`] with the new selection.
//!
//! Frames are published wholesale: each [`RenderFrame`] describes the whole
//! view, so a renderer may drop intermediate frames and draw only the latest.
//!
//! # Example
//!
//! ```
//! use lattice_multiselect::control::{MemorySelect, OptionSnapshot};
//! use lattice_multiselect::controller::MultiSelect;
//! use lattice_multiselect::interaction::RowActivation;
//! use lattice_multiselect::settings::Settings;
//!
//! let control = MemorySelect::with_options([
//!     OptionSnapshot::new("a", "Apple"),
//!     OptionSnapshot::new("b", "Banana"),
//! ]);
//!
//! let mut widget = MultiSelect::attach(control, Settings::default()).unwrap();
//!
//! let mut click = RowActivation::click(1);
//! widget.activate(&mut click);
//!
//! assert!(click.is_accepted());
//! assert_eq!(widget.selected_values(), vec!["b".to_string()]);
//! assert_eq!(widget.frame().projection.selected.len(), 1);
//! ```

use std::sync::Arc;

use lattice_multiselect_core::logging::{span_names, targets};
use lattice_multiselect_core::{PerfSpan, Signal};

use crate::control::SelectControl;
use crate::error::{DeclineReason, Declined, InteractionError};
use crate::interaction::{self, RowActivation, ToggleOutcome};
use crate::limit::{LimitPolicy, LimitReached, LimitState, LimitTransition};
use crate::model::OptionModel;
use crate::projection::{self, Projection};
use crate::settings::Settings;

// ============================================================================
// Render frames
// ============================================================================

/// The search box of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    /// Placeholder text, also used as the box's title.
    pub placeholder: String,
    /// Current query.
    pub query: String,
}

impl SearchBox {
    /// Title (tooltip) of the search box.
    pub fn title(&self) -> &str {
        &self.placeholder
    }
}

/// What triggered a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeCause {
    /// Initial render after binding.
    Attach,
    /// The control was changed outside the widget.
    ExternalChange,
    /// The search query changed.
    Search,
    /// A row was toggled.
    Toggle,
}

/// A complete description of the widget's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// Increases by one with every published frame, starting at 1.
    pub generation: u64,
    /// What triggered this frame.
    pub cause: RecomputeCause,
    /// The two panes.
    pub projection: Projection,
    /// The search box, when search is enabled.
    pub search: Option<SearchBox>,
    /// Whether the selection limit is currently holding options disabled.
    pub limit_active: bool,
}

impl RenderFrame {
    fn empty() -> Self {
        Self {
            generation: 0,
            cause: RecomputeCause::Attach,
            projection: Projection::default(),
            search: None,
            limit_active: false,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Input delivered to a widget by its host.
#[derive(Debug, Clone)]
pub enum SelectEvent {
    /// The control's options or flags were changed by someone else.
    ExternalChange,
    /// The text of the search box changed.
    SearchInput(String),
    /// A pointer or key event on the widget.
    Activate(RowActivation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Recomputing,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`MultiSelect`].
///
/// Slots connected here are in place before the initial render, so they see
/// the first frame and a limit reached at initialization.
#[derive(Debug, Default)]
pub struct MultiSelectBuilder {
    settings: Settings,
    rendered: Signal<Arc<RenderFrame>>,
    changed: Signal<Vec<String>>,
    limit_reached: Signal<LimitReached>,
}

impl MultiSelectBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the widget settings.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Connects a slot to [`MultiSelect::rendered`].
    pub fn on_rendered<F>(self, slot: F) -> Self
    where
        F: Fn(&Arc<RenderFrame>) + Send + Sync + 'static,
    {
        self.rendered.connect(slot);
        self
    }

    /// Connects a slot to [`MultiSelect::changed`].
    pub fn on_changed<F>(self, slot: F) -> Self
    where
        F: Fn(&Vec<String>) + Send + Sync + 'static,
    {
        self.changed.connect(slot);
        self
    }

    /// Connects the limit-reached callback.
    pub fn on_limit_reached<F>(self, slot: F) -> Self
    where
        F: Fn(&LimitReached) + Send + Sync + 'static,
    {
        self.limit_reached.connect(slot);
        self
    }

    /// Binds the widget to `control` and renders the initial frame.
    ///
    /// # Errors
    ///
    /// Returns [`Declined`], holding the untouched control, if the control
    /// is already bound or does not accept multiple values.
    pub fn attach<C: SelectControl>(self, mut control: C) -> Result<MultiSelect<C>, Declined<C>> {
        let _perf = PerfSpan::new(span_names::ATTACH);

        if control.is_bound() {
            tracing::debug!(target: targets::CONTROLLER, "control already bound, declining");
            return Err(Declined::new(DeclineReason::AlreadyBound, control));
        }
        if !control.is_multiple() {
            tracing::debug!(target: targets::CONTROLLER, "control is single-valued, declining");
            return Err(Declined::new(DeclineReason::NotMultiple, control));
        }

        control.mark_bound();

        let mut model = OptionModel::new(control);
        model.capture_origin_disabled();

        let mut widget = MultiSelect {
            model,
            policy: LimitPolicy::new(self.settings.limit),
            settings: self.settings,
            limit_state: LimitState::default(),
            query: String::new(),
            phase: Phase::Idle,
            generation: 0,
            frame: Arc::new(RenderFrame::empty()),
            rendered: self.rendered,
            changed: self.changed,
            limit_reached: self.limit_reached,
        };

        tracing::debug!(
            target: targets::CONTROLLER,
            options = widget.model.len(),
            limit = %widget.settings.limit,
            "attached multi-select"
        );

        widget.recompute(RecomputeCause::Attach);
        Ok(widget)
    }
}

// ============================================================================
// MultiSelect
// ============================================================================

/// A dual-pane multi-select widget bound to one control.
#[derive(Debug)]
pub struct MultiSelect<C> {
    model: OptionModel<C>,
    settings: Settings,
    policy: LimitPolicy,
    limit_state: LimitState,
    query: String,
    phase: Phase,
    generation: u64,
    frame: Arc<RenderFrame>,

    /// Emitted with every new frame.
    pub rendered: Signal<Arc<RenderFrame>>,
    /// Emitted with the selected values (in option order) after a toggle.
    pub changed: Signal<Vec<String>>,
    /// Emitted each time the selection count reaches the limit.
    pub limit_reached: Signal<LimitReached>,
}

impl<C: SelectControl> MultiSelect<C> {
    /// Binds a widget to `control` with the given settings.
    ///
    /// # Errors
    ///
    /// See [`MultiSelectBuilder::attach`].
    pub fn attach(control: C, settings: Settings) -> Result<Self, Declined<C>> {
        MultiSelectBuilder::new().settings(settings).attach(control)
    }

    /// Dispatches a host event.
    ///
    /// Returns `true` if the event was accepted and the host must suppress
    /// its default handling.
    pub fn handle(&mut self, event: SelectEvent) -> bool {
        match event {
            SelectEvent::ExternalChange => {
                self.external_change();
                false
            }
            SelectEvent::SearchInput(query) => {
                self.set_search_query(query);
                false
            }
            SelectEvent::Activate(mut activation) => {
                self.activate(&mut activation);
                activation.is_accepted()
            }
        }
    }

    /// Re-reads the control after it was changed outside the widget.
    pub fn external_change(&mut self) {
        self.model.reconcile();
        self.recompute(RecomputeCause::ExternalChange);
    }

    /// Mutates the control and then refreshes the view.
    pub fn update_control<R>(&mut self, f: impl FnOnce(&mut C) -> R) -> R {
        let result = f(self.model.control_mut());
        self.external_change();
        result
    }

    /// Sets the search query and refreshes the view.
    ///
    /// Ignored when search is disabled.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        if !self.settings.enable_search {
            tracing::debug!(target: targets::CONTROLLER, "search disabled, ignoring query");
            return;
        }

        self.query = query.into();
        self.recompute(RecomputeCause::Search);
    }

    /// Handles a pointer or key event.
    ///
    /// Activations that target a row with the primary button or an action
    /// key are accepted and toggle that row. Returns the toggle outcome, or
    /// `None` if the event was not intercepted or named an unknown row.
    pub fn activate(&mut self, activation: &mut RowActivation) -> Option<ToggleOutcome> {
        let index = activation.target()?;
        activation.base.accept();

        match self.toggle(index) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::warn!(target: targets::INTERACTION, error = %err, "ignoring activation");
                None
            }
        }
    }

    /// Toggles the option at `index`.
    ///
    /// A successful toggle recomputes the view and emits [`Self::changed`].
    /// A rejected toggle (disabled option) does neither.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::UnknownRow`] if no option has that index.
    pub fn toggle(&mut self, index: usize) -> Result<ToggleOutcome, InteractionError> {
        let outcome = interaction::toggle(&mut self.model, index)?;

        if outcome.is_toggled() {
            self.recompute(RecomputeCause::Toggle);
            self.changed.emit(self.model.selected_values());
        }

        Ok(outcome)
    }

    /// The most recent frame.
    pub fn frame(&self) -> Arc<RenderFrame> {
        Arc::clone(&self.frame)
    }

    /// The current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The widget settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The limit policy state of this widget.
    pub fn limit_state(&self) -> LimitState {
        self.limit_state
    }

    /// Values of the selected options in order.
    pub fn selected_values(&self) -> Vec<String> {
        self.model.selected_values()
    }

    /// The option model.
    pub fn model(&self) -> &OptionModel<C> {
        &self.model
    }

    /// The bound control.
    pub fn control(&self) -> &C {
        self.model.control()
    }

    /// Drops the widget and returns the control.
    ///
    /// The control stays marked as bound.
    pub fn into_control(self) -> C {
        self.model.into_control()
    }

    #[tracing::instrument(skip(self), target = "lattice_multiselect::controller", level = "debug")]
    fn recompute(&mut self, cause: RecomputeCause) {
        debug_assert_eq!(self.phase, Phase::Idle, "re-entrant recompute");
        if self.phase == Phase::Recomputing {
            tracing::error!(target: targets::CONTROLLER, ?cause, "re-entrant recompute ignored");
            return;
        }
        self.phase = Phase::Recomputing;
        let _perf = PerfSpan::new(span_names::RECOMPUTE);

        let transition = self.policy.apply(&mut self.model, &mut self.limit_state);
        let options = self.model.list();
        let projection = projection::project(&options, &self.query, &self.settings);

        let search = self.settings.enable_search.then(|| SearchBox {
            placeholder: self.settings.search_placeholder.clone(),
            query: self.query.clone(),
        });

        self.generation += 1;
        let frame = Arc::new(RenderFrame {
            generation: self.generation,
            cause,
            projection,
            search,
            limit_active: self.limit_state.is_active(),
        });
        self.frame = Arc::clone(&frame);
        self.phase = Phase::Idle;

        tracing::trace!(target: targets::CONTROLLER, generation = self.generation, "publishing frame");
        self.rendered.emit(frame);

        if let LimitTransition::Locked(reached) = transition {
            self.limit_reached.emit(reached);
        }
    }
}
