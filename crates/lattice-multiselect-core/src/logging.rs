//! Logging and debugging facilities for lattice-multiselect.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output by subsystem
//! - [`TreeDebug`], a text visualizer for any hierarchy implementing [`DebugNode`]
//! - [`PerfSpan`], a guard that times an operation under a tracing span
//!
//! # Tracing Integration
//!
//! The crates only emit events; install a subscriber in your application to
//! see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_multiselect=debug")
//!     .init();
//! ```

/// Span names used throughout lattice-multiselect for tracing.
pub mod span_names {
    /// One recompute pass (limit policy + projection + render).
    pub const RECOMPUTE: &str = "lattice_multiselect::recompute";
    /// Widget initialization.
    pub const ATTACH: &str = "lattice_multiselect::attach";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_multiselect_core::signal";
    /// Performance spans.
    pub const PERF: &str = "lattice_multiselect::perf";
    /// Option model adapter target.
    pub const MODEL: &str = "lattice_multiselect::model";
    /// Limit policy target.
    pub const LIMIT: &str = "lattice_multiselect::limit";
    /// Projection target.
    pub const PROJECTION: &str = "lattice_multiselect::projection";
    /// Interaction (pointer/keyboard) target.
    pub const INTERACTION: &str = "lattice_multiselect::interaction";
    /// Synchronization controller target.
    pub const CONTROLLER: &str = "lattice_multiselect::controller";
    /// Settings parsing target.
    pub const SETTINGS: &str = "lattice_multiselect::settings";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact dash-prefixed representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show node kinds.
    pub show_kinds: bool,
    /// Whether to show state tags (selected, disabled, ...).
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_kinds: false,
            show_state: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_kinds: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_kinds: false,
            show_state: false,
            ..Default::default()
        }
    }

    /// Use the given tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }
}

/// A node that can be rendered by [`TreeDebug`].
pub trait DebugNode {
    /// Display name of the node.
    fn name(&self) -> String;

    /// Short kind tag, e.g. `"row"` or `"group"`.
    fn kind(&self) -> &'static str;

    /// Optional identifier shown in brackets.
    fn id(&self) -> Option<usize> {
        None
    }

    /// State tags shown after the name.
    fn state(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Child nodes in display order.
    fn children(&self) -> Vec<&dyn DebugNode> {
        Vec::new()
    }
}

/// Debug utility for visualizing hierarchies as text.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a tree starting at `root`.
    pub fn format(&self, root: &dyn DebugNode) -> String {
        let mut output = String::new();
        let mut ancestors = Vec::new();
        self.format_into(root, &mut ancestors, true, &mut output);
        output
    }

    fn format_into(
        &self,
        node: &dyn DebugNode,
        ancestors_last: &mut Vec<bool>,
        is_last: bool,
        output: &mut String,
    ) {
        let depth = ancestors_last.len();
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        output.push_str(&self.build_prefix(ancestors_last, is_last));

        let name = node.name();
        output.push_str(if name.is_empty() { "(unnamed)" } else { &name });

        if self.options.show_ids {
            if let Some(id) = node.id() {
                output.push_str(&format!(" [{id}]"));
            }
        }

        if self.options.show_kinds {
            output.push_str(&format!(" ({})", node.kind()));
        }

        if self.options.show_state {
            let state = node.state();
            if !state.is_empty() {
                output.push_str(&format!(" <{}>", state.join(", ")));
            }
        }

        output.push('\n');

        let children = node.children();
        let child_count = children.len();
        if depth > 0 {
            ancestors_last.push(is_last);
        } else {
            // The root has no connector of its own; children hang directly off it.
            ancestors_last.push(true);
        }
        for (i, child) in children.into_iter().enumerate() {
            self.format_into(child, ancestors_last, i + 1 == child_count, output);
        }
        ancestors_last.pop();
    }

    /// Build the prefix string for a tree node.
    fn build_prefix(&self, ancestors_last: &[bool], is_last: bool) -> String {
        let depth = ancestors_last.len();
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        // Skip the root entry; it never draws a vertical bar.
        for &ancestor_last in &ancestors_last[1..] {
            if ancestor_last || self.options.style == TreeStyle::Compact {
                prefix.push(' ');
            } else {
                prefix.push_str(branch);
            }
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }

        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time recompute passes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        name: &'static str,
        id: Option<usize>,
        children: Vec<Node>,
    }

    impl DebugNode for Node {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn kind(&self) -> &'static str {
            "node"
        }

        fn id(&self) -> Option<usize> {
            self.id
        }

        fn state(&self) -> Vec<&'static str> {
            if self.children.is_empty() { vec!["leaf"] } else { Vec::new() }
        }

        fn children(&self) -> Vec<&dyn DebugNode> {
            self.children.iter().map(|c| c as &dyn DebugNode).collect()
        }
    }

    fn leaf(name: &'static str, id: usize) -> Node {
        Node { name, id: Some(id), children: Vec::new() }
    }

    fn sample() -> Node {
        Node {
            name: "root",
            id: None,
            children: vec![
                leaf("a", 0),
                Node { name: "group", id: None, children: vec![leaf("b", 1), leaf("c", 2)] },
            ],
        }
    }

    #[test]
    fn test_tree_format_ascii() {
        let debug = TreeDebug::with_options(TreeFormatOptions::default().with_style(TreeStyle::Ascii));
        let output = debug.format(&sample());

        let expected = "root\n\
                        +-- a [0] <leaf>\n\
                        `-- group\n   \
                        +-- b [1] <leaf>\n   \
                        `-- c [2] <leaf>\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_tree_format_minimal() {
        let debug = TreeDebug::with_options(TreeFormatOptions::minimal());
        let output = debug.format(&sample());

        assert!(output.contains("group"));
        assert!(!output.contains('['));
        assert!(!output.contains("leaf"));
    }

    #[test]
    fn test_tree_format_max_depth() {
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let output = TreeDebug::with_options(options).format(&sample());

        assert!(output.contains("group"));
        assert!(!output.contains(" b"));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
