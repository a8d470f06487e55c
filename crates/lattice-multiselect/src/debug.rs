//! Text dumps of render frames for diagnostics.
//!
//! ```
//! use lattice_multiselect::control::{MemorySelect, OptionSnapshot};
//! use lattice_multiselect::controller::MultiSelect;
//! use lattice_multiselect::settings::Settings;
//!
//! let control = MemorySelect::with_options([OptionSnapshot::new("a", "Apple")]);
//! let widget = MultiSelect::attach(control, Settings::default()).unwrap();
//!
//! let dump = widget.frame().debug_tree();
//! assert!(dump.contains("Apple"));
//! ```

use lattice_multiselect_core::{DebugNode, TreeDebug, TreeFormatOptions};

use crate::controller::{RenderFrame, SearchBox};
use crate::projection::{AvailableNode, GroupNode, Row};

impl DebugNode for Row {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn kind(&self) -> &'static str {
        "row"
    }

    fn id(&self) -> Option<usize> {
        Some(self.index)
    }

    fn state(&self) -> Vec<&'static str> {
        let mut state = Vec::new();
        if self.selected {
            state.push("selected");
        }
        if self.disabled {
            state.push("disabled");
        }
        state
    }
}

impl DebugNode for GroupNode {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn kind(&self) -> &'static str {
        "group"
    }

    fn state(&self) -> Vec<&'static str> {
        if self.hidden { vec!["hidden"] } else { Vec::new() }
    }

    fn children(&self) -> Vec<&dyn DebugNode> {
        self.rows.iter().map(|row| row as &dyn DebugNode).collect()
    }
}

impl DebugNode for AvailableNode {
    fn name(&self) -> String {
        match self {
            Self::Row(row) => row.name(),
            Self::Group(group) => group.name(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Row(row) => row.kind(),
            Self::Group(group) => group.kind(),
        }
    }

    fn id(&self) -> Option<usize> {
        match self {
            Self::Row(row) => row.id(),
            Self::Group(_) => None,
        }
    }

    fn state(&self) -> Vec<&'static str> {
        match self {
            Self::Row(row) => row.state(),
            Self::Group(group) => group.state(),
        }
    }

    fn children(&self) -> Vec<&dyn DebugNode> {
        match self {
            Self::Row(_) => Vec::new(),
            Self::Group(group) => group.children(),
        }
    }
}

impl DebugNode for SearchBox {
    fn name(&self) -> String {
        format!("search {:?}", self.query)
    }

    fn kind(&self) -> &'static str {
        "search"
    }
}

enum PaneContent<'a> {
    Available(&'a [AvailableNode]),
    Selected(&'a [Row]),
}

struct Pane<'a> {
    caption: String,
    content: PaneContent<'a>,
}

impl DebugNode for Pane<'_> {
    fn name(&self) -> String {
        self.caption.clone()
    }

    fn kind(&self) -> &'static str {
        "pane"
    }

    fn children(&self) -> Vec<&dyn DebugNode> {
        match self.content {
            PaneContent::Available(nodes) => nodes.iter().map(|n| n as &dyn DebugNode).collect(),
            PaneContent::Selected(rows) => rows.iter().map(|r| r as &dyn DebugNode).collect(),
        }
    }
}

struct FrameNode<'a> {
    frame: &'a RenderFrame,
    panes: [Pane<'a>; 2],
}

impl<'a> FrameNode<'a> {
    fn new(frame: &'a RenderFrame) -> Self {
        let headers = frame.projection.headers.as_ref();
        let caption = |header: Option<&String>, fallback: &str| {
            header.map_or_else(|| fallback.to_string(), |h| format!("{fallback}: {h}"))
        };

        Self {
            frame,
            panes: [
                Pane {
                    caption: caption(headers.map(|h| &h.non_selected), "available"),
                    content: PaneContent::Available(&frame.projection.available),
                },
                Pane {
                    caption: caption(headers.map(|h| &h.selected), "selected"),
                    content: PaneContent::Selected(&frame.projection.selected),
                },
            ],
        }
    }
}

impl DebugNode for FrameNode<'_> {
    fn name(&self) -> String {
        format!("frame {}", self.frame.generation)
    }

    fn kind(&self) -> &'static str {
        "frame"
    }

    fn state(&self) -> Vec<&'static str> {
        if self.frame.limit_active { vec!["limit"] } else { Vec::new() }
    }

    fn children(&self) -> Vec<&dyn DebugNode> {
        let mut children: Vec<&dyn DebugNode> = Vec::with_capacity(3);
        if let Some(search) = &self.frame.search {
            children.push(search);
        }
        children.extend(self.panes.iter().map(|p| p as &dyn DebugNode));
        children
    }
}

impl RenderFrame {
    /// Formats the frame as a tree with default options.
    pub fn debug_tree(&self) -> String {
        self.debug_tree_with(TreeFormatOptions::default())
    }

    /// Formats the frame as a tree with custom options.
    pub fn debug_tree_with(&self, options: TreeFormatOptions) -> String {
        TreeDebug::with_options(options).format(&FrameNode::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{MemorySelect, OptionSnapshot};
    use crate::controller::MultiSelect;
    use crate::settings::Settings;
    use lattice_multiselect_core::TreeStyle;

    #[test]
    fn test_frame_tree_ascii() {
        let mut control = MemorySelect::new();
        control.push(OptionSnapshot::new("a", "Apple").with_selected(true));
        let citrus = control.add_group("Citrus");
        control.push(OptionSnapshot::new("l", "Lemon").with_group(citrus).with_disabled(true));

        let settings = Settings::builder().headers("Available", "Chosen").build();
        let widget = MultiSelect::attach(control, settings).unwrap();

        let output = widget
            .frame()
            .debug_tree_with(TreeFormatOptions::default().with_style(TreeStyle::Ascii));

        let expected = [
            "frame 1",
            "+-- search \"\"",
            "+-- available: Available",
            "|  +-- Apple [0] <selected>",
            "|  `-- Citrus",
            "|     `-- Lemon [1] <disabled>",
            "`-- selected: Chosen",
            "   `-- Apple [0] <selected>",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_hidden_group_state() {
        let group = GroupNode {
            key: 0,
            label: "Empty".into(),
            rows: Vec::new(),
            hidden: true,
        };
        assert_eq!(group.state(), vec!["hidden"]);
        assert!(group.children().is_empty());
    }
}
