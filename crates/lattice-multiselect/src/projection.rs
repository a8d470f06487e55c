//! Filter & grouping projector.
//!
//! [`project`] turns the option list and the current search query into the
//! two panes the widget renders:
//!
//! - the **available** pane: every option whose label matches the query,
//!   grouped by adjacency into [`GroupNode`]s;
//! - the **selected** pane: every selected option as a flat list, whatever
//!   the query.
//!
//! An option that is selected and matches the query appears in both panes.
//!
//! Groups are not stored anywhere. They are rediscovered on every pass by
//! scanning options in order: a run of adjacent options with the same group
//! key becomes one node, and an ungrouped option closes the open node.
//!
//! ```text
//!   options                     available
//!   A  (no group)        ──>    row A
//!   B  (G1)              ──>    group G1
//!   C  (G1)                       ├── row B
//!   D  (no group)                 └── row C
//!                               row D
//! ```
//!
//! The projector keeps no state; calling it twice with the same inputs
//! produces equal output.

use lattice_multiselect_core::logging::targets;

use crate::model::SelectOption;
use crate::settings::Settings;

/// Class given to every row.
pub const ITEM_CLASS: &str = "item";
/// Class given to rows of disabled options.
pub const DISABLED_CLASS: &str = "disabled";
/// Class given to rows of selected options.
pub const SELECTED_CLASS: &str = "selected";

/// One rendered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Correlation index back to the option.
    pub index: usize,
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether the option is selected.
    pub selected: bool,
    /// Whether the option is disabled.
    pub disabled: bool,
    /// Style classes copied from the option.
    pub classes: Vec<String>,
}

impl Row {
    fn from_option(option: &SelectOption) -> Self {
        Self {
            index: option.index,
            value: option.value.clone(),
            label: option.label.clone(),
            selected: option.selected,
            disabled: option.disabled,
            classes: option.classes.clone(),
        }
    }

    /// Full class list for the row: option classes, then `item`, then the
    /// state classes.
    pub fn class_list(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
        classes.push(ITEM_CLASS);
        if self.disabled {
            classes.push(DISABLED_CLASS);
        }
        if self.selected {
            classes.push(SELECTED_CLASS);
        }
        classes
    }
}

/// A run of adjacent options sharing one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    /// Group identity key.
    pub key: u32,
    /// Caption; empty means no caption is drawn.
    pub label: String,
    /// Member rows that survived filtering.
    pub rows: Vec<Row>,
    /// Set when the node has no rows and empty groups are hidden.
    pub hidden: bool,
}

/// An entry of the available pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailableNode {
    /// An ungrouped option.
    Row(Row),
    /// A group with its member rows.
    Group(GroupNode),
}

/// Captions for the two panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneHeaders {
    /// Caption of the available pane.
    pub non_selected: String,
    /// Caption of the selected pane.
    pub selected: String,
}

/// The complete two-pane view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Grouped, filtered options.
    pub available: Vec<AvailableNode>,
    /// Selected options, ungrouped and unfiltered.
    pub selected: Vec<Row>,
    /// Pane captions, present only when both are configured.
    pub headers: Option<PaneHeaders>,
}

impl Projection {
    /// Available nodes a renderer should draw (hidden groups skipped).
    pub fn visible_available(&self) -> impl Iterator<Item = &AvailableNode> {
        self.available
            .iter()
            .filter(|node| !matches!(node, AvailableNode::Group(group) if group.hidden))
    }

    /// Every row of the available pane in order, flattening groups.
    pub fn available_rows(&self) -> impl Iterator<Item = &Row> {
        self.available.iter().flat_map(|node| match node {
            AvailableNode::Row(row) => std::slice::from_ref(row).iter(),
            AvailableNode::Group(group) => group.rows.iter(),
        })
    }

    /// Group nodes of the available pane.
    pub fn groups(&self) -> impl Iterator<Item = &GroupNode> {
        self.available.iter().filter_map(|node| match node {
            AvailableNode::Group(group) => Some(group),
            AvailableNode::Row(_) => None,
        })
    }
}

/// Case-insensitive substring match; an empty query matches everything.
pub fn label_matches(label: &str, query: &str) -> bool {
    query.is_empty() || label.to_lowercase().contains(&query.to_lowercase())
}

/// Builds the two-pane view from the options and the search query.
///
/// The query is ignored when search is disabled in `settings`.
pub fn project(options: &[SelectOption], query: &str, settings: &Settings) -> Projection {
    let query = if settings.enable_search { query } else { "" };

    let mut available: Vec<AvailableNode> = Vec::new();
    let mut open_group: Option<u32> = None;

    for option in options {
        let matches = label_matches(&option.label, query);

        match &option.group {
            Some(group) if open_group == Some(group.key()) => {
                if matches {
                    if let Some(AvailableNode::Group(node)) = available.last_mut() {
                        node.rows.push(Row::from_option(option));
                    }
                }
            }
            Some(group) => {
                open_group = Some(group.key());
                available.push(AvailableNode::Group(GroupNode {
                    key: group.key(),
                    label: group.label().to_string(),
                    rows: if matches { vec![Row::from_option(option)] } else { Vec::new() },
                    hidden: false,
                }));
            }
            None => {
                open_group = None;
                if matches {
                    available.push(AvailableNode::Row(Row::from_option(option)));
                }
            }
        }
    }

    if settings.hide_empty_groups {
        for node in &mut available {
            if let AvailableNode::Group(group) = node {
                group.hidden = group.rows.is_empty();
            }
        }
    }

    let selected: Vec<Row> = options
        .iter()
        .filter(|o| o.selected)
        .map(Row::from_option)
        .collect();

    let headers = settings.headers().map(|(non_selected, selected)| PaneHeaders {
        non_selected: non_selected.to_string(),
        selected: selected.to_string(),
    });

    tracing::trace!(
        target: targets::PROJECTION,
        nodes = available.len(),
        selected = selected.len(),
        "projected options"
    );

    Projection {
        available,
        selected,
        headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::OptionGroup;

    fn option(index: usize, label: &str, group: Option<&OptionGroup>) -> SelectOption {
        SelectOption {
            index,
            value: label.to_lowercase(),
            label: label.to_string(),
            selected: false,
            disabled: false,
            origin_disabled: false,
            group: group.cloned(),
            classes: Vec::new(),
        }
    }

    fn row_labels(nodes: &[AvailableNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| match node {
                AvailableNode::Row(row) => row.label.clone(),
                AvailableNode::Group(group) => {
                    let rows: Vec<&str> = group.rows.iter().map(|r| r.label.as_str()).collect();
                    format!("{}{{{}}}", group.label, rows.join(","))
                }
            })
            .collect()
    }

    fn grouped() -> Vec<SelectOption> {
        let g1 = OptionGroup::new(1, "G1");
        vec![
            option(0, "A", None),
            option(1, "B", Some(&g1)),
            option(2, "C", Some(&g1)),
            option(3, "D", None),
        ]
    }

    #[test]
    fn test_grouping_by_adjacency() {
        let projection = project(&grouped(), "", &Settings::default());
        assert_eq!(row_labels(&projection.available), vec!["A", "G1{B,C}", "D"]);
    }

    #[test]
    fn test_same_group_split_by_ungrouped_option() {
        let g = OptionGroup::new(4, "G");
        let options = vec![option(0, "x", Some(&g)), option(1, "y", None), option(2, "z", Some(&g))];

        let projection = project(&options, "", &Settings::default());
        assert_eq!(row_labels(&projection.available), vec!["G{x}", "y", "G{z}"]);
    }

    #[test]
    fn test_adjacent_groups_with_same_label_stay_distinct() {
        let first = OptionGroup::new(1, "Twin");
        let second = OptionGroup::new(2, "Twin");
        let options = vec![option(0, "p", Some(&first)), option(1, "q", Some(&second))];

        let projection = project(&options, "", &Settings::default());
        assert_eq!(projection.groups().count(), 2);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let options = vec![option(0, "Apple", None), option(1, "Pineapple", None), option(2, "Kiwi", None)];

        let projection = project(&options, "APP", &Settings::default());
        let labels: Vec<&str> = projection.available_rows().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "Pineapple"]);
    }

    #[test]
    fn test_filter_keeps_group_node() {
        let projection = project(&grouped(), "d", &Settings::default());
        assert_eq!(row_labels(&projection.available), vec!["G1{}", "D"]);
        assert!(projection.groups().all(|g| !g.hidden));
    }

    #[test]
    fn test_hide_empty_groups() {
        let settings = Settings {
            hide_empty_groups: true,
            ..Settings::default()
        };

        let projection = project(&grouped(), "a", &settings);

        assert_eq!(row_labels(&projection.available), vec!["A", "G1{}"]);
        let visible: Vec<_> = projection.visible_available().collect();
        assert_eq!(visible.len(), 1);
        assert!(matches!(visible[0], AvailableNode::Row(row) if row.label == "A"));
    }

    #[test]
    fn test_selected_pane_ignores_query() {
        let mut options = grouped();
        options[1].selected = true;
        options[3].selected = true;

        let projection = project(&options, "zzz", &Settings::default());

        let selected: Vec<usize> = projection.selected.iter().map(|r| r.index).collect();
        assert_eq!(selected, vec![1, 3]);
        assert_eq!(projection.available_rows().count(), 0);
    }

    #[test]
    fn test_selected_option_in_both_panes() {
        let mut options = grouped();
        options[0].selected = true;

        let projection = project(&options, "", &Settings::default());

        assert!(projection.available_rows().any(|r| r.index == 0 && r.selected));
        assert_eq!(projection.selected.len(), 1);
    }

    #[test]
    fn test_query_ignored_when_search_disabled() {
        let settings = Settings {
            enable_search: false,
            ..Settings::default()
        };

        let projection = project(&grouped(), "nothing matches", &settings);
        assert_eq!(projection.available_rows().count(), 4);
    }

    #[test]
    fn test_headers_require_both() {
        let mut settings = Settings {
            selected_header: Some("Chosen".into()),
            ..Settings::default()
        };
        assert!(project(&grouped(), "", &settings).headers.is_none());

        settings.non_selected_header = Some("Available".into());
        let headers = project(&grouped(), "", &settings).headers;
        assert_eq!(
            headers,
            Some(PaneHeaders {
                non_selected: "Available".into(),
                selected: "Chosen".into(),
            })
        );
    }

    #[test]
    fn test_empty_headers_are_not_rendered() {
        let settings = Settings::builder().headers("", "").build();
        assert!(project(&grouped(), "", &settings).headers.is_none());

        let settings = Settings::builder().headers("Available", "").build();
        assert!(project(&grouped(), "", &settings).headers.is_none());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let mut options = grouped();
        options[2].selected = true;
        options[1].disabled = true;
        let settings = Settings {
            hide_empty_groups: true,
            ..Settings::default()
        };

        assert_eq!(project(&options, "b", &settings), project(&options, "b", &settings));
    }

    #[test]
    fn test_row_class_list() {
        let mut option = option(0, "A", None);
        option.classes = vec!["fruit".into()];
        option.selected = true;
        option.disabled = true;

        let row = Row::from_option(&option);
        assert_eq!(row.class_list(), vec!["fruit", "item", "disabled", "selected"]);
    }

    #[test]
    fn test_label_matches() {
        assert!(label_matches("Anything", ""));
        assert!(label_matches("Übergröße", "GRÖ"));
        assert!(!label_matches("Kiwi", "apple"));
    }
}
