//! Scripted walk through the widget, printing every frame as a tree.
//!
//! Run with: cargo run -p lattice-multiselect --example terminal_demo
//!
//! Set `RUST_LOG=lattice_multiselect=debug` to see the widget's own logging.

use lattice_multiselect::logging::{TreeFormatOptions, TreeStyle};
use lattice_multiselect::prelude::*;
use tracing_subscriber::EnvFilter;

fn build_control() -> MemorySelect {
    let mut control = MemorySelect::new();

    control.push(OptionSnapshot::new("none", "No preference"));

    let fruit = control.add_group("Fruit");
    control.push(OptionSnapshot::new("apple", "Apple").with_group(fruit.clone()));
    control.push(OptionSnapshot::new("banana", "Banana").with_group(fruit.clone()));
    control.push(
        OptionSnapshot::new("durian", "Durian")
            .with_group(fruit)
            .with_disabled(true)
            .with_class("exotic"),
    );

    let vegetables = control.add_group("Vegetables");
    control.push(OptionSnapshot::new("carrot", "Carrot").with_group(vegetables.clone()));
    control.push(OptionSnapshot::new("kale", "Kale").with_group(vegetables));

    control
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::builder()
        .headers("Available", "Chosen")
        .search_placeholder("Filter produce...")
        .hide_empty_groups(true)
        .limit(2)
        .build();

    let options = TreeFormatOptions::default().with_style(TreeStyle::Ascii);

    let mut widget = MultiSelectBuilder::new()
        .settings(settings)
        .on_rendered(move |frame| {
            println!("{}", frame.debug_tree_with(options.clone()));
        })
        .on_changed(|values| println!(">> selection: {values:?}\n"))
        .on_limit_reached(|event| {
            println!(">> limit of {} reached, remaining options locked\n", event.limit);
        })
        .attach(build_control())
        .expect("fresh control binds");

    let script = [
        SelectEvent::Activate(RowActivation::click(1)),
        SelectEvent::SearchInput("a".into()),
        SelectEvent::Activate(RowActivation::key(5, Key::Enter)),
        SelectEvent::Activate(RowActivation::click(2)),
        SelectEvent::SearchInput(String::new()),
        SelectEvent::Activate(RowActivation::key(1, Key::Space)),
    ];

    for event in script {
        println!("== {event:?}");
        let accepted = widget.handle(event);
        if accepted {
            println!("   (default action suppressed)");
        }
    }

    println!("final selection: {:?}", widget.selected_values());
}
