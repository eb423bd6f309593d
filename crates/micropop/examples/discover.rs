//! Example: Auto-discovery over an HTML snippet

use micropop::{InputEvent, Micropop};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut doc = micropop_html::parse(
        r##"
        <button data-micropop-trigger="tooltip" data-micropop-tooltip="tip1">?</button>
        <div id="tip1">Helpful tooltip text</div>
        <a href="#" data-micropop-trigger="dialog" data-micropop-dialog="dlg1">Open dialog</a>
        <div id="dlg1">Dialog body</div>
    "##,
    );

    let mut engine = Micropop::new();
    let created = engine.discover(&mut doc);
    println!("discovered {created} popups");

    // Hover the tooltip trigger
    let trigger = doc.elements_with_attribute("data-micropop-trigger")[0];
    let mut enter = InputEvent::mouse_enter(trigger);
    engine.handle_event(&mut doc, &mut enter);

    let tip = doc.get_element_by_id("tip1").unwrap();
    println!(
        "tip1: aria-hidden={:?} open={}",
        doc.attribute(tip, "aria-hidden"),
        doc.has_class(tip, "is-open")
    );

    // And the dialog, through the API
    engine.toggle(&mut doc, "dlg1");
    let dlg = doc.get_element_by_id("dlg1").unwrap();
    println!(
        "dlg1: aria-hidden={:?} open={}",
        doc.attribute(dlg, "aria-hidden"),
        doc.has_class(dlg, "is-open")
    );
}
