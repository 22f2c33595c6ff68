//! Example: open and close a modal dialog with focus trapping

use fos_dom::{Document, FocusOptions};
use fos_focus::{
    hide_siblings, press_tab, FocusConfig, FocusTrap, LiveRegionKind, LiveRegions, TrapOptions,
};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = FocusConfig::default();
    if let Err(err) = config.validate() {
        eprintln!("{err}");
        return;
    }

    let mut doc = Document::new("about:blank");
    let body = doc.body();
    let (Ok(opener), Ok(dialog)) = (doc.append_element(body, "button"), doc.append_element(body, "div")) else {
        return;
    };
    for _ in 0..2 {
        if doc.append_element(dialog, "button").is_err() {
            return;
        }
    }
    doc.focus(opener, FocusOptions::default());

    let mut regions = LiveRegions::new(&config);
    let status = regions.get_or_create(&mut doc, LiveRegionKind::Polite);
    println!("Live region ready: {:?}", status);

    let mut hidden = hide_siblings(&mut doc, dialog);
    let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::from_config(&config));
    for _ in 0..3 {
        press_tab(&mut doc);
        println!("Focused: {:?}", doc.active_element());
    }

    trap.release(&mut doc);
    hidden.restore(&mut doc);
    println!("Focus restored to {:?}", doc.active_element());
}
