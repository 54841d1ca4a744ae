use crate::sys::monitor::MonitorName;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};

/// Full-screen transparent overlay; the wheel panel centers itself inside.
pub fn init_overlay(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("spindle"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    // typing new wedges needs the keyboard, but only once clicked
    window.set_keyboard_mode(KeyboardMode::OnDemand);
}

/// Moves the overlay to the output called `name`. Leaves the compositor's
/// choice alone when GDK knows no such connector.
pub fn place_on_monitor(window: &gtk::ApplicationWindow, name: &MonitorName) -> bool {
    match find_monitor(name) {
        Some(monitor) => {
            window.set_monitor(Some(&monitor));
            true
        }
        None => {
            log::debug!("No GDK monitor for connector {}", name);
            false
        }
    }
}

fn find_monitor(name: &MonitorName) -> Option<gdk::Monitor> {
    gdk::Display::default()?
        .monitors()
        .iter::<gdk::Monitor>()
        .flatten()
        .find(|m| m.connector().as_deref() == Some(name.as_str()))
}
