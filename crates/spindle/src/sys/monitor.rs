use derive_more::{AsRef, Deref, Display, From, Into};
use hyprland::data::Monitors;
use hyprland::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct MonitorName(String);

flywheel::impl_string_newtype!(MonitorName);

/// The monitor Hyprland reports as focused, if Hyprland is running.
pub fn get_active_monitor() -> Option<MonitorName> {
    Monitors::get()
        .ok()?
        .into_iter()
        .find(|m| m.focused)
        .map(|m| MonitorName(m.name))
}
