use flywheel::Wheel;
use relm4::prelude::*;
use spindle::config;
use spindle::gui::app::AppModel;
use spindle::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let wheel = Wheel::new(config.wedge_list(), config.physics.clone(), config.pointer);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.spindle.spindle");

    app.run::<AppModel>((wheel, config.audio.clone(), rx));
}
