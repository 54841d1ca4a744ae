use crate::config::ConfigWatcher;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::thread;

/// Runs the control socket and the config watcher off the GTK thread. They
/// reach the app only through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("spindle-services".into())
        .spawn(move || run_services(tx));

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}

fn run_services(tx: Sender<AppEvent>) {
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create Tokio runtime: {}", e);
            return;
        }
    };

    rt.block_on(async move {
        let watch = async {
            let result = match ConfigWatcher::new(tx.clone()) {
                Ok(watcher) => watcher.run().await,
                Err(e) => Err(e),
            };
            // the socket keeps serving without hot reload
            if let Err(e) = result {
                log::error!("Config watcher stopped: {}", e);
            }
        };

        tokio::join!(server::run_server(tx.clone()), watch);
    });
}
