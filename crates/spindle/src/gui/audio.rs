use crate::config::AudioConfig;
use flywheel::WheelEvent;
use gtk::prelude::*;
use gtk4 as gtk;
use std::path::Path;

/// Spin and result sounds. Every failure here is logged and dropped so the
/// wheel keeps working without sound.
#[derive(Default)]
pub struct AudioDeck {
    spin: Option<gtk::MediaFile>,
    result: Option<gtk::MediaFile>,
}

impl AudioDeck {
    pub fn from_config(cfg: &AudioConfig) -> Self {
        Self {
            spin: cfg
                .spin
                .as_deref()
                .and_then(|p| Self::load(p, cfg.spin_volume, true)),
            result: cfg
                .result
                .as_deref()
                .and_then(|p| Self::load(p, cfg.result_volume, false)),
        }
    }

    fn load(path: &Path, volume: f64, looping: bool) -> Option<gtk::MediaFile> {
        if !path.exists() {
            log::warn!("Sound file {} not found", path.display());
            return None;
        }
        let media = gtk::MediaFile::for_filename(path);
        media.set_loop(looping);
        media.set_volume(volume.clamp(0.0, 1.0));
        media.connect_error_notify(|m| {
            if let Some(e) = m.error() {
                log::warn!("Sound playback failed: {}", e);
            }
        });
        Some(media)
    }

    pub fn handle(&self, event: &WheelEvent) {
        match event {
            WheelEvent::SpinStarted(_) => Self::restart(self.spin.as_ref()),
            WheelEvent::SpinCancelled => Self::stop(self.spin.as_ref()),
            WheelEvent::Settled { .. } => {
                Self::stop(self.spin.as_ref());
                Self::restart(self.result.as_ref());
            }
        }
    }

    fn restart(media: Option<&gtk::MediaFile>) {
        let Some(media) = media else { return };
        if media.error().is_some() {
            return;
        }
        if media.is_seekable() {
            media.seek(0);
        }
        media.play();
    }

    fn stop(media: Option<&gtk::MediaFile>) {
        if let Some(media) = media {
            media.pause();
        }
    }
}
