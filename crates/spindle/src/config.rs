use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use flywheel::wedges::DEFAULT_WEDGES;
use flywheel::{Direction, Tuning, TuningError, WedgeList};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Looped while the wheel spins.
    pub spin: Option<PathBuf>,
    pub spin_volume: f64,
    /// Played once when the wheel settles.
    pub result: Option<PathBuf>,
    pub result_volume: f64,
}

/// Which of the two sounds a picked file replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSlot {
    Spin,
    Result,
}

impl SoundSlot {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Spin => "Choose spin sound",
            Self::Result => "Choose result sound",
        }
    }
}

impl AudioConfig {
    /// Points `slot` at `path`; volumes are kept.
    pub fn set_sound(&mut self, slot: SoundSlot, path: PathBuf) {
        match slot {
            SoundSlot::Spin => self.spin = Some(path),
            SoundSlot::Result => self.result = Some(path),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            spin: None,
            spin_volume: 0.7,
            result: None,
            result_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub wedges: Vec<String>,
    pub pointer: Direction,
    pub physics: Tuning,
    pub audio: AudioConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wedges: DEFAULT_WEDGES.iter().map(|s| s.to_string()).collect(),
            pointer: Direction::default(),
            physics: Tuning::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Config {
    pub fn wedge_list(&self) -> WedgeList {
        WedgeList::parse_all(&self.wedges)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid physics settings: {0}")]
    InvalidTuning(#[from] TuningError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "spindle", "spindle").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("SPINDLE").separator("__"));

    from_builder(builder)
}

fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let config: Config = builder.build()?.try_deserialize()?;
    config.physics.validate()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Watches the config file and asks the app to reload when it changes.
pub struct ConfigWatcher {
    path: PathBuf,
    tx: Sender<AppEvent>,
}

impl ConfigWatcher {
    pub fn new(tx: Sender<AppEvent>) -> Result<Self, ConfigError> {
        Ok(Self {
            path: get_config_path()?,
            tx,
        })
    }

    /// Runs until the app stops listening. Editors tend to save in bursts
    /// (truncate, write, rename), so events arriving within
    /// `RELOAD_DEBOUNCE` of each other produce a single reload.
    pub async fn run(self) -> Result<(), ConfigError> {
        let dir = self
            .path
            .parent()
            .ok_or(ConfigError::ConfigDirNotFound)?
            .to_path_buf();
        fs_err::create_dir_all(&dir)?;

        let (bridge_tx, bridge_rx) = async_channel::unbounded();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = bridge_tx.send_blocking(res);
            },
            notify::Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        log::debug!("Watching {} for changes", self.path.display());

        while let Ok(res) = bridge_rx.recv().await {
            match res {
                Ok(event) if touches_config(&event, &self.path) => {
                    tokio::time::sleep(RELOAD_DEBOUNCE).await;
                    while bridge_rx.try_recv().is_ok() {}

                    if self.tx.send(AppEvent::ConfigReload).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("Config watch error: {}", e),
            }
        }
        Ok(())
    }
}

const RELOAD_DEBOUNCE: Duration = Duration::from_millis(100);

/// Whether `event` created, changed or removed the file at `path`.
fn touches_config(event: &notify::Event, path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        from_builder(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.wedge_list().len(), DEFAULT_WEDGES.len());
    }

    #[test]
    fn full_file_overrides_everything() {
        let config = parse(
            r#"
            wedges = ["Tea", "  ", "Coffee"]
            pointer = "east"

            [physics]
            release_threshold = 0.25
            max_speed = 10.0

            [audio]
            spin = "/tmp/loop.ogg"
            spin_volume = 0.3
            "#,
        )
        .unwrap();

        assert_eq!(config.pointer, Direction::East);
        assert_eq!(config.physics.release_threshold, 0.25);
        assert_eq!(config.physics.max_speed, 10.0);
        assert_eq!(config.physics.max_duration, 5.0);
        assert_eq!(config.audio.spin, Some(PathBuf::from("/tmp/loop.ogg")));
        assert_eq!(config.audio.spin_volume, 0.3);
        assert_eq!(config.audio.result, None);
        // blank labels are dropped when building the wheel
        assert_eq!(config.wedge_list().len(), 2);
    }

    #[test]
    fn invalid_physics_is_rejected() {
        let err = parse("[physics]\nmin_duration = 9.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning(_)));
    }

    #[test]
    fn pointer_accepts_short_names() {
        let config: Config = serde_json::from_str(r#"{ "pointer": "sw" }"#).unwrap();
        assert_eq!(config.pointer, Direction::SouthWest);
    }

    #[test]
    fn only_writes_to_the_config_file_reload() {
        let path = PathBuf::from("/home/u/.config/spindle/config.toml");
        let event = |kind, p: &str| notify::Event::new(kind).add_path(PathBuf::from(p));

        let write = event(EventKind::Modify(ModifyKind::Any), path.to_str().unwrap());
        assert!(touches_config(&write, &path));
        let created = event(EventKind::Create(CreateKind::File), path.to_str().unwrap());
        assert!(touches_config(&created, &path));

        let read = event(EventKind::Access(AccessKind::Any), path.to_str().unwrap());
        assert!(!touches_config(&read, &path));
        let sibling = event(
            EventKind::Modify(ModifyKind::Any),
            "/home/u/.config/spindle/config.toml~",
        );
        assert!(!touches_config(&sibling, &path));
    }

    #[test]
    fn picked_sound_replaces_only_its_slot() {
        let mut audio = AudioConfig {
            spin_volume: 0.4,
            ..AudioConfig::default()
        };
        audio.set_sound(SoundSlot::Result, PathBuf::from("/tmp/ding.ogg"));
        assert_eq!(audio.result, Some(PathBuf::from("/tmp/ding.ogg")));
        assert_eq!(audio.spin, None);

        audio.set_sound(SoundSlot::Spin, PathBuf::from("/tmp/loop.ogg"));
        assert_eq!(audio.spin, Some(PathBuf::from("/tmp/loop.ogg")));
        assert_eq!(audio.spin_volume, 0.4);
    }
}
