use flywheel::Label;
use flywheel::control::{ControlCommand, DEFAULT_FLING_VELOCITY};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Toggle,
    Spin(f64),
    Add(Label),
    Remove,
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(cmd: ControlCommand) -> Self {
        match cmd {
            ControlCommand::Show => AppEvent::Show,
            ControlCommand::Hide => AppEvent::Hide,
            ControlCommand::Toggle => AppEvent::Toggle,
            ControlCommand::Spin(v) => AppEvent::Spin(v.unwrap_or(DEFAULT_FLING_VELOCITY)),
            ControlCommand::Add(label) => AppEvent::Add(label),
            ControlCommand::Remove => AppEvent::Remove,
        }
    }
}
