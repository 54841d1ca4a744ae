//! Line protocol spoken over the daemon's control socket.

use crate::wedges::{Label, WedgeError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/spindle.sock";

/// Velocity used by `spin` without an argument, in rad/s.
pub const DEFAULT_FLING_VELOCITY: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    Show,
    Hide,
    Toggle,
    Spin(Option<f64>),
    Add(Label),
    Remove,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Invalid velocity '{0}'")]
    Velocity(String),
    #[error(transparent)]
    Label(#[from] WedgeError),
}

impl FromStr for ControlCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            "toggle" => Ok(Self::Toggle),
            "remove" => Ok(Self::Remove),
            "spin" if rest.is_empty() => Ok(Self::Spin(None)),
            "spin" => rest
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| Self::Spin(Some(v)))
                .ok_or_else(|| ParseCommandError::Velocity(rest.to_string())),
            "add" => Ok(Self::Add(Label::parse(rest)?)),
            _ => Err(ParseCommandError::Unknown(verb.to_string())),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "show"),
            Self::Hide => write!(f, "hide"),
            Self::Toggle => write!(f, "toggle"),
            Self::Spin(None) => write!(f, "spin"),
            Self::Spin(Some(v)) => write!(f, "spin {v}"),
            Self::Add(label) => write!(f, "add {label}"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_verbs() {
        assert_eq!("show".parse(), Ok(ControlCommand::Show));
        assert_eq!("  HIDE \n".parse(), Ok(ControlCommand::Hide));
        assert_eq!("toggle".parse(), Ok(ControlCommand::Toggle));
        assert_eq!("remove".parse(), Ok(ControlCommand::Remove));
    }

    #[test]
    fn parses_spin_velocity() {
        assert_eq!("spin".parse(), Ok(ControlCommand::Spin(None)));
        assert_eq!("spin -6.5".parse(), Ok(ControlCommand::Spin(Some(-6.5))));
        assert_eq!(
            "spin fast".parse::<ControlCommand>(),
            Err(ParseCommandError::Velocity("fast".into()))
        );
        assert!("spin inf".parse::<ControlCommand>().is_err());
    }

    #[test]
    fn add_keeps_inner_spaces() {
        assert_eq!(
            "add  Mary Ann ".parse(),
            Ok(ControlCommand::Add(Label::new("Mary Ann")))
        );
        assert_eq!(
            "add".parse::<ControlCommand>(),
            Err(ParseCommandError::Label(WedgeError::EmptyLabel))
        );
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(
            "launch".parse::<ControlCommand>(),
            Err(ParseCommandError::Unknown("launch".into()))
        );
        assert_eq!("   ".parse::<ControlCommand>(), Err(ParseCommandError::Empty));
    }

    #[test]
    fn display_is_parseable() {
        for cmd in [
            ControlCommand::Spin(Some(3.25)),
            ControlCommand::Add(Label::new("Zoe")),
            ControlCommand::Toggle,
        ] {
            assert_eq!(cmd.to_string().parse(), Ok(cmd));
        }
    }
}
