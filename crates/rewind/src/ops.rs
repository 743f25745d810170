//! Parsing of command-line operations.
//!
//! Operations are `name` or `name=argument`, e.g. `insert=hello`,
//! `cursor=4`, `play=2,90,Forest`.

use crate::editor::EditorOp;
use crate::game::GameOp;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpParseError {
    #[error("unknown operation: {0}")]
    Unknown(String),

    #[error("operation '{op}' needs an argument")]
    MissingArgument { op: String },

    #[error("operation '{op}' takes no argument")]
    UnexpectedArgument { op: String },

    #[error("invalid number for '{op}': {value}")]
    InvalidNumber { op: String, value: String },

    #[error("'play' expects LEVEL,HEALTH,POSITION, got: {0}")]
    InvalidPlay(String),
}

fn split(input: &str) -> (&str, Option<&str>) {
    match input.split_once('=') {
        Some((name, arg)) => (name.trim(), Some(arg)),
        None => (input.trim(), None),
    }
}

fn required<'a>(name: &str, arg: Option<&'a str>) -> Result<&'a str, OpParseError> {
    arg.ok_or_else(|| OpParseError::MissingArgument {
        op: name.to_string(),
    })
}

fn no_argument<T>(name: &str, arg: Option<&str>, op: T) -> Result<T, OpParseError> {
    match arg {
        Some(_) => Err(OpParseError::UnexpectedArgument {
            op: name.to_string(),
        }),
        None => Ok(op),
    }
}

fn number(name: &str, value: &str) -> Result<u32, OpParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| OpParseError::InvalidNumber {
            op: name.to_string(),
            value: value.to_string(),
        })
}

impl FromStr for EditorOp {
    type Err = OpParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = split(s);
        match name {
            "insert" => Ok(EditorOp::Insert(required(name, arg)?.to_string())),
            "replace" => Ok(EditorOp::Replace(required(name, arg)?.to_string())),
            "cursor" => {
                let value = required(name, arg)?;
                let position = value
                    .trim()
                    .parse()
                    .map_err(|_| OpParseError::InvalidNumber {
                        op: name.to_string(),
                        value: value.to_string(),
                    })?;
                Ok(EditorOp::Cursor(position))
            }
            "commit" => no_argument(name, arg, EditorOp::Commit),
            "undo" => no_argument(name, arg, EditorOp::Undo),
            "redo" => no_argument(name, arg, EditorOp::Redo),
            _ => Err(OpParseError::Unknown(s.to_string())),
        }
    }
}

impl FromStr for GameOp {
    type Err = OpParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = split(s);
        match name {
            "play" => {
                let value = required(name, arg)?;
                let mut parts = value.splitn(3, ',');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(level), Some(health), Some(position)) if !position.trim().is_empty() => {
                        Ok(GameOp::Play {
                            level: number(name, level)?,
                            health: number(name, health)?,
                            position: position.trim().to_string(),
                        })
                    }
                    _ => Err(OpParseError::InvalidPlay(value.to_string())),
                }
            }
            "save" => no_argument(name, arg, GameOp::Save),
            "restore" => no_argument(name, arg, GameOp::Restore),
            _ => Err(OpParseError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_editor_ops() {
        assert_eq!(
            "insert=hello world".parse(),
            Ok(EditorOp::Insert("hello world".to_string()))
        );
        // Only the first '=' separates the argument
        assert_eq!(
            "replace=a=b".parse(),
            Ok(EditorOp::Replace("a=b".to_string()))
        );
        assert_eq!("cursor=7".parse(), Ok(EditorOp::Cursor(7)));
        assert_eq!("undo".parse(), Ok(EditorOp::Undo));
        assert_eq!("redo".parse(), Ok(EditorOp::Redo));
        assert_eq!("commit".parse(), Ok(EditorOp::Commit));
    }

    #[test]
    fn test_parse_editor_errors() {
        assert_eq!(
            "cursor=abc".parse::<EditorOp>(),
            Err(OpParseError::InvalidNumber {
                op: "cursor".to_string(),
                value: "abc".to_string()
            })
        );
        assert_eq!(
            "insert".parse::<EditorOp>(),
            Err(OpParseError::MissingArgument {
                op: "insert".to_string()
            })
        );
        assert_eq!(
            "undo=2".parse::<EditorOp>(),
            Err(OpParseError::UnexpectedArgument {
                op: "undo".to_string()
            })
        );
        assert!(matches!(
            "delete".parse::<EditorOp>(),
            Err(OpParseError::Unknown(_))
        ));
    }

    #[test]
    fn test_parse_game_ops() {
        assert_eq!(
            "play=2,90,Enchanted Forest".parse(),
            Ok(GameOp::Play {
                level: 2,
                health: 90,
                position: "Enchanted Forest".to_string()
            })
        );
        assert_eq!("save".parse(), Ok(GameOp::Save));
        assert_eq!("restore".parse(), Ok(GameOp::Restore));
    }

    #[test]
    fn test_parse_game_errors() {
        assert!(matches!(
            "play=2,90".parse::<GameOp>(),
            Err(OpParseError::InvalidPlay(_))
        ));
        assert!(matches!(
            "play=two,90,Cave".parse::<GameOp>(),
            Err(OpParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            "jump".parse::<GameOp>(),
            Err(OpParseError::Unknown(_))
        ));
    }
}
