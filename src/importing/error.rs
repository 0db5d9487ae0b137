use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::error;

#[derive(Debug, PartialEq, Eq)]
pub struct ImportError {
    pub filename: Option<String>,
    pub error: ErrorType,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErrorType {
    #[error("Could not read MIDI data: {message}")]
    Midi { message: String },

    #[error("Time division {division} is not supported, only ticks per quarter note are.")]
    UnsupportedDivision { division: i16 },

    #[error("Note on track {track} at tick {tick} has key number {key}, which is outside 0..=127.")]
    KeyOutOfRange { track: usize, tick: u64, key: u8 },

    #[error("Delta times on track {track} run past the largest representable tick.")]
    TickOverflow { track: usize },

    #[error("Note on track {track} at tick {tick} needs {measures} measures, more than the limit of {limit}.")]
    TooManyMeasures {
        track: usize,
        tick: u64,
        measures: u64,
        limit: usize,
    },
}

impl ImportError {
    pub fn new(error: ErrorType) -> Self {
        ImportError {
            filename: None,
            error,
        }
    }

    pub fn in_file<S: Into<String>>(self, filename: S) -> Self {
        ImportError {
            filename: Some(filename.into()),
            ..self
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let filename = self.filename.as_deref().unwrap_or("<input>");
        error::fmt_simple_error(f, &self.error.to_string(), filename)
    }
}
