mod atomic_io;
mod error;
mod key;
mod map;

pub use error::{ControlsError, ParseError, ParseErrorKind};
pub use key::{Key, UnknownKeyError};
pub use map::{Binding, ControlMap, DEFAULT_CONTROLS_FILE};
