use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use super::atomic_io::write_text_atomic;
use super::error::{ControlsError, ParseError, ParseErrorKind};
use super::key::Key;

pub const DEFAULT_CONTROLS_FILE: &str = "player1controls.ini";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub action: String,
    pub key: Key,
}

/// Logical action name to key table, kept in the order actions were first
/// bound so that saving reproduces the file it was loaded from.
#[derive(Debug, Default, Clone)]
pub struct ControlMap {
    bindings: Vec<Binding>,
    index_by_action: HashMap<String, usize>,
}

impl ControlMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_defaults() -> Self {
        let mut map = Self::new();
        map.rebind("up", Key::W);
        map.rebind("down", Key::S);
        map.rebind("left", Key::A);
        map.rebind("right", Key::D);
        map.rebind("sprint", Key::LeftShift);
        map
    }

    /// Parses controls text. Blank lines are skipped; a repeated action keeps
    /// the key from its last line.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut map = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            if let Some((action, key)) = parse_line(idx + 1, raw)? {
                map.rebind(action, key);
            }
        }
        Ok(map)
    }

    pub fn from_file(path: &Path) -> Result<Self, ControlsError> {
        let file = File::open(path).map_err(|source| ControlsError::io(path, source))?;
        let reader = BufReader::new(file);

        let mut map = Self::new();
        for (idx, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes.map_err(|source| ControlsError::io(path, source))?;
            let raw = decode_line(idx + 1, bytes).map_err(|error| error.in_file(path))?;
            let parsed = parse_line(idx + 1, &raw).map_err(|error| error.in_file(path))?;
            if let Some((action, key)) = parsed {
                map.rebind(action, key);
            }
        }
        Ok(map)
    }

    /// Replaces the current bindings with the contents of `path`. Any failure
    /// leaves the existing bindings untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), ControlsError> {
        let loaded = Self::from_file(path)?;
        *self = loaded;
        info!(
            path = %path.display(),
            bindings = self.len(),
            "controls_loaded"
        );
        Ok(())
    }

    /// Reads `path`, or writes `defaults` there first when the file does not
    /// exist yet.
    pub fn load_or_create(path: &Path, defaults: &ControlMap) -> Result<Self, ControlsError> {
        match Self::from_file(path) {
            Ok(map) => {
                info!(path = %path.display(), bindings = map.len(), "controls_loaded");
                Ok(map)
            }
            Err(ControlsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                defaults.save(path)?;
                info!(
                    path = %path.display(),
                    bindings = defaults.len(),
                    "controls_created_with_defaults"
                );
                Ok(defaults.clone())
            }
            Err(error) => Err(error),
        }
    }

    /// Fails without touching `path` when an action name could not be read
    /// back from its own line.
    pub fn save(&self, path: &Path) -> Result<(), ControlsError> {
        if let Some(binding) = self
            .bindings
            .iter()
            .find(|binding| !is_savable_action(&binding.action))
        {
            return Err(ControlsError::UnsavableAction {
                action: binding.action.clone(),
            });
        }

        write_text_atomic(path, &self.to_text())
            .map_err(|source| ControlsError::io(path, source))?;
        info!(path = %path.display(), bindings = self.len(), "controls_saved");
        Ok(())
    }

    /// One `action=Key` line per binding; every line is newline-terminated.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for binding in &self.bindings {
            text.push_str(&binding.action);
            text.push('=');
            text.push_str(binding.key.name());
            text.push('\n');
        }
        text
    }

    pub fn get(&self, action: &str) -> Result<Key, ControlsError> {
        self.index_by_action
            .get(action)
            .map(|idx| self.bindings[*idx].key)
            .ok_or_else(|| ControlsError::UnknownAction {
                action: action.to_string(),
            })
    }

    /// Binds `action` to `key`, returning the key it replaced. Several actions
    /// may share a key.
    pub fn rebind(&mut self, action: impl Into<String>, key: Key) -> Option<Key> {
        let action = action.into();
        if let Some(&idx) = self.index_by_action.get(&action) {
            let previous = std::mem::replace(&mut self.bindings[idx].key, key);
            debug!(action = action.as_str(), from = %previous, to = %key, "controls_rebound");
            return Some(previous);
        }

        debug!(action = action.as_str(), to = %key, "controls_bound");
        self.index_by_action.insert(action.clone(), self.bindings.len());
        self.bindings.push(Binding { action, key });
        None
    }

    pub fn contains(&self, action: &str) -> bool {
        self.index_by_action.contains_key(action)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl PartialEq for ControlMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .bindings
                .iter()
                .all(|binding| other.get(&binding.action).ok() == Some(binding.key))
    }
}

impl Eq for ControlMap {}

/// Names that `parse_line` would read back unchanged.
fn is_savable_action(action: &str) -> bool {
    !action.is_empty() && action.trim() == action && !action.contains(['=', '\n', '\r'])
}

fn decode_line(line_number: usize, bytes: Vec<u8>) -> Result<String, ParseError> {
    String::from_utf8(bytes).map_err(|error| {
        let lossy = String::from_utf8_lossy(error.as_bytes());
        ParseError::new(
            ParseErrorKind::InvalidUtf8,
            line_number,
            lossy.trim_end_matches('\r'),
        )
    })
}

fn parse_line(line_number: usize, raw: &str) -> Result<Option<(String, Key)>, ParseError> {
    let line = raw.trim_end_matches('\r');
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (action, symbol) = line
        .split_once('=')
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingSeparator, line_number, line))?;
    let action = action.trim();
    if action.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyAction,
            line_number,
            line,
        ));
    }

    let key = symbol.trim().parse::<Key>().map_err(|error| {
        ParseError::new(
            ParseErrorKind::UnknownKey {
                symbol: error.symbol,
            },
            line_number,
            line,
        )
    })?;
    Ok(Some((action.to_string(), key)))
}
