use crate::controls::Key;

/// Polled key state for the current tick.
pub trait InputState {
    fn is_key_held(&self, key: Key) -> bool;
    fn was_key_pressed(&self, key: Key) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyStates {
    down: [bool; Key::COUNT],
}

impl Default for KeyStates {
    fn default() -> Self {
        Self {
            down: [false; Key::COUNT],
        }
    }
}

impl KeyStates {
    pub(crate) fn set(&mut self, key: Key, is_down: bool) {
        self.down[key.index()] = is_down;
    }

    pub(crate) fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    pub(crate) fn clear(&mut self) {
        self.down = [false; Key::COUNT];
    }

    fn iter_down(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.iter().copied().filter(|key| self.is_down(*key))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    held: KeyStates,
    pressed: KeyStates,
    quit_requested: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(held: KeyStates, pressed: KeyStates, quit_requested: bool) -> Self {
        Self {
            held,
            pressed,
            quit_requested,
        }
    }

    pub fn with_key_held(mut self, key: Key, is_held: bool) -> Self {
        self.held.set(key, is_held);
        self
    }

    /// Marks `key` as pressed this tick; a press also counts as held.
    pub fn with_key_pressed(mut self, key: Key) -> Self {
        self.pressed.set(key, true);
        self.held.set(key, true);
        self
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.pressed.iter_down()
    }
}

impl InputState for InputSnapshot {
    fn is_key_held(&self, key: Key) -> bool {
        self.held.is_down(key)
    }

    fn was_key_pressed(&self, key: Key) -> bool {
        self.pressed.is_down(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_nothing_down() {
        let snapshot = InputSnapshot::empty();
        for key in Key::ALL {
            assert!(!snapshot.is_key_held(*key));
            assert!(!snapshot.was_key_pressed(*key));
        }
        assert!(!snapshot.quit_requested());
    }

    #[test]
    fn pressed_key_is_also_held() {
        let snapshot = InputSnapshot::empty().with_key_pressed(Key::F5);
        assert!(snapshot.was_key_pressed(Key::F5));
        assert!(snapshot.is_key_held(Key::F5));
        assert_eq!(snapshot.pressed_keys().collect::<Vec<_>>(), vec![Key::F5]);
    }

    #[test]
    fn held_key_is_not_pressed() {
        let snapshot = InputSnapshot::empty().with_key_held(Key::LeftShift, true);
        assert!(snapshot.is_key_held(Key::LeftShift));
        assert!(!snapshot.was_key_pressed(Key::LeftShift));
    }
}
