#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

const KEY_COUNT: usize = 4;

impl Key {
    const fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Up => 2,
            Key::Down => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct KeyStates {
    down: [bool; KEY_COUNT],
}

impl KeyStates {
    pub(crate) fn set(&mut self, key: Key, is_down: bool) {
        self.down[key.index()] = is_down;
    }

    pub(crate) fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    keys: KeyStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(keys: KeyStates) -> Self {
        Self { keys }
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    pub fn with_key_down(mut self, key: Key, is_down: bool) -> Self {
        self.keys.set(key, is_down);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_no_keys_down() {
        let snapshot = InputSnapshot::empty();
        for key in [Key::Left, Key::Right, Key::Up, Key::Down] {
            assert!(!snapshot.is_key_pressed(key));
        }
    }

    #[test]
    fn keys_are_tracked_independently() {
        let snapshot = InputSnapshot::empty()
            .with_key_down(Key::Right, true)
            .with_key_down(Key::Up, true);

        assert!(snapshot.is_key_pressed(Key::Right));
        assert!(snapshot.is_key_pressed(Key::Up));
        assert!(!snapshot.is_key_pressed(Key::Left));
        assert!(!snapshot.is_key_pressed(Key::Down));

        let released = snapshot.with_key_down(Key::Right, false);
        assert!(!released.is_key_pressed(Key::Right));
    }
}
