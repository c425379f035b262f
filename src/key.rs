//! Key identity types shared across the crate.

/// Physical key location on the switch matrix, `(row, col)`.
///
/// `(0, 0)` is an ordinary position, not a sentinel — matrices that
/// genuinely wire a key at row 0, col 0 are common, and reserving it would
/// silently misbehave for them. Wherever "no position" must be expressible,
/// callers use `Option<KeyPosition>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPosition {
    pub row: u8,
    pub col: u8,
}

impl KeyPosition {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// An opaque keycode, as assigned by the host's keymap.
///
/// This core never interprets the numeric value; it only compares keycodes
/// for equality and hands them back to the classifier that assigned them
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// A single press or release of a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub position: KeyPosition,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn press(position: KeyPosition) -> Self {
        Self {
            position,
            pressed: true,
        }
    }

    pub const fn release(position: KeyPosition) -> Self {
        Self {
            position,
            pressed: false,
        }
    }
}
