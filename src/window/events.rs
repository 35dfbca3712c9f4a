/// Events produced by the windowing backend, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The window has been requested to close.
    Quit,
    /// A key has been pressed. `repeat` is set if the key was already held down
    /// when this event fired.
    KeyDown { key: Key, repeat: bool },
    /// A key has been released.
    KeyUp { key: Key },
    /// The size of the framebuffer has changed, in pixels.
    Resized(u32, u32),
}

impl Event {
    /// Returns true if this event should stop the frame loop: a close request
    /// or the first press of `Escape`.
    #[inline]
    pub fn is_quit(&self) -> bool {
        match *self {
            Event::Quit => true,
            Event::KeyDown {
                key: Key::Escape,
                repeat: false,
            } => true,
            _ => false,
        }
    }
}

/// Symbolic name for a keyboard key.
#[derive(Debug, Hash, Ord, PartialOrd, PartialEq, Eq, Clone, Copy)]
pub enum Key {
    /// The '1' key over the letters.
    Key1,
    /// The '2' key over the letters.
    Key2,
    /// The '3' key over the letters.
    Key3,
    /// The '4' key over the letters.
    Key4,
    /// The '5' key over the letters.
    Key5,
    /// The '6' key over the letters.
    Key6,
    /// The '7' key over the letters.
    Key7,
    /// The '8' key over the letters.
    Key8,
    /// The '9' key over the letters.
    Key9,
    /// The '0' key over the 'O' and 'P' keys.
    Key0,

    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    /// The Escape key, next to F1.
    Escape,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    Left,
    Up,
    Right,
    Down,

    /// The Backspace key, right over Enter.
    Back,
    /// The Enter key.
    Return,
    /// The space bar.
    Space,
    Tab,

    LAlt,
    LControl,
    LShift,
    RAlt,
    RControl,
    RShift,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quit_events() {
        assert!(Event::Quit.is_quit());

        let press = Event::KeyDown {
            key: Key::Escape,
            repeat: false,
        };
        assert!(press.is_quit());

        let repeat = Event::KeyDown {
            key: Key::Escape,
            repeat: true,
        };
        assert!(!repeat.is_quit());

        assert!(!Event::KeyUp { key: Key::Escape }.is_quit());
        assert!(!Event::KeyDown {
            key: Key::Q,
            repeat: false
        }
        .is_quit());
        assert!(!Event::Resized(10, 10).is_quit());
    }
}
