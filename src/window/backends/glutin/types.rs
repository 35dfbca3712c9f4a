use std::collections::HashSet;

use super::super::super::events::{Event, Key};

/// Translates a glutin event. Key repeats are derived from `held`, the set of
/// keys currently pressed down.
pub fn from_event(source: glutin::Event, dpr: f64, held: &mut HashSet<Key>) -> Option<Event> {
    match source {
        glutin::Event::WindowEvent { event, .. } => from_window_event(&event, dpr, held),
        _ => None,
    }
}

fn from_window_event(
    source: &glutin::WindowEvent,
    dpr: f64,
    held: &mut HashSet<Key>,
) -> Option<Event> {
    match *source {
        glutin::WindowEvent::CloseRequested => Some(Event::Quit),

        glutin::WindowEvent::Resized(size) => {
            let size = size.to_physical(dpr);
            Some(Event::Resized(size.width as u32, size.height as u32))
        }

        // Releases are not delivered while unfocused.
        glutin::WindowEvent::Focused(false) => {
            held.clear();
            None
        }

        glutin::WindowEvent::KeyboardInput { ref input, .. } => from_keyboard_input(input, held),

        _ => None,
    }
}

fn from_keyboard_input(source: &glutin::KeyboardInput, held: &mut HashSet<Key>) -> Option<Event> {
    let key = from_virtual_key_code(source.virtual_keycode?)?;
    match source.state {
        glutin::ElementState::Pressed => Some(Event::KeyDown {
            key,
            repeat: !held.insert(key),
        }),
        glutin::ElementState::Released => {
            held.remove(&key);
            Some(Event::KeyUp { key })
        }
    }
}

fn from_virtual_key_code(key: glutin::VirtualKeyCode) -> Option<Key> {
    match key {
        glutin::VirtualKeyCode::Key1 => Some(Key::Key1),
        glutin::VirtualKeyCode::Key2 => Some(Key::Key2),
        glutin::VirtualKeyCode::Key3 => Some(Key::Key3),
        glutin::VirtualKeyCode::Key4 => Some(Key::Key4),
        glutin::VirtualKeyCode::Key5 => Some(Key::Key5),
        glutin::VirtualKeyCode::Key6 => Some(Key::Key6),
        glutin::VirtualKeyCode::Key7 => Some(Key::Key7),
        glutin::VirtualKeyCode::Key8 => Some(Key::Key8),
        glutin::VirtualKeyCode::Key9 => Some(Key::Key9),
        glutin::VirtualKeyCode::Key0 => Some(Key::Key0),
        glutin::VirtualKeyCode::A => Some(Key::A),
        glutin::VirtualKeyCode::B => Some(Key::B),
        glutin::VirtualKeyCode::C => Some(Key::C),
        glutin::VirtualKeyCode::D => Some(Key::D),
        glutin::VirtualKeyCode::E => Some(Key::E),
        glutin::VirtualKeyCode::F => Some(Key::F),
        glutin::VirtualKeyCode::G => Some(Key::G),
        glutin::VirtualKeyCode::H => Some(Key::H),
        glutin::VirtualKeyCode::I => Some(Key::I),
        glutin::VirtualKeyCode::J => Some(Key::J),
        glutin::VirtualKeyCode::K => Some(Key::K),
        glutin::VirtualKeyCode::L => Some(Key::L),
        glutin::VirtualKeyCode::M => Some(Key::M),
        glutin::VirtualKeyCode::N => Some(Key::N),
        glutin::VirtualKeyCode::O => Some(Key::O),
        glutin::VirtualKeyCode::P => Some(Key::P),
        glutin::VirtualKeyCode::Q => Some(Key::Q),
        glutin::VirtualKeyCode::R => Some(Key::R),
        glutin::VirtualKeyCode::S => Some(Key::S),
        glutin::VirtualKeyCode::T => Some(Key::T),
        glutin::VirtualKeyCode::U => Some(Key::U),
        glutin::VirtualKeyCode::V => Some(Key::V),
        glutin::VirtualKeyCode::W => Some(Key::W),
        glutin::VirtualKeyCode::X => Some(Key::X),
        glutin::VirtualKeyCode::Y => Some(Key::Y),
        glutin::VirtualKeyCode::Z => Some(Key::Z),
        glutin::VirtualKeyCode::Escape => Some(Key::Escape),
        glutin::VirtualKeyCode::F1 => Some(Key::F1),
        glutin::VirtualKeyCode::F2 => Some(Key::F2),
        glutin::VirtualKeyCode::F3 => Some(Key::F3),
        glutin::VirtualKeyCode::F4 => Some(Key::F4),
        glutin::VirtualKeyCode::F5 => Some(Key::F5),
        glutin::VirtualKeyCode::F6 => Some(Key::F6),
        glutin::VirtualKeyCode::F7 => Some(Key::F7),
        glutin::VirtualKeyCode::F8 => Some(Key::F8),
        glutin::VirtualKeyCode::F9 => Some(Key::F9),
        glutin::VirtualKeyCode::F10 => Some(Key::F10),
        glutin::VirtualKeyCode::F11 => Some(Key::F11),
        glutin::VirtualKeyCode::F12 => Some(Key::F12),
        glutin::VirtualKeyCode::Left => Some(Key::Left),
        glutin::VirtualKeyCode::Up => Some(Key::Up),
        glutin::VirtualKeyCode::Right => Some(Key::Right),
        glutin::VirtualKeyCode::Down => Some(Key::Down),
        glutin::VirtualKeyCode::Back => Some(Key::Back),
        glutin::VirtualKeyCode::Return => Some(Key::Return),
        glutin::VirtualKeyCode::Space => Some(Key::Space),
        glutin::VirtualKeyCode::Tab => Some(Key::Tab),
        glutin::VirtualKeyCode::LAlt => Some(Key::LAlt),
        glutin::VirtualKeyCode::LControl => Some(Key::LControl),
        glutin::VirtualKeyCode::LShift => Some(Key::LShift),
        glutin::VirtualKeyCode::RAlt => Some(Key::RAlt),
        glutin::VirtualKeyCode::RControl => Some(Key::RControl),
        glutin::VirtualKeyCode::RShift => Some(Key::RShift),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn input(key: glutin::VirtualKeyCode, state: glutin::ElementState) -> glutin::KeyboardInput {
        glutin::KeyboardInput {
            scancode: 0,
            state,
            virtual_keycode: Some(key),
            modifiers: glutin::ModifiersState {
                shift: false,
                ctrl: false,
                alt: false,
                logo: false,
            },
        }
    }

    fn press(held: &mut HashSet<Key>) -> Option<Event> {
        let v = input(glutin::VirtualKeyCode::Escape, glutin::ElementState::Pressed);
        from_keyboard_input(&v, held)
    }

    fn release(held: &mut HashSet<Key>) -> Option<Event> {
        let v = input(glutin::VirtualKeyCode::Escape, glutin::ElementState::Released);
        from_keyboard_input(&v, held)
    }

    fn escape(repeat: bool) -> Option<Event> {
        Some(Event::KeyDown {
            key: Key::Escape,
            repeat,
        })
    }

    #[test]
    fn repeats() {
        let mut held = HashSet::new();
        assert_eq!(press(&mut held), escape(false));
        assert_eq!(press(&mut held), escape(true));
        assert_eq!(press(&mut held), escape(true));
        assert_eq!(release(&mut held), Some(Event::KeyUp { key: Key::Escape }));
        assert_eq!(press(&mut held), escape(false));
        assert!(held.contains(&Key::Escape));
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut held = HashSet::new();
        assert_eq!(press(&mut held), escape(false));

        let lost = glutin::WindowEvent::Focused(false);
        assert_eq!(from_window_event(&lost, 1.0, &mut held), None);
        assert!(held.is_empty());

        // The release happened elsewhere; the next press is a fresh one.
        assert_eq!(press(&mut held), escape(false));

        let gained = glutin::WindowEvent::Focused(true);
        assert_eq!(from_window_event(&gained, 1.0, &mut held), None);
        assert_eq!(press(&mut held), escape(true));
    }

    #[test]
    fn unmapped_keys() {
        let mut held = HashSet::new();
        let v = input(glutin::VirtualKeyCode::Numpad5, glutin::ElementState::Pressed);
        assert_eq!(from_keyboard_input(&v, &mut held), None);
        assert!(held.is_empty());

        let close = glutin::WindowEvent::CloseRequested;
        assert_eq!(from_window_event(&close, 1.0, &mut held), Some(Event::Quit));
    }
}
