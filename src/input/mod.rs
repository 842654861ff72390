/// One discrete key-down event, handed to the core once per tick.
/// No repeat-while-held semantics are assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
}

impl Key {
    /// Parse the names used by scenario files.
    pub fn parse(name: &str) -> Option<Key> {
        match name.to_lowercase().as_str() {
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "enter" | "return" => Some(Key::Enter),
            "space" => Some(Key::Space),
            "escape" | "esc" => Some(Key::Escape),
            "tab" => Some(Key::Tab),
            _ => None,
        }
    }
}
