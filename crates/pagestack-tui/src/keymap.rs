use std::collections::hash_map::{Entry, HashMap};

use crossterm::event::{KeyCode, KeyModifiers};
use pagestack_core::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// A configured key with the modifiers it must be pressed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }
}

/// Configurable bindings in help order: config field, action, help text
fn configured(config: &KeymapConfig) -> [(&str, Action, &'static str); 9] {
    [
        (config.next_page.as_str(), Action::NextPage, "Next page"),
        (config.prev_page.as_str(), Action::PrevPage, "Previous page"),
        (config.first_page.as_str(), Action::FirstPage, "First page"),
        (config.last_page.as_str(), Action::LastPage, "Last page"),
        (config.scroll_down.as_str(), Action::ScrollDown, "Scroll page content down"),
        (config.scroll_up.as_str(), Action::ScrollUp, "Scroll page content up"),
        (config.address.as_str(), Action::EditAddress, "Go to fragment"),
        (config.help.as_str(), Action::ToggleHelp, "Toggle help"),
        (config.quit.as_str(), Action::Quit, "Quit"),
    ]
}

/// Key-to-action table for normal mode
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Build the table. Quit is bound first so a conflicting page key
    /// can never shadow it; Ctrl+C always quits.
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut entries = configured(config);
        entries.rotate_right(1);

        for (notation, action, _) in entries {
            let Some(binding) = parse_key_binding(notation) else {
                warn!(notation, ?action, "Invalid key binding, ignoring");
                continue;
            };
            match bindings.entry(binding) {
                Entry::Occupied(existing) => warn!(
                    notation,
                    existing = ?existing.get(),
                    ?action,
                    "Key already bound, ignoring"
                ),
                Entry::Vacant(slot) => {
                    slot.insert(action);
                }
            }
        }
        bindings.insert(
            KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit,
        );

        Self { bindings }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Look up a key as the terminal reported it. Shifted punctuation
    /// ("?", "#") arrives with SHIFT set on most terminals.
    pub fn lookup(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<&Action> {
        if let Some(action) = self.get(&KeyBinding::new(code, modifiers)) {
            return Some(action);
        }
        match code {
            KeyCode::Char(c) if modifiers == KeyModifiers::SHIFT && !c.is_ascii_alphabetic() => {
                self.get(&KeyBinding::plain(code))
            }
            KeyCode::Char(c) if modifiers == KeyModifiers::NONE && c.is_ascii_uppercase() => {
                self.get(&KeyBinding::new(code, KeyModifiers::SHIFT))
            }
            _ => None,
        }
    }

    /// Bindings in a stable order for the help popup
    pub fn describe(config: &KeymapConfig) -> Vec<(String, &'static str)> {
        configured(config)
            .into_iter()
            .map(|(notation, _, help)| (notation.to_string(), help))
            .collect()
    }
}

/// Parse Vim-style notation: a single character ("j", "G" for Shift+g,
/// "#"), or `<...>` with optional `C-`/`S-`/`A-` prefixes around a key
/// name ("<C-e>", "<S-Tab>", "<PageDown>").
pub fn parse_key_binding(notation: &str) -> Option<KeyBinding> {
    let notation = notation.trim();

    let Some(inner) = notation.strip_prefix('<').and_then(|s| s.strip_suffix('>')) else {
        let mut chars = notation.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let modifiers = if c.is_ascii_uppercase() {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        return Some(KeyBinding::new(KeyCode::Char(c), modifiers));
    };

    let mut modifiers = KeyModifiers::NONE;
    let mut name = inner;
    while let Some((prefix, rest)) = name.split_once('-').filter(|(_, rest)| !rest.is_empty()) {
        modifiers |= match prefix {
            "C" | "c" => KeyModifiers::CONTROL,
            "S" | "s" => KeyModifiers::SHIFT,
            "A" | "a" | "M" | "m" => KeyModifiers::ALT,
            _ => return None,
        };
        name = rest;
    }
    key_name(name).map(|code| KeyBinding::new(code, modifiers))
}

fn key_name(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        other => {
            if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(KeyCode::F(n));
            }
            let mut chars = other.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };
    Some(code)
}
