use ratatui::style::Color;

/// Colors used by the page, navigation and status widgets
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Page background
    pub bg0: Color,
    /// Status bar and popups
    pub bg1: Color,
    /// Borders of inactive chrome
    pub bg2: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey1: Color,
    pub grey2: Color,
    /// Titles and the active navigation bullet
    pub accent: Color,
    /// Lock indicator while the cooldown is running
    pub warning: Color,
    pub error: Color,
    pub success: Color,
    /// Address fragment
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        gruvbox_dark()
    }
}

/// Resolve a theme by name; unknown names fall back to gruvbox-dark
pub fn load_theme(name: &str) -> Theme {
    match name.trim().to_lowercase().as_str() {
        "nord" => nord(),
        "dracula" => dracula(),
        "monokai" => monokai(),
        "one-dark" | "onedark" => one_dark(),
        _ => gruvbox_dark(),
    }
}

fn gruvbox_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        grey2: Color::Rgb(0xa8, 0x99, 0x84),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
        warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        error: Color::Rgb(0xea, 0x69, 0x62),
        success: Color::Rgb(0xa9, 0xb6, 0x65),
        info: Color::Rgb(0x7d, 0xae, 0xa3),
    }
}

fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40),
        bg1: Color::Rgb(0x3b, 0x42, 0x52),
        bg2: Color::Rgb(0x43, 0x4c, 0x5e),
        fg0: Color::Rgb(0xec, 0xef, 0xf4),
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
        grey1: Color::Rgb(0x5e, 0x68, 0x7a),
        grey2: Color::Rgb(0xd8, 0xde, 0xe9),
        accent: Color::Rgb(0x8f, 0xbc, 0xbb),
        warning: Color::Rgb(0xd0, 0x87, 0x70),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
        success: Color::Rgb(0xa3, 0xbe, 0x8c),
        info: Color::Rgb(0x88, 0xc0, 0xd0),
    }
}

fn dracula() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36),
        bg1: Color::Rgb(0x21, 0x22, 0x2c),
        bg2: Color::Rgb(0x44, 0x47, 0x5a),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg1: Color::Rgb(0xe9, 0xe9, 0xea),
        grey1: Color::Rgb(0x5a, 0x5c, 0x6d),
        grey2: Color::Rgb(0x7a, 0x7c, 0x8d),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
        warning: Color::Rgb(0xff, 0xb8, 0x6c),
        error: Color::Rgb(0xff, 0x55, 0x55),
        success: Color::Rgb(0x50, 0xfa, 0x7b),
        info: Color::Rgb(0x8b, 0xe9, 0xfd),
    }
}

fn monokai() -> Theme {
    Theme {
        bg0: Color::Rgb(0x27, 0x28, 0x22),
        bg1: Color::Rgb(0x3e, 0x3d, 0x32),
        bg2: Color::Rgb(0x49, 0x48, 0x3e),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg1: Color::Rgb(0xd0, 0xd0, 0xc0),
        grey1: Color::Rgb(0x5f, 0x5c, 0x4d),
        grey2: Color::Rgb(0x90, 0x8c, 0x77),
        accent: Color::Rgb(0xae, 0x81, 0xff),
        warning: Color::Rgb(0xfd, 0x97, 0x1f),
        error: Color::Rgb(0xf9, 0x26, 0x72),
        success: Color::Rgb(0xa6, 0xe2, 0x2e),
        info: Color::Rgb(0x66, 0xd9, 0xef),
    }
}

fn one_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34),
        bg1: Color::Rgb(0x21, 0x25, 0x2b),
        bg2: Color::Rgb(0x3e, 0x44, 0x51),
        fg0: Color::Rgb(0xab, 0xb2, 0xbf),
        fg1: Color::Rgb(0x9d, 0xa5, 0xb4),
        grey1: Color::Rgb(0x4b, 0x52, 0x63),
        grey2: Color::Rgb(0x7f, 0x84, 0x8e),
        accent: Color::Rgb(0x56, 0xb6, 0xc2),
        warning: Color::Rgb(0xd1, 0x9a, 0x66),
        error: Color::Rgb(0xe0, 0x6c, 0x75),
        success: Color::Rgb(0x98, 0xc3, 0x79),
        info: Color::Rgb(0x61, 0xaf, 0xef),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme() {
        assert_eq!(load_theme("Nord"), nord());
        assert_eq!(load_theme("onedark"), one_dark());
        assert_eq!(load_theme("unknown"), Theme::default());
    }
}
