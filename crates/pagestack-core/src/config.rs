use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagestackConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Paging behaviour: selectors, direction, looping, timing and sync flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Selector of the element holding the pages
    #[serde(default = "default_container")]
    pub container: String,
    /// Selector matching each page inside the container
    #[serde(default = "default_page_selector")]
    pub page_selector: String,
    /// Slide direction, see [`SlideDirection::from_alias`]
    #[serde(default = "default_direction")]
    pub direction: String,
    /// Selector of an optional menu whose `data-anchor` items navigate
    #[serde(default)]
    pub menu: Option<String>,
    /// Anchor names by page position (used for navigation links)
    #[serde(default)]
    pub anchors: Vec<String>,
    /// Transition duration in milliseconds
    #[serde(default = "default_scrolling_speed")]
    pub scrolling_speed_ms: u64,
    /// Touch threshold as a percentage of the page extent
    #[serde(default = "default_touch_sensitivity")]
    pub touch_sensitivity: f64,
    /// Wrap to the last page when moving back from the first one
    #[serde(default)]
    pub loop_top: bool,
    /// Wrap to the first page when moving forward from the last one
    #[serde(default)]
    pub loop_bottom: bool,
    /// Arrow/Page/Home/End navigation
    #[serde(default = "default_true")]
    pub keyboard_scrolling: bool,
    /// Keep the address fragment in sync with the active page
    #[serde(default)]
    pub hash_history: bool,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            page_selector: default_page_selector(),
            direction: default_direction(),
            menu: None,
            anchors: Vec::new(),
            scrolling_speed_ms: default_scrolling_speed(),
            touch_sensitivity: default_touch_sensitivity(),
            loop_top: false,
            loop_bottom: false,
            keyboard_scrolling: default_true(),
            hash_history: false,
        }
    }
}

impl PagingConfig {
    /// Resolved slide direction
    pub fn slide_direction(&self) -> SlideDirection {
        SlideDirection::from_alias(&self.direction)
    }

    /// Apply caller overrides on top of the current values
    pub fn apply(&mut self, options: &PagingOptions) {
        if let Some(ref v) = options.container {
            self.container = v.clone();
        }
        if let Some(ref v) = options.page_selector {
            self.page_selector = v.clone();
        }
        if let Some(ref v) = options.direction {
            self.direction = v.clone();
        }
        if let Some(ref v) = options.menu {
            self.menu = Some(v.clone());
        }
        if let Some(ref v) = options.anchors {
            self.anchors = v.clone();
        }
        if let Some(v) = options.scrolling_speed_ms {
            self.scrolling_speed_ms = v;
        }
        if let Some(v) = options.touch_sensitivity {
            self.touch_sensitivity = v;
        }
        if let Some(v) = options.loop_top {
            self.loop_top = v;
        }
        if let Some(v) = options.loop_bottom {
            self.loop_bottom = v;
        }
        if let Some(v) = options.keyboard_scrolling {
            self.keyboard_scrolling = v;
        }
        if let Some(v) = options.hash_history {
            self.hash_history = v;
        }
    }
}

/// Navigation indicator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Sync the indicator with the active page
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Build the indicator from the page list at initialization
    #[serde(default)]
    pub dynamic: bool,
    /// Selector of the indicator container
    #[serde(default = "default_nav_container")]
    pub container: String,
    /// Screen edge the indicator sits on ("left", "right", "top", "bottom")
    #[serde(default = "default_nav_position")]
    pub position: String,
    /// Extra classes for the indicator container
    #[serde(default)]
    pub class: Vec<String>,
    /// Tooltip text by page position
    #[serde(default)]
    pub tooltips: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            dynamic: false,
            container: default_nav_container(),
            position: default_nav_position(),
            class: Vec::new(),
            tooltips: Vec::new(),
        }
    }
}

impl NavigationConfig {
    pub fn apply(&mut self, options: &NavigationOptions) {
        if let Some(v) = options.enabled {
            self.enabled = v;
        }
        if let Some(v) = options.dynamic {
            self.dynamic = v;
        }
        if let Some(ref v) = options.container {
            self.container = v.clone();
        }
        if let Some(ref v) = options.position {
            self.position = v.clone();
        }
        if let Some(ref v) = options.class {
            self.class = v.clone();
        }
        if let Some(ref v) = options.tooltips {
            self.tooltips = v.clone();
        }
    }
}

/// Caller overrides for `configure()`. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagingOptions {
    pub container: Option<String>,
    pub page_selector: Option<String>,
    pub direction: Option<String>,
    pub menu: Option<String>,
    pub anchors: Option<Vec<String>>,
    pub scrolling_speed_ms: Option<u64>,
    pub touch_sensitivity: Option<f64>,
    pub loop_top: Option<bool>,
    pub loop_bottom: Option<bool>,
    pub keyboard_scrolling: Option<bool>,
    pub hash_history: Option<bool>,
    pub navigation: Option<NavigationOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationOptions {
    pub enabled: Option<bool>,
    pub dynamic: Option<bool>,
    pub container: Option<String>,
    pub position: Option<String>,
    pub class: Option<Vec<String>>,
    pub tooltips: Option<Vec<String>>,
}

/// Direction the outgoing page slides towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Axis along which pages are stacked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl SlideDirection {
    /// Resolve a configured direction name, including its aliases.
    /// Unknown names fall back to `Up`.
    pub fn from_alias(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" | "horizontal" => Self::Left,
            "right" | "horizontal-inverted" => Self::Right,
            "down" | "bottom" | "vertical-inverted" => Self::Down,
            _ => Self::Up,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Class token toggled on displaced pages
    pub fn translation_class(&self) -> String {
        format!("scrolled-{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a transition or in-page scroll is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// In-page smooth scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            theme: default_theme_name(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve used by animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

/// Smooth scrolling inside independently scrollable pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Lines per step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Next page (same edge rules as arrow-down)
    #[serde(default = "default_key_next_page")]
    pub next_page: String,
    /// Previous page (same edge rules as arrow-up)
    #[serde(default = "default_key_prev_page")]
    pub prev_page: String,
    /// First page
    #[serde(default = "default_key_first_page")]
    pub first_page: String,
    /// Last page
    #[serde(default = "default_key_last_page")]
    pub last_page: String,
    /// Scroll the active page's content down
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    /// Scroll the active page's content up
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    /// Toggle the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
    /// Edit the address fragment
    #[serde(default = "default_key_address")]
    pub address: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_page: default_key_next_page(),
            prev_page: default_key_prev_page(),
            first_page: default_key_first_page(),
            last_page: default_key_last_page(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            help: default_key_help(),
            address: default_key_address(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_page() -> String { "j".to_string() }
fn default_key_prev_page() -> String { "k".to_string() }
fn default_key_first_page() -> String { "g".to_string() }
fn default_key_last_page() -> String { "G".to_string() }
fn default_key_scroll_down() -> String { "<C-e>".to_string() }
fn default_key_scroll_up() -> String { "<C-y>".to_string() }
fn default_key_help() -> String { "?".to_string() }
fn default_key_address() -> String { "#".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagestack")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_container() -> String {
    "#ps-pages".to_string()
}

fn default_page_selector() -> String {
    ".ps-page".to_string()
}

fn default_direction() -> String {
    "vertical".to_string()
}

fn default_scrolling_speed() -> u64 {
    700
}

fn default_touch_sensitivity() -> f64 {
    5.0
}

fn default_nav_container() -> String {
    "#ps-nav".to_string()
}

fn default_nav_position() -> String {
    "right".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl PagestackConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Merge caller overrides (the `configure(options)` operation)
    pub fn merge(&mut self, options: &PagingOptions) {
        self.paging.apply(options);
        if let Some(ref nav) = options.navigation {
            self.navigation.apply(nav);
        }
    }

    /// Sanity checks that serde cannot express
    pub fn validate(&self) -> crate::Result<()> {
        if self.paging.container.trim().is_empty() {
            return Err(crate::Error::Config("paging.container is empty".into()));
        }
        if self.paging.page_selector.trim().is_empty() {
            return Err(crate::Error::Config("paging.page_selector is empty".into()));
        }
        if !(self.paging.touch_sensitivity.is_finite() && self.paging.touch_sensitivity >= 0.0) {
            return Err(crate::Error::Config(format!(
                "paging.touch_sensitivity must be a non-negative number, got {}",
                self.paging.touch_sensitivity
            )));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pagestack/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pagestack")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("pagestack.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
