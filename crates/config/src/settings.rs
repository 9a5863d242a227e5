// Application settings
// Loaded from ~/.config/lumina/settings.json

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::json::{self, is_default};

/// How an image is scaled when it is first displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZoomMode {
    /// Fit large images, show small ones at 100%
    #[default]
    AutoZoom,
    /// Keep the zoom level from `zoom_lock_value`
    LockZoom,
    ScaleToWidth,
    ScaleToHeight,
    ScaleToFit,
    ScaleToFill,
}

/// File attribute used to order the viewing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadingOrder {
    #[default]
    Name,
    Length,
    CreationTime,
    LastWriteTime,
    Extension,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// What the mouse wheel does over the viewer canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseWheelAction {
    DoNothing,
    #[default]
    Zoom,
    ScrollVertically,
    ScrollHorizontally,
    BrowseImages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    FullScreen,
}

/// Saved main-window geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WindowPlacement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "is_default")]
    pub state: WindowState,
}

impl Default for WindowPlacement {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1280,
            height: 800,
            state: WindowState::Normal,
        }
    }
}

/// Slideshow behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SlideshowSettings {
    /// Seconds between images
    #[serde(
        default = "default_slideshow_interval",
        skip_serializing_if = "is_default_slideshow_interval"
    )]
    pub interval: f32,

    /// Show the remaining-time countdown overlay
    #[serde(
        default = "default_slideshow_countdown",
        skip_serializing_if = "is_default_slideshow_countdown"
    )]
    pub countdown: bool,

    /// Restart from the first image after the last one
    #[serde(skip_serializing_if = "is_default")]
    pub loop_list: bool,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            interval: default_slideshow_interval(),
            countdown: default_slideshow_countdown(),
            loop_list: false,
        }
    }
}

/// Application settings document
///
/// A field still at its declared default is omitted on write and refilled
/// from the same default on read, so a fresh install round-trips as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    #[serde(skip_serializing_if = "is_default")]
    pub window: WindowPlacement,

    #[serde(skip_serializing_if = "is_default")]
    pub zoom_mode: ZoomMode,

    /// Zoom percentage applied while `zoom_mode` is `LockZoom`
    #[serde(
        default = "default_zoom_lock_value",
        skip_serializing_if = "is_default_zoom_lock_value"
    )]
    pub zoom_lock_value: f32,

    #[serde(skip_serializing_if = "is_default")]
    pub loading_order: LoadingOrder,

    #[serde(skip_serializing_if = "is_default")]
    pub loading_order_direction: OrderDirection,

    #[serde(skip_serializing_if = "is_default")]
    pub mouse_wheel_action: MouseWheelAction,

    #[serde(
        default = "default_wheel_ctrl_action",
        skip_serializing_if = "is_default_wheel_ctrl_action"
    )]
    pub mouse_wheel_ctrl_action: MouseWheelAction,

    #[serde(skip_serializing_if = "is_default")]
    pub slideshow: SlideshowSettings,

    /// Language pack file name under `languages/`, empty for built-in English
    #[serde(skip_serializing_if = "is_default")]
    pub language: String,

    /// Theme file name under `themes/`, empty for the built-in dark theme
    #[serde(skip_serializing_if = "is_default")]
    pub theme: String,

    #[serde(skip_serializing_if = "is_default")]
    pub recent_files: Vec<PathBuf>,

    /// Render a checkerboard behind transparent regions
    #[serde(skip_serializing_if = "is_default")]
    pub show_checkerboard: bool,

    /// ICC profile name applied to decoded images, empty for none
    #[serde(skip_serializing_if = "is_default")]
    pub color_profile: String,

    #[serde(
        with = "crate::datetime::timestamp_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_launch_date: Option<NaiveDateTime>,

    #[serde(
        with = "crate::datetime::timestamp_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_update_check: Option<NaiveDateTime>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowPlacement::default(),
            zoom_mode: ZoomMode::AutoZoom,
            zoom_lock_value: default_zoom_lock_value(),
            loading_order: LoadingOrder::Name,
            loading_order_direction: OrderDirection::Asc,
            mouse_wheel_action: MouseWheelAction::Zoom,
            mouse_wheel_ctrl_action: default_wheel_ctrl_action(),
            slideshow: SlideshowSettings::default(),
            language: String::new(),
            theme: String::new(),
            recent_files: Vec::new(),
            show_checkerboard: false,
            color_profile: String::new(),
            first_launch_date: None,
            last_update_check: None,
        }
    }
}

// Paired default/predicate functions keep omission and refill symmetric
// for fields whose default is not the type default.

fn default_zoom_lock_value() -> f32 {
    100.0
}
fn is_default_zoom_lock_value(value: &f32) -> bool {
    *value == default_zoom_lock_value()
}

fn default_wheel_ctrl_action() -> MouseWheelAction {
    MouseWheelAction::ScrollVertically
}
fn is_default_wheel_ctrl_action(value: &MouseWheelAction) -> bool {
    *value == default_wheel_ctrl_action()
}

fn default_slideshow_interval() -> f32 {
    5.0
}
fn is_default_slideshow_interval(value: &f32) -> bool {
    *value == default_slideshow_interval()
}

fn default_slideshow_countdown() -> bool {
    true
}
fn is_default_slideshow_countdown(value: &bool) -> bool {
    *value == default_slideshow_countdown()
}

impl Settings {
    /// Directory holding all Lumina config files
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lumina")
    }

    /// Path of the settings file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    ///
    /// A missing file is the normal first-run case. A file that exists but
    /// cannot be parsed is reported and ignored rather than aborting startup.
    pub fn load() -> Self {
        match Self::load_from(&Self::config_path()) {
            Ok(settings) => settings,
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring unreadable settings file: {e}");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path, propagating all failures
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        json::read_file(path)
    }

    /// Save to the default location, creating the config directory
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.save_to(&path)
    }

    /// Write settings to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        json::write_file(path, self)
    }

    /// Full path of the language pack named by `language`, if any
    pub fn language_path(&self) -> Option<PathBuf> {
        if self.language.is_empty() {
            None
        } else {
            Some(Self::config_dir().join("languages").join(&self.language))
        }
    }

    /// Full path of the theme named by `theme`, if any
    pub fn theme_path(&self) -> Option<PathBuf> {
        if self.theme.is_empty() {
            None
        } else {
            Some(Self::config_dir().join("themes").join(&self.theme))
        }
    }
}
