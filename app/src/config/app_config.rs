//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;

use mono_bitmap::{ConvertOptions, DEFAULT_TARGET_WIDTH, DitherMode};

use super::validation::validate_setting;
use crate::sink::Alignment;

const DEFAULT_FEED_LINES: u16 = 2;

/// Runtime configuration populated from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub target_width: u32,
    pub dither: bool,
    pub rotate_print: bool,
    pub align: Alignment,
    pub feed_lines: u16,
    pub output_path: PathBuf,
    pub dry_run_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            dither: true,
            rotate_print: false,
            align: Alignment::Center,
            feed_lines: DEFAULT_FEED_LINES,
            output_path: PathBuf::from("."),
            dry_run_mode: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load configuration from a key lookup. Invalid values are logged
    /// and replaced by their defaults.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            let Some(value) = lookup(key) else {
                return String::new();
            };
            match validate_setting(key, &value) {
                Ok(()) => value,
                Err(e) => {
                    tracing::warn!("Ignoring invalid setting {key}={value:?}: {e}");
                    String::new()
                }
            }
        };
        let defaults = Self::default();

        Self {
            target_width: parse_or(&g("TARGET_WIDTH"), defaults.target_width),
            dither: parse_bool(&g("DITHER"), defaults.dither),
            rotate_print: parse_bool(&g("ROTATE_PRINT"), defaults.rotate_print),
            align: parse_or(&g("PRINT_ALIGN"), defaults.align),
            feed_lines: parse_or(&g("FEED_LINES"), defaults.feed_lines),
            output_path: {
                let p = g("OUTPUT_PATH");
                if p.is_empty() {
                    defaults.output_path
                } else {
                    PathBuf::from(p)
                }
            },
            dry_run_mode: parse_bool(&g("DRY_RUN_MODE"), defaults.dry_run_mode),
        }
    }

    /// Conversion options derived from this configuration.
    pub fn convert_options(&self) -> ConvertOptions {
        let mode = if self.dither {
            DitherMode::FloydSteinberg
        } else {
            DitherMode::Threshold
        };
        ConvertOptions::new()
            .with_target_width(self.target_width)
            .with_dither(mode)
            .with_rotate_print(self.rotate_print)
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_bool(s: &str, default: bool) -> bool {
    if s.is_empty() {
        return default;
    }
    s == "true"
}
