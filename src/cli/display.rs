// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display helpers for the blockdex CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. Colors are only
//! emitted when stdout is a TTY and `NO_COLOR` is unset, so piping the build
//! summary into a log file yields plain text.
//!
//! # Theme detection order
//!
//! 1. `BLOCKDEX_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

/// Width between the `│` borders of a box.
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("BLOCKDEX_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", background 7+ (except 8) is light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// OneDark
mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

/// One Light
mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Stream the human-facing report is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Stdout,
    Stderr,
}

impl Output {
    pub fn is_terminal(self) -> bool {
        match self {
            Output::Stdout => atty::is(atty::Stream::Stdout),
            Output::Stderr => atty::is(atty::Stream::Stderr),
        }
    }
}

static OUTPUT: OnceLock<Output> = OnceLock::new();

/// Select the report stream. Only the first call takes effect; stdout otherwise.
pub fn set_output(output: Output) {
    let _ = OUTPUT.set(output);
}

pub fn output() -> Output {
    OUTPUT.get().copied().unwrap_or(Output::Stdout)
}

pub fn colors_enabled(no_color: bool, is_terminal: bool) -> bool {
    !no_color && is_terminal
}

pub fn use_colors() -> bool {
    colors_enabled(std::env::var_os("NO_COLOR").is_some(), output().is_terminal())
}

/// Theme color plus modifiers, or plain text when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{b}│{r}{}{}{b}│{r}",
        content,
        " ".repeat(pad),
        b = border(),
        r = reset()
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{b}┌{r}{}{b}{}┐{r}",
        label_part,
        "─".repeat(remaining),
        b = border(),
        r = reset()
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{b}├{r}{}{b}{}┤{r}",
        label_part,
        "─".repeat(remaining),
        b = border(),
        r = reset()
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Compression savings, green when positive.
pub fn savings_colored(raw: usize, compressed: usize) -> String {
    if raw == 0 {
        return themed(GRAY, &[], "   N/A");
    }
    let saved_pct = (1.0 - compressed as f64 / raw as f64) * 100.0;
    if saved_pct.abs() < 0.5 {
        themed(GRAY, &[], "    0%")
    } else if saved_pct > 0.0 {
        themed(GREEN, &[BOLD], &format!("{:>5.0}%", saved_pct))
    } else {
        themed(RED, &[BOLD], &format!("{:>+5.0}%", saved_pct))
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Key weight with the title highlighted.
pub fn weight_value(name: &str, weight: f64) -> String {
    let text = format!("{:>8.4}", weight);
    if name == "title" {
        themed(BRIGHT_CYAN, &[BOLD], &text)
    } else {
        themed(BLUE, &[], &text)
    }
}

/// ✓ / ✗ check mark.
pub fn check_mark(ok: bool) -> String {
    if ok {
        themed(GREEN, &[BOLD], "✓")
    } else {
        themed(RED, &[BOLD], "✗")
    }
}

/// Key name, dimmed for generated `component_*`/`paragraph_*` keys.
pub fn key_name(name: &str) -> String {
    if name.starts_with("component_") || name.starts_with("paragraph_") {
        themed(GRAY, &[], name)
    } else {
        themed(YELLOW, &[], name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_need_terminal_and_no_opt_out() {
        assert!(colors_enabled(false, true));
        assert!(!colors_enabled(true, true));
        assert!(!colors_enabled(false, false));
        assert!(!colors_enabled(true, false));
    }

    #[test]
    fn test_visible_len() {
        assert_eq!(visible_len("hola"), 4);
        assert_eq!(visible_len("\x1b[32mhola\x1b[0m"), 4);
        assert_eq!(visible_len(""), 0);
    }

    #[test]
    fn test_rgb_format() {
        assert_eq!(rgb(255, 128, 64), "\x1b[38;2;255;128;64m");
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(onedark::RED, onelight::RED);
        assert_ne!(onedark::GRAY, onelight::GRAY);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_padding_ignores_escapes() {
        let colored = "\x1b[32mok\x1b[0m";
        assert_eq!(visible_len(&pad_left(colored, 5)), 5);
        assert_eq!(visible_len(&pad_right(colored, 5)), 5);
        assert_eq!(pad_right("abcdef", 3), "abcdef");
    }
}
