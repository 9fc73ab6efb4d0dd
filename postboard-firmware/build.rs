//! Build script for postboard-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates postboard.toml at compile time
//! - Generates the compiled-in view and serial configuration

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use postboard_core::layout::MAX_LAYOUT_LINES;
use postboard_core::{SizeProfile, ViewConfig};
use serde::Deserialize;

/// Top-level layout of postboard.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    view: ViewConfig,
    serial: SerialSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SerialSection {
    baudrate: u32,
}

impl Default for SerialSection {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

fn main() {
    setup_linker();
    let config = load_config();
    validate_view(&config.view);
    validate_serial(&config.serial);
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse postboard.toml
fn load_config() -> ConfigFile {
    println!("cargo:rerun-if-changed=postboard.toml");

    let config_path = Path::new("postboard.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: postboard.toml not found!                                ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a postboard.toml configuration file.      ║\n\
            ║  Please create one in the postboard-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read postboard.toml                            ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            // Syntax errors, unknown keys and wrong value types all land here
            let message = e.to_string();
            let lines: Vec<String> = message
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect();
            config_error("Invalid postboard.toml", &lines);
        }
    }
}

/// Validate the [view] section
fn validate_view(view: &ViewConfig) {
    let mut errors = Vec::new();

    if !(64..=1024).contains(&view.screen_width) {
        errors.push("[view] screen_width must be 64-1024".to_string());
    }
    if !(64..=1024).contains(&view.screen_height) {
        errors.push("[view] screen_height must be 64-1024".to_string());
    }
    if view.header_height < 0 || view.footer_height < 0 || view.padding < 0 {
        errors.push("[view] header_height, footer_height, padding must be >= 0".to_string());
    }
    if view.bottom_margin < 0 {
        errors.push("[view] bottom_margin must be >= 0".to_string());
    }
    if view.visible_height() <= 0 {
        errors.push("[view] header and footer leave no room for text".to_string());
    }
    if view.content_top() >= view.screen_height - view.bottom_margin {
        errors.push("[view] no text line would start above bottom_margin".to_string());
    }

    if view.visible_height() > 0 && !view.fits_layout() {
        errors.push(format!(
            "[view] up to {} text lines visible, at most {} supported",
            view.max_visible_lines(),
            MAX_LAYOUT_LINES
        ));
    }

    let line_width = view.text_size.chars_per_line() as i32 * glyph_width(view.text_size);
    if view.padding + line_width > view.screen_width {
        errors.push(format!(
            "[view] {} px of text does not fit in screen_width",
            line_width
        ));
    }

    if view.refresh_interval_ms < 1_000 {
        errors.push("[view] refresh_interval_ms must be at least 1000".to_string());
    }
    if view.debounce_ms > 1_000 {
        errors.push("[view] debounce_ms must be 0-1000".to_string());
    }
    if view.scroll_step <= 0 {
        errors.push("[view] scroll_step must be positive".to_string());
    }

    if !errors.is_empty() {
        config_error("Invalid view configuration", &errors);
    }
}

/// Validate the [serial] section
fn validate_serial(serial: &SerialSection) {
    const BAUDRATES: [u32; 8] = [9600, 19200, 38400, 57600, 115200, 230400, 460800, 921600];

    if !BAUDRATES.contains(&serial.baudrate) {
        config_error(
            "Invalid serial configuration",
            &[format!("[serial] unsupported baudrate {}", serial.baudrate)],
        );
    }
}

/// Width in pixels of one glyph of the panel font for a profile
fn glyph_width(profile: SizeProfile) -> i32 {
    match profile {
        SizeProfile::Large => 9,
        SizeProfile::Small => 6,
    }
}

/// Write the validated configuration as Rust constants
fn generate_config(config: &ConfigFile) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let view = &config.view;
    let text_size = match view.text_size {
        SizeProfile::Large => "SizeProfile::Large",
        SizeProfile::Small => "SizeProfile::Small",
    };

    let code = format!(
        "/// View configuration from postboard.toml\n\
         pub const VIEW_CONFIG: ViewConfig = ViewConfig {{\n\
         \x20   screen_width: {},\n\
         \x20   screen_height: {},\n\
         \x20   header_height: {},\n\
         \x20   padding: {},\n\
         \x20   footer_height: {},\n\
         \x20   bottom_margin: {},\n\
         \x20   refresh_interval_ms: {},\n\
         \x20   debounce_ms: {},\n\
         \x20   scroll_step: {},\n\
         \x20   text_size: {},\n\
         }};\n\
         \n\
         /// Producer link baud rate from postboard.toml\n\
         pub const SERIAL_BAUDRATE: u32 = {};\n",
        view.screen_width,
        view.screen_height,
        view.header_height,
        view.padding,
        view.footer_height,
        view.bottom_margin,
        view.refresh_interval_ms,
        view.debounce_ms,
        view.scroll_step,
        text_size,
        config.serial.baudrate,
    );

    fs::write(out_dir.join("config.rs"), code).unwrap();
}

fn config_error(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
