//! Standalone entry point for the Markdown viewer. Takes an optional file
//! path on the command line (matching `polo`'s "open with" launch mode)
//! and shows the empty state otherwise.

use std::env;

use gtk4::prelude::*;
use gtk4::{glib, Application};

use core::TranslatorConfig;
use viewer::ViewerWindow;

const APP_ID: &str = "org.example.viewer";

fn main() -> glib::ExitCode {
    let log_root = dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join("viewer");
    if let Err(err) = shared::logger::init_file_logger(log_root, log::LevelFilter::Info) {
        eprintln!("failed to initialize logger: {err}");
    }

    let path_arg = env::args().nth(1);

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| {
        let window = ViewerWindow::new(app, TranslatorConfig::default());
        if let Some(path) = &path_arg {
            if let Err(err) = window.open_file(path) {
                log::warn!("failed to open {path}: {err}");
                window.show_empty_state();
            }
        }
        window.present();
    });

    app.run()
}
