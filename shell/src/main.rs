//! Standalone entry point for the preview panel shell. A real Notepad++
//! plugin would be loaded as a DLL by the host (see
//! `original_source/XarvNppPlugin.cpp`); this binary stands that shape up
//! as an ordinary GTK application window so the panel can be exercised on
//! its own.

use gtk4::prelude::*;
use gtk4::{glib, Application, ApplicationWindow};

use core::TranslatorConfig;
use shell::PreviewPanel;

const APP_ID: &str = "org.example.shell";

fn main() -> glib::ExitCode {
    let log_root = dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join("shell");
    if let Err(err) = shared::logger::init_file_logger(log_root, log::LevelFilter::Info) {
        eprintln!("failed to initialize logger: {err}");
    }

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(|app| {
        let panel = PreviewPanel::new(TranslatorConfig::default());
        panel.set_live_preview(true);

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Markdown Preview")
            .default_width(900)
            .default_height(600)
            .child(panel.widget())
            .build();
        window.present();
    });

    app.run()
}
