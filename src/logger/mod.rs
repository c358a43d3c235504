//! Logger module
//!
//! Logging utilities for the demo server:
//! - Server lifecycle messages
//! - Timestamped access lines
//! - Error and warning logging
//! - Optional file-based output

pub mod writer;

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to the info/access log
pub fn info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to the error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_listening(addr: &SocketAddr) {
    info(&format!("🚀 Server starting on http://{addr}"));
}

/// One line per handled request, Common Log Format style
pub fn log_access(peer: &SocketAddr, method: &str, path: &str, status: u16, bytes: usize) {
    let time = Local::now().format("%d/%b/%Y:%H:%M:%S %z");
    info(&format!(
        "{} - - [{time}] \"{method} {path}\" {status} {bytes}",
        peer.ip()
    ));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_port_in_use(port: u16) {
    write_error(&format!("❌ Port {port} is already in use!"));
    write_error("Try stopping other servers or pick a different port:");
    write_error(&format!("   demo-server --port {}", port.wrapping_add(1)));
}

pub fn log_startup_error(err: &dyn std::fmt::Display) {
    write_error(&format!("❌ Error starting server: {err}"));
}

pub fn log_browser_opening(url: &str) {
    info(&format!(
        "🌐 Opening PowerPoint Generator in your default browser: {url}"
    ));
}

/// Browser launch failed; the server keeps running
pub fn log_browser_fallback(url: &str, err: &std::io::Error) {
    info(&format!("Could not open browser automatically: {err}"));
    info(&format!("Please navigate to: {url}"));
}

pub fn log_shutdown_signal(signal: &str) {
    info(&format!("\n[SIGNAL] {signal} received, shutting down..."));
}
