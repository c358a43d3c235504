//! Browser launch capability
//!
//! Opening the default browser is a best-effort side effect: failure is
//! logged and the server keeps serving. The capability is a trait so tests
//! can substitute a fake instead of depending on the host environment.

use crate::logger;
use std::io;
use std::process::{Command, Stdio};

/// One operation: open the default browser at a URL
pub trait BrowserOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs with the platform's default handler
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut command = open_command(url);
        // Detach: the browser outlives the request, and its output is noise
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command.spawn().map(|_| ())
    }
}

#[cfg(target_os = "macos")]
fn open_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn open_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

/// Best-effort launch; failure is reported and swallowed
pub fn launch(opener: &dyn BrowserOpener, url: &str) {
    logger::log_browser_opening(url);
    if let Err(err) = opener.open(url) {
        logger::log_browser_fallback(url, &err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
    }

    impl BrowserOpener for RecordingOpener {
        fn open(&self, url: &str) -> io::Result<()> {
            self.opened.lock().expect("lock").push(url.to_string());
            Ok(())
        }
    }

    struct FailingOpener;

    impl BrowserOpener for FailingOpener {
        fn open(&self, _url: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no display"))
        }
    }

    #[test]
    fn test_launch_passes_url_to_opener() {
        let opener = RecordingOpener {
            opened: Mutex::new(Vec::new()),
        };
        launch(&opener, "http://localhost:8080/app.html");
        assert_eq!(
            *opener.opened.lock().expect("lock"),
            vec!["http://localhost:8080/app.html".to_string()]
        );
    }

    #[test]
    fn test_launch_swallows_failure() {
        // Must not panic or propagate; the server continues either way
        launch(&FailingOpener, "http://localhost:8080/app.html");
    }
}
