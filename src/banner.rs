//! Startup and shutdown console text
//!
//! The fixed informational blocks describing the two demo applications.
//! The features listed here live in the served HTML front-ends, not in
//! this crate.

use crate::logger;

const TITLE_RULE: &str = "============================================================";
const FOOTER_RULE: &str = "------------------------------------------------------------";

/// Title block printed before the listener is bound
pub fn title_text() -> String {
    format!(
        "{TITLE_RULE}\n   PowerPoint Generator & LLM Agent Demo Server\n{TITLE_RULE}\n"
    )
}

/// Application list, feature overview, and usage tips
pub fn startup_text(port: u16) -> String {
    let mut text = String::new();

    text.push_str("Available Applications:\n");
    text.push_str(&format!(
        "  🎨 PowerPoint Generator: http://localhost:{port}/app.html\n"
    ));
    text.push_str(&format!(
        "  🤖 LLM Agent Demo:       http://localhost:{port}/index.html\n"
    ));
    text.push_str(&format!(
        "  📋 Quick Demo:           http://localhost:{port}/demo.html\n"
    ));
    text.push_str(&format!(
        "  📚 Examples Gallery:     http://localhost:{port}/examples.html\n"
    ));
    text.push('\n');

    text.push_str("🎨 PowerPoint Generator Features:\n");
    text.push_str("  - Transform text into professional presentations\n");
    text.push_str("  - AI-powered content analysis and slide structuring\n");
    text.push_str("  - Template-based styling with asset preservation\n");
    text.push_str("  - Multi-LLM support (OpenAI, Anthropic, Google)\n");
    text.push_str("  - Real-time preview and download capabilities\n");
    text.push('\n');

    text.push_str("🛠️ LLM Agent Demo Features:\n");
    text.push_str("  - Multi-tool integration (Search, Calculate, Code, API)\n");
    text.push_str("  - Intelligent task planning and execution\n");
    text.push_str("  - Real-time tool monitoring and execution logs\n");
    text.push_str("  - Interactive chat interface with markdown support\n");
    text.push('\n');

    text.push_str("💡 Try these PowerPoint Generator examples:\n");
    text.push_str("  • Paste business plan → 'turn into investor pitch deck'\n");
    text.push_str("  • Paste documentation → 'create training presentation'\n");
    text.push_str("  • Paste research paper → 'make it a conference talk'\n");
    text.push('\n');

    text.push_str("💡 Try these LLM Agent examples:\n");
    text.push_str("  • 'Search for latest AI developments and analyze trends'\n");
    text.push_str("  • 'Calculate compound interest and create visualization'\n");
    text.push_str("  • 'Generate prime numbers and create a chart'\n");
    text.push('\n');

    text.push_str("Press Ctrl+C to stop the server\n");
    text.push_str(FOOTER_RULE);

    text
}

/// Friendly stop message for the interrupt-triggered shutdown path
pub fn shutdown_text() -> String {
    "\n\n🛑 Server stopped by user\nThanks for trying the PowerPoint Generator and LLM Agent demos!"
        .to_string()
}

pub fn print_title() {
    logger::info(&title_text());
}

pub fn print_startup(port: u16) {
    logger::info(&startup_text(port));
}

pub fn print_running() {
    logger::info("\nServer is running... (Ctrl+C to stop)");
}

pub fn print_shutdown() {
    logger::info(&shutdown_text());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_lists_all_applications() {
        let text = startup_text(8080);
        assert!(text.contains("http://localhost:8080/app.html"));
        assert!(text.contains("http://localhost:8080/index.html"));
        assert!(text.contains("http://localhost:8080/demo.html"));
        assert!(text.contains("http://localhost:8080/examples.html"));
    }

    #[test]
    fn test_startup_uses_configured_port() {
        let text = startup_text(9999);
        assert!(text.contains("http://localhost:9999/app.html"));
        assert!(!text.contains("8080"));
    }

    #[test]
    fn test_title_and_shutdown_text() {
        assert!(title_text().contains("PowerPoint Generator & LLM Agent Demo Server"));
        assert!(shutdown_text().contains("Server stopped by user"));
    }
}
