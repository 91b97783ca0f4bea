//! Helpers shared by unit tests.

use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Flatten a test terminal's buffer into one newline-joined string, so
/// tests can assert on visible content without caring about styling.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
