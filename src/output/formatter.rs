//! Console rendering for received messages
//!
//! Each message the receive loops pull from the gateway becomes one
//! line, stamped with the local time and a running sequence number.

use chrono::{DateTime, Local};
use std::path::Path;

use crate::models::ReceivedMessage;

const STAMP_FORMAT: &str = "%d/%m/%Y:%H:%M:%S";

/// Formats receive-loop output lines
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Line for the `seq`-th message pulled from the gateway
    pub fn received(&self, seq: u64, message: &ReceivedMessage) -> String {
        self.received_at(Local::now(), seq, message)
    }

    fn received_at(
        &self,
        stamp: DateTime<Local>,
        seq: u64,
        message: &ReceivedMessage,
    ) -> String {
        let stamp = stamp.format(STAMP_FORMAT);
        match message {
            ReceivedMessage::Text(text) => {
                format!("[{} {}]: Received: {}", stamp, seq, text)
            }
            ReceivedMessage::File(file) => format!(
                "[{} {}]: Received: (File) {}, {} bytes",
                stamp,
                seq,
                file.name,
                file.data.len()
            ),
        }
    }

    /// Line for a file payload written to disk
    pub fn saved_file(&self, path: &Path) -> String {
        format!("Saved received file to {}", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilePayload;
    use chrono::TimeZone;

    #[test]
    fn test_received_text_line() {
        let reporter = ConsoleReporter::new();
        let stamp = Local.with_ymd_and_hms(2024, 1, 31, 12, 30, 5).unwrap();
        let message = ReceivedMessage::Text("hi there".to_string());

        assert_eq!(
            reporter.received_at(stamp, 3, &message),
            "[31/01/2024:12:30:05 3]: Received: hi there"
        );
    }

    #[test]
    fn test_received_file_line_reports_name_and_size() {
        let reporter = ConsoleReporter::new();
        let stamp = Local.with_ymd_and_hms(2024, 1, 31, 12, 30, 5).unwrap();
        let message = ReceivedMessage::File(FilePayload {
            name: "report.pdf".to_string(),
            data: vec![0u8; 42],
        });

        assert_eq!(
            reporter.received_at(stamp, 1, &message),
            "[31/01/2024:12:30:05 1]: Received: (File) report.pdf, 42 bytes"
        );
    }

    #[test]
    fn test_saved_file_line() {
        let reporter = ConsoleReporter::new();
        let line = reporter.saved_file(Path::new("./report_1700000000000.pdf"));
        assert_eq!(line, "Saved received file to ./report_1700000000000.pdf");
    }
}
