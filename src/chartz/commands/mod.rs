use crate::report::ReportEntry;
use crate::rows::Row;

pub mod check;
pub mod export;
pub mod flush;
pub mod list;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub rows: Vec<Row>,
    pub affected: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_affected(mut self, ids: Vec<String>) -> Self {
        self.affected = ids;
        self
    }
}

/// Render aggregated report entries as printable messages.
pub fn report_messages(entries: &[ReportEntry]) -> Vec<CmdMessage> {
    entries
        .iter()
        .map(|entry| {
            let content = format!("{}: {}", entry.chart_id, entry.message);
            match entry.severity {
                crate::error::Severity::Warning => CmdMessage::warning(content),
                crate::error::Severity::Error => CmdMessage::error(content),
            }
        })
        .collect()
}
