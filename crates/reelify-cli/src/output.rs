use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

impl OutputFormat {
    /// Encode a value for JSON modes; `None` in human mode
    fn encode(self, value: &Value) -> Option<String> {
        match self {
            OutputFormat::Human => None,
            OutputFormat::Json => serde_json::to_string(value).ok(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(value).ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    Success,
    Error,
    Info,
    Warning,
}

impl Notice {
    fn kind(self) -> &'static str {
        match self {
            Notice::Success => "success",
            Notice::Error => "error",
            Notice::Info => "info",
            Notice::Warning => "warning",
        }
    }

    fn human(self, msg: &str) -> String {
        match self {
            Notice::Success => format!("{} {}", "✓".green(), msg),
            Notice::Error => format!("{} {}", "✗".red(), msg),
            Notice::Info => msg.to_string(),
            Notice::Warning => format!("{} {}", "⚠".yellow(), msg),
        }
    }
}

/// Terminal writer for command results and status lines
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.notice(Notice::Success, msg.as_ref());
    }

    /// Shown even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        self.notice(Notice::Error, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.notice(Notice::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.notice(Notice::Warning, msg.as_ref());
    }

    /// Human text in human mode, the serialized value otherwise
    pub fn render<T: Serialize>(&self, human: impl FnOnce() -> String, data: &T) {
        if self.quiet {
            return;
        }
        if self.is_human() {
            println!("{}", human());
            return;
        }
        match serde_json::to_value(data) {
            Ok(value) => self.print_json(&value),
            Err(e) => self.error(format!("Failed to serialize output: {}", e)),
        }
    }

    fn notice(&self, notice: Notice, msg: &str) {
        if self.quiet && notice != Notice::Error {
            return;
        }
        match (self.is_human(), notice) {
            (true, Notice::Error) => eprintln!("{}", notice.human(msg)),
            (true, _) => println!("{}", notice.human(msg)),
            (false, _) => self.print_json(&notice_json(notice, msg)),
        }
    }

    fn print_json(&self, value: &Value) {
        if let Some(line) = self.format.encode(value) {
            println!("{}", line);
        }
    }
}

fn notice_json(notice: Notice, msg: &str) -> Value {
    json!({ "type": notice.kind(), "message": msg })
}
