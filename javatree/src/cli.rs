//! CLI argument definitions for javatree

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Parse a Java source file and print the resulting AST.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The Java file to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// What syntax to use
    #[arg(long = "type", value_enum, default_value_t = SyntaxKind::Java)]
    pub syntax: SyntaxKind,

    /// Where to save the output. The special name "STDOUT" prints to the
    /// console; "NUL" suppresses output entirely.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Log level
    #[arg(value_enum, short, long, default_value_t = LogLevel::Error)]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }

    /// Resolve the `--out` argument. Without it the AST lands next to
    /// the input, with a `.json` extension.
    pub fn output_target(&self) -> OutputTarget {
        match &self.out {
            Some(path) if path.as_os_str() == "STDOUT" => OutputTarget::Stdout,
            Some(path) if path.as_os_str() == "NUL" => OutputTarget::Null,
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::File(self.file.with_extension("json")),
        }
    }
}

/// Input syntaxes. Only Java for now.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SyntaxKind {
    #[value(name = "Java")]
    Java,
}

/// Where the serialized AST goes
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    Null,
    File(PathBuf),
}

/// Log level of the CLI
#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum LogLevel {
    /// Only report errors
    #[default]
    Error,
    Warn,
    Info,
    /// Log internal detail, including timing
    Debug,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}
