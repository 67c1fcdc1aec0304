pub mod json;
pub mod text;

use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn emit<T: Serialize>(&self, text_line: &str, json_value: &T) -> AppResult<()> {
        self.emit_lines([text_line], json_value)
    }

    pub fn emit_lines<I, S, T>(&self, text_lines: I, json_value: &T) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        T: Serialize,
    {
        match self.mode {
            OutputMode::Text => text::print_lines(text_lines),
            OutputMode::Json => json::print(json_value),
        }
    }
}
