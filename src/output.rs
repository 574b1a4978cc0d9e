use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum OutputMode {
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

    pub fn render<T: Serialize>(&self, text_line: &str, json_value: &T) -> AppResult<String> {
        match self.mode {
            OutputMode::Text => Ok(text_line.to_string()),
            OutputMode::Json => Ok(serde_json::to_string_pretty(json_value)?),
        }
    }

    pub fn emit<T: Serialize>(&self, text_line: &str, json_value: &T) -> AppResult<()> {
        println!("{}", self.render(text_line, json_value)?);
        Ok(())
    }
}
