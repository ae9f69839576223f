//! [`Host`] that writes a Slate JavaScript config.
//!
//! Each binding becomes one line:
//!
//! ```js
//! slate.bind("e:1,alt,shift", slate.operation("move", {"x":"0 + 0 * (screenSizeX - 375) / 6", ...}));
//! slate.bind("h:ctrl,shift", slate.operation("focus", {"direction":"left"}));
//! slate.bind("esc:1,alt,shift", function(){});
//! ```
//!
//! Geometry stays symbolic, so Slate resolves `screenSizeX`/`screenSizeY`
//! each time the hotkey fires.

use crate::operation::{Hotkey, Operation};
use crate::traits::Host;
use std::io::Write;

/// Errors produced while writing the script.
#[derive(Debug, thiserror::Error)]
pub enum SlateScriptError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Streams `slate.bind(...)` calls to any [`Write`] sink.
pub struct SlateScriptHost<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> SlateScriptHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> Result<W, SlateScriptError> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn operation_js(operation: &Operation) -> Result<String, SlateScriptError> {
        Ok(match operation {
            Operation::Move(rect) => format!(
                "slate.operation(\"move\", {})",
                serde_json::to_string(rect)?
            ),
            Operation::Focus { direction } => format!(
                "slate.operation(\"focus\", {})",
                serde_json::json!({ "direction": direction })
            ),
            Operation::Noop => "function(){}".to_string(),
        })
    }
}

impl<W: Write> Host for SlateScriptHost<W> {
    type Error = SlateScriptError;

    fn bind(&mut self, hotkey: &Hotkey, operation: &Operation) -> Result<(), SlateScriptError> {
        if !self.header_written {
            writeln!(self.out, "// Generated by slategrid. Do not edit.")?;
            self.header_written = true;
        }
        let key = serde_json::to_string(&hotkey.to_string())?;
        writeln!(
            self.out,
            "slate.bind({}, {});",
            key,
            Self::operation_js(operation)?
        )?;
        Ok(())
    }
}
