use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::surface::FieldSurface;
use crate::error::{AutofillError, Result};
use crate::field::field_model::RawField;
use crate::fill::plan_model::{FillPlan, Locator, PlannedFill};

/// How to start the Node.js helper that drives the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    #[serde(default = "default_node")]
    pub node: String,
    #[serde(default = "default_script")]
    pub script: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            node: default_node(),
            script: default_script(),
        }
    }
}

fn default_node() -> String {
    "node".to_string()
}

fn default_script() -> String {
    "node/field_server.js".to_string()
}

/// One fill target on the wire: the CSS selector when the locator has one,
/// otherwise the 1-based input position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillTarget {
    pub identifier: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl From<&PlannedFill> for FillTarget {
    fn from(entry: &PlannedFill) -> Self {
        let selector = entry.locator.css_selector();
        let position = match &entry.locator {
            Locator::Position(n) => Some(*n),
            _ => None,
        };
        Self {
            identifier: entry.identifier.clone(),
            value: entry.value.clone(),
            selector,
            position,
        }
    }
}

/// Request sent to the helper over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrowserRequest {
    Navigate { cmd: &'static str, url: String },
    ExtractFields { cmd: &'static str },
    FillFields { cmd: &'static str, fields: Vec<FillTarget> },
    Quit { cmd: &'static str },
}

impl BrowserRequest {
    pub fn navigate(url: &str) -> Self {
        BrowserRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn extract_fields() -> Self {
        BrowserRequest::ExtractFields {
            cmd: "extract_fields",
        }
    }

    pub fn fill_fields(plan: &FillPlan) -> Self {
        BrowserRequest::FillFields {
            cmd: "fill_fields",
            fields: plan.iter().map(FillTarget::from).collect(),
        }
    }

    pub fn quit() -> Self {
        BrowserRequest::Quit { cmd: "quit" }
    }
}

/// Response read from the helper's stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub filled: Option<usize>,
}

impl BrowserResponse {
    /// The `filled` count of a `fill_fields` reply. A reply without one is a
    /// protocol error, not zero fields.
    pub fn filled_count(&self) -> Result<usize> {
        self.filled.ok_or_else(|| AutofillError::SessionProtocol {
            command: "fill_fields".into(),
            error: "no filled count in response".into(),
        })
    }
}

/// A persistent browser session backed by a long-lived Node.js helper.
///
/// Commands go out as NDJSON on stdin, responses come back on stdout.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    current_url: Option<String>,
    closed: bool,
}

impl BrowserSession {
    /// Spawn the helper and wait for its ready signal.
    pub fn launch(options: &SessionOptions) -> Result<Self> {
        tracing::debug!(node = %options.node, script = %options.script, "launching browser helper");

        let mut child = Command::new(&options.node)
            .arg(&options.script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| AutofillError::SubprocessSpawn {
                script: options.script.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            AutofillError::SessionIo("failed to capture helper stdin".into())
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            AutofillError::SessionIo("failed to capture helper stdout".into())
        })?;

        let mut reader = BufReader::new(stdout);
        let response = read_response(&mut reader, "ready signal")?;

        if !response.ok || response.ready != Some(true) {
            return Err(AutofillError::SessionProtocol {
                command: "launch".into(),
                error: "helper did not send a ready signal".into(),
            });
        }

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            current_url: None,
            closed: false,
        })
    }

    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse> {
        let json = serde_json::to_string(request).map_err(|e| AutofillError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .and_then(|_| self.stdin.flush())
            .map_err(|e| AutofillError::SessionIo(format!("failed to write to helper: {}", e)))?;

        read_response(&mut self.reader, "helper response")
    }

    fn send_ok(&mut self, request: &BrowserRequest, command: &str) -> Result<BrowserResponse> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(AutofillError::SessionProtocol {
                command: command.into(),
                error: response.error.unwrap_or_else(|| "unknown error".into()),
            });
        }
        Ok(response)
    }

    pub fn navigate(&mut self, url: &str) -> Result<()> {
        self.send_ok(&BrowserRequest::navigate(url), "navigate")?;
        self.current_url = Some(url.to_string());
        Ok(())
    }

    /// Last URL navigated to (cached, no browser call).
    pub fn last_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    fn request_fields(&mut self) -> Result<Vec<RawField>> {
        let response = self.send_ok(&BrowserRequest::extract_fields(), "extract_fields")?;
        match response.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(data) => serde_json::from_value(data).map_err(|e| AutofillError::JsonParse {
                context: "extract_fields data".into(),
                source: e,
            }),
        }
    }

    fn request_fill(&mut self, plan: &FillPlan) -> Result<usize> {
        let response = self.send_ok(&BrowserRequest::fill_fields(plan), "fill_fields")?;
        response.filled_count()
    }

    pub fn quit(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // Best effort: the helper may already be gone
        let _ = self.send(&BrowserRequest::quit());
        let _ = self.child.wait();
        Ok(())
    }
}

impl FieldSurface for BrowserSession {
    fn extract_fields(&mut self) -> Result<Vec<RawField>> {
        self.request_fields()
            .map_err(|e| AutofillError::Extraction(e.to_string()))
    }

    fn inject(&mut self, plan: &FillPlan) -> Result<usize> {
        self.request_fill(plan)
            .map_err(|e| AutofillError::Injection(e.to_string()))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}

fn read_response<R: BufRead>(reader: &mut R, context: &str) -> Result<BrowserResponse> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| AutofillError::SessionIo(format!("failed to read {}: {}", context, e)))?;

    if line.trim().is_empty() {
        return Err(AutofillError::SessionIo(format!(
            "empty {} (helper may have exited)",
            context
        )));
    }

    serde_json::from_str(line.trim()).map_err(|e| AutofillError::JsonParse {
        context: context.to_string(),
        source: e,
    })
}
