//! Interpretation of upstream SOAP replies.
//!
//! Precedence of checks:
//! 1. the document must be well-formed XML
//! 2. a `faultstring` element anywhere wins over everything else
//! 3. a `return` element must exist
//! 4. the `return` text is decoded as JSON when possible, otherwise kept raw

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Value, json};

/// Classification of an unsuccessful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The upstream answered with a SOAP fault.
    RemoteFault,
    /// The reply was not XML or lacked the `return` element.
    MalformedResponse,
    /// The decoded payload carried a non-zero `ResultCode`.
    ApplicationError,
}

/// Outcome of one remote call, as presented to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResult {
    Success { payload: Value },
    Failure { kind: FailureKind, message: String },
}

impl RemoteResult {
    fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        RemoteResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RemoteResult::Success { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            RemoteResult::Success { payload } => Some(payload),
            RemoteResult::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            RemoteResult::Success { .. } => None,
            RemoteResult::Failure { message, .. } => Some(message),
        }
    }
}

/// Parses the raw reply body into a [`RemoteResult`].
///
/// Never fails: every problem with the reply is reported as a
/// [`RemoteResult::Failure`].
pub fn parse_response(body: &str) -> RemoteResult {
    let extracted = match scan_document(body) {
        Ok(extracted) => extracted,
        Err(detail) => {
            tracing::warn!(error = %detail, "Upstream reply is not well-formed XML");
            return RemoteResult::failure(
                FailureKind::MalformedResponse,
                format!("parse error: {detail}"),
            );
        }
    };

    if let Some(fault) = extracted.fault {
        let text = if fault.is_empty() {
            "unknown fault"
        } else {
            fault.as_str()
        };
        tracing::debug!(fault = %text, "Upstream reported a SOAP fault");
        return RemoteResult::failure(FailureKind::RemoteFault, format!("remote fault: {text}"));
    }

    let Some(returned) = extracted.returned else {
        tracing::warn!("Upstream reply has no return element");
        return RemoteResult::failure(
            FailureKind::MalformedResponse,
            "invalid response: no return data",
        );
    };

    interpret_return(returned)
}

/// Decodes the text of the `return` element.
fn interpret_return(text: String) -> RemoteResult {
    let data = match serde_json::from_str::<Value>(&text) {
        Ok(data) if !data.is_null() => data,
        // Plain text is a legitimate reply shape for some operations.
        _ => {
            return RemoteResult::Success {
                payload: json!({ "rawResponse": text }),
            };
        }
    };

    match data.get("ResultCode") {
        Some(code) if code.as_f64() != Some(0.0) => {
            let message = match data.get("ResultMessage") {
                Some(message) if is_truthy(message) => display_code(message),
                _ => format!("error code: {}", display_code(code)),
            };
            tracing::debug!(code = %code, "Upstream returned an application error");
            RemoteResult::failure(FailureKind::ApplicationError, message)
        }
        _ => RemoteResult::Success { payload: data },
    }
}

/// Null, false, zero and the empty string do not count as a message.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_code(code: &Value) -> String {
    match code {
        Value::String(code) => code.clone(),
        other => other.to_string(),
    }
}

/// Text content of the first `faultstring` and `return` elements.
#[derive(Debug, Default)]
struct Extracted {
    fault: Option<String>,
    returned: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Fault,
    Return,
}

/// An element whose text content is being collected.
#[derive(Debug)]
struct Capture {
    target: Target,
    depth: usize,
    text: String,
}

impl Extracted {
    fn wants(&self, local_name: &[u8], open: &[Capture]) -> Option<Target> {
        let target = match local_name {
            b"faultstring" if self.fault.is_none() => Target::Fault,
            b"return" if self.returned.is_none() => Target::Return,
            _ => return None,
        };
        if open.iter().any(|capture| capture.target == target) {
            return None;
        }
        Some(target)
    }

    fn store(&mut self, target: Target, text: String) {
        match target {
            Target::Fault => self.fault = Some(text),
            Target::Return => self.returned = Some(text),
        }
    }
}

/// Walks the whole document, checking well-formedness and collecting the
/// elements of interest. Element names are matched without their prefix.
///
/// Captures may nest, so a `faultstring` inside a `return` is still found.
fn scan_document(xml: &str) -> Result<Extracted, String> {
    let mut reader = Reader::from_str(xml);
    let mut extracted = Extracted::default();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut root_closed = false;
    let mut open: Vec<Capture> = Vec::new();

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => {
                if root_closed {
                    return Err("content after the root element".to_string());
                }
                depth += 1;
                saw_root = true;
                if let Some(target) = extracted.wants(e.local_name().as_ref(), &open) {
                    open.push(Capture {
                        target,
                        depth,
                        text: String::new(),
                    });
                }
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err("content after the root element".to_string());
                }
                saw_root = true;
                if let Some(target) = extracted.wants(e.local_name().as_ref(), &open) {
                    extracted.store(target, String::new());
                }
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                if open.last().is_some_and(|capture| capture.depth == depth) {
                    if let Some(capture) = open.pop() {
                        extracted.store(capture.target, capture.text);
                    }
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(t) => {
                if depth == 0 {
                    if !t.iter().all(u8::is_ascii_whitespace) {
                        return Err("text outside the root element".to_string());
                    }
                    continue;
                }
                if !open.is_empty() {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    for capture in &mut open {
                        capture.text.push_str(&text);
                    }
                }
            }
            Event::CData(c) => {
                if depth == 0 {
                    return Err("CDATA outside the root element".to_string());
                }
                let text = std::str::from_utf8(&c).map_err(|e| e.to_string())?;
                for capture in &mut open {
                    capture.text.push_str(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err("unexpected end of document, unclosed element".to_string());
    }
    if !saw_root {
        return Err("document has no root element".to_string());
    }

    Ok(extracted)
}
