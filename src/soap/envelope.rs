use std::borrow::Cow;
use std::fmt::Write;

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace of the ICUTech service operations.
pub const DEFAULT_NAMESPACE: &str = "urn:ICUTech.Intf-IICUTech";

/// A single remote call: the operation name plus its arguments in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operation: String,
    pub fields: Vec<(String, String)>,
}

impl OperationRequest {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field. Fields are serialized in insertion order.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Appends a field whose value may be absent; an absent value is sent empty.
    pub fn optional_field(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        let value: String = value.map(Into::into).unwrap_or_default();
        self.field(name, value)
    }

    pub fn to_envelope(&self, namespace: &str) -> String {
        build_envelope(self, namespace)
    }
}

/// Replaces the five XML-reserved characters with their entities.
///
/// Borrows the input when nothing needs escaping.
///
/// ```
/// # use soap_relay::soap::escape_xml;
/// assert_eq!(escape_xml("a&b"), "a&amp;b");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
pub fn escape_xml(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['<', '>', '&', '\'', '"']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 16);
    for c in raw.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Serializes `request` into a SOAP envelope bound to `namespace`.
///
/// Operation and field names are emitted as-is under the `urn` prefix; only
/// field values are escaped.
pub fn build_envelope(request: &OperationRequest, namespace: &str) -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    // Writing into a String cannot fail.
    let _ = write!(
        xml,
        "<soap:Envelope xmlns:soap=\"{}\"\n               xmlns:urn=\"{}\">\n",
        SOAP_ENV_NAMESPACE,
        escape_xml(namespace)
    );
    xml.push_str("    <soap:Body>\n");
    let _ = writeln!(xml, "        <urn:{}>", request.operation);

    for (name, value) in &request.fields {
        let _ = writeln!(
            xml,
            "            <urn:{name}>{}</urn:{name}>",
            escape_xml(value)
        );
    }

    let _ = writeln!(xml, "        </urn:{}>", request.operation);
    xml.push_str("    </soap:Body>\n");
    xml.push_str("</soap:Envelope>");
    xml
}
