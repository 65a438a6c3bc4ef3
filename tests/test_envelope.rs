//! Tests for SOAP envelope construction

use proptest::prelude::*;
use soap_relay::soap::{DEFAULT_NAMESPACE, OperationRequest, build_envelope, escape_xml};

#[test]
fn test_login_envelope_escapes_values() {
    let request = OperationRequest::new("Login")
        .field("UserName", "a&b")
        .field("Password", "p\"q");

    let xml = build_envelope(&request, DEFAULT_NAMESPACE);

    assert!(xml.contains("<urn:UserName>a&amp;b</urn:UserName>"));
    assert!(xml.contains("<urn:Password>p&quot;q</urn:Password>"));
}

#[test]
fn test_envelope_structure() {
    let xml = build_envelope(&OperationRequest::new("Login"), DEFAULT_NAMESPACE);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.contains("xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\""));
    assert!(xml.contains("xmlns:urn=\"urn:ICUTech.Intf-IICUTech\""));
    assert!(xml.contains("<soap:Body>"));
    assert!(xml.contains("<urn:Login>"));
    assert!(xml.contains("</urn:Login>"));
    assert!(xml.ends_with("</soap:Envelope>"));
}

#[test]
fn test_fields_keep_insertion_order() {
    let request = OperationRequest::new("RegisterNewCustomer")
        .field("Email", "x@y.z")
        .field("Password", "p")
        .field("FirstName", "F");

    let xml = request.to_envelope(DEFAULT_NAMESPACE);

    let email = xml.find("<urn:Email>").unwrap();
    let password = xml.find("<urn:Password>").unwrap();
    let first = xml.find("<urn:FirstName>").unwrap();
    assert!(email < password && password < first);
}

#[test]
fn test_absent_value_is_empty_element() {
    let request = OperationRequest::new("Login")
        .optional_field("UserName", Some("bob"))
        .optional_field("Password", None::<&str>);

    let xml = build_envelope(&request, DEFAULT_NAMESPACE);

    assert!(xml.contains("<urn:UserName>bob</urn:UserName>"));
    assert!(xml.contains("<urn:Password></urn:Password>"));
}

#[test]
fn test_escape_treats_entities_as_plain_text() {
    assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    assert_eq!(escape_xml("über ✓"), "über ✓");
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

proptest! {
    #[test]
    fn escaped_text_has_no_reserved_characters(raw in ".*") {
        let escaped = escape_xml(&raw);
        prop_assert!(!escaped.contains(['<', '>', '\'', '"']));
        prop_assert_eq!(unescape(&escaped), raw);
    }

    #[test]
    fn text_without_reserved_characters_is_untouched(raw in "[^<>&'\"]*") {
        prop_assert_eq!(escape_xml(&raw), raw.as_str());
    }
}
