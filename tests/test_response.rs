//! Tests for SOAP reply interpretation

mod common;

use common::soap_reply;
use serde_json::json;
use soap_relay::soap::{FailureKind, RemoteResult, parse_response};

fn failure(result: &RemoteResult) -> (FailureKind, &str) {
    match result {
        RemoteResult::Failure { kind, message } => (*kind, message.as_str()),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_fault_takes_precedence_over_return() {
    let reply = soap_reply(
        "<return>{\"ResultCode\":0}</return>\
         <SOAP-ENV:Fault><faultcode>Client</faultcode><faultstring>Bad creds</faultstring></SOAP-ENV:Fault>",
    );

    let result = parse_response(&reply);

    let (kind, message) = failure(&result);
    assert_eq!(kind, FailureKind::RemoteFault);
    assert!(message.contains("Bad creds"));
}

#[test]
fn test_empty_fault_uses_default_text() {
    let result = parse_response(&soap_reply("<faultstring></faultstring>"));
    assert_eq!(failure(&result), (FailureKind::RemoteFault, "remote fault: unknown fault"));
}

#[test]
fn test_zero_result_code_is_success() {
    let result = parse_response(&soap_reply(
        "<return xsi:type=\"xsd:string\">{\"ResultCode\":0,\"Name\":\"Alice\"}</return>",
    ));

    assert_eq!(
        result,
        RemoteResult::Success {
            payload: json!({ "ResultCode": 0, "Name": "Alice" })
        }
    );
}

#[test]
fn test_missing_result_code_is_success() {
    let result = parse_response(&soap_reply("<return>{\"EntityId\":42}</return>"));
    assert_eq!(result.payload(), Some(&json!({ "EntityId": 42 })));
}

#[test]
fn test_non_zero_result_code_uses_result_message() {
    let result = parse_response(&soap_reply(
        "<return>{\"ResultCode\":5,\"ResultMessage\":\"Locked\"}</return>",
    ));
    assert_eq!(failure(&result), (FailureKind::ApplicationError, "Locked"));
}

#[test]
fn test_non_zero_result_code_without_message() {
    let result = parse_response(&soap_reply(
        "<return>{\"ResultCode\":-1,\"ResultMessage\":\"\"}</return>",
    ));
    assert_eq!(failure(&result), (FailureKind::ApplicationError, "error code: -1"));
}

#[test]
fn test_string_result_code_is_not_zero() {
    let result = parse_response(&soap_reply("<return>{\"ResultCode\":\"0\"}</return>"));
    assert_eq!(failure(&result), (FailureKind::ApplicationError, "error code: 0"));
}

#[test]
fn test_plain_text_return_is_raw_success() {
    let result = parse_response(&soap_reply("<return>plain-text-token</return>"));

    assert_eq!(
        result,
        RemoteResult::Success {
            payload: json!({ "rawResponse": "plain-text-token" })
        }
    );
}

#[test]
fn test_escaped_json_in_return_is_decoded() {
    let result = parse_response(&soap_reply(
        "<return>{&quot;ResultCode&quot;:0,&quot;Note&quot;:&quot;a &amp; b&quot;}</return>",
    ));
    assert_eq!(result.payload(), Some(&json!({ "ResultCode": 0, "Note": "a & b" })));
}

#[test]
fn test_prefixed_return_element_is_found() {
    let result = parse_response(&soap_reply("<NS1:return>token</NS1:return>"));
    assert_eq!(result.payload(), Some(&json!({ "rawResponse": "token" })));
}

#[test]
fn test_missing_return_is_malformed() {
    let result = parse_response(&soap_reply("<other>1</other>"));

    let (kind, message) = failure(&result);
    assert_eq!(kind, FailureKind::MalformedResponse);
    assert!(message.contains("no return data"));
}

#[test]
fn test_broken_xml_is_parse_error() {
    let result = parse_response("<Envelope><Body><return>1</Body></Envelope>");

    let (kind, message) = failure(&result);
    assert_eq!(kind, FailureKind::MalformedResponse);
    assert!(message.starts_with("parse error: "));
}

#[test]
fn test_non_xml_body_is_parse_error() {
    let result = parse_response("");

    let (kind, message) = failure(&result);
    assert_eq!(kind, FailureKind::MalformedResponse);
    assert!(message.starts_with("parse error: "));
}

#[test]
fn test_fault_nested_inside_return_is_detected() {
    let result = parse_response(
        "<Envelope><Body><return><faultstring>Bad creds</faultstring></return></Body></Envelope>",
    );
    assert_eq!(failure(&result), (FailureKind::RemoteFault, "remote fault: Bad creds"));
}

#[test]
fn test_text_before_root_is_parse_error() {
    let result = parse_response("junk<a><return>{\"ResultCode\":0}</return></a>");

    let (kind, message) = failure(&result);
    assert_eq!(kind, FailureKind::MalformedResponse);
    assert!(message.starts_with("parse error: "));
}

#[test]
fn test_second_root_is_parse_error() {
    let result = parse_response("<a/><b><return>tok</return></b>");

    let (kind, message) = failure(&result);
    assert_eq!(kind, FailureKind::MalformedResponse);
    assert!(message.starts_with("parse error: "));
}

#[test]
fn test_text_after_root_is_parse_error() {
    let result = parse_response("<a><return>tok</return></a>trailing");

    let (kind, message) = failure(&result);
    assert_eq!(kind, FailureKind::MalformedResponse);
    assert!(message.starts_with("parse error: "));
}

#[test]
fn test_whitespace_around_root_is_accepted() {
    let result = parse_response(&format!("\n\n{}\n", soap_reply("<return>tok</return>")));
    assert_eq!(result.payload(), Some(&json!({ "rawResponse": "tok" })));
}

#[test]
fn test_null_return_is_raw_success() {
    let result = parse_response(&soap_reply("<return>null</return>"));
    assert_eq!(result.payload(), Some(&json!({ "rawResponse": "null" })));
}

#[test]
fn test_numeric_result_message_is_used() {
    let result = parse_response(&soap_reply(
        "<return>{\"ResultCode\":3,\"ResultMessage\":404}</return>",
    ));
    assert_eq!(failure(&result), (FailureKind::ApplicationError, "404"));
}

#[test]
fn test_falsy_result_message_falls_back_to_code() {
    for message in ["false", "0", "null"] {
        let result = parse_response(&soap_reply(&format!(
            "<return>{{\"ResultCode\":7,\"ResultMessage\":{message}}}</return>"
        )));
        assert_eq!(failure(&result), (FailureKind::ApplicationError, "error code: 7"));
    }
}
