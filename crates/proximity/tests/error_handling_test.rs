// Error handling tests

use proximity::{BridgeError, ErrorCategory, ErrorContext, ProximityError};
use uuid::Uuid;

fn argument_error() -> ProximityError {
    ProximityError::ArgumentType {
        label: "proximity.getProximityState".to_string(),
        parameter: "successCallback".to_string(),
        expected: "Function".to_string(),
        actual: "Number".to_string(),
    }
}

#[test]
fn test_error_variants_display() {
    let errors = vec![
        argument_error(),
        ProximityError::UnknownMethod("watchProximity".to_string()),
        ProximityError::InvalidAction("calibrate".to_string()),
        ProximityError::SensorUnavailable,
        ProximityError::Internal("poisoned".to_string()),
    ];

    for error in errors {
        assert!(!error.to_string().is_empty());
        assert!(!error.user_message().is_empty());
    }
}

#[test]
fn test_argument_error_message() {
    assert_eq!(
        argument_error().to_string(),
        "Wrong type for parameter \"successCallback\" of proximity.getProximityState: Expected Function, but got Number."
    );

    let msg = argument_error().user_message();
    assert!(msg.contains("proximity.getProximityState"));
    assert!(msg.contains("Function"));
}

#[test]
fn test_user_friendly_messages() {
    let msg = ProximityError::SensorUnavailable.user_message();
    assert!(msg.contains("no proximity sensor"));

    let msg = ProximityError::InvalidAction("calibrate".to_string()).user_message();
    assert!(msg.contains("calibrate"));

    let msg = ProximityError::UnknownMethod("watchProximity".to_string()).user_message();
    assert!(msg.contains("watchProximity"));
}

#[test]
fn test_error_categories() {
    assert_eq!(argument_error().category(), ErrorCategory::Validation);
    assert_eq!(
        ProximityError::InvalidAction("x".to_string()).category(),
        ErrorCategory::Validation
    );
    assert_eq!(ProximityError::SensorUnavailable.category(), ErrorCategory::Hardware);
    assert_eq!(
        ProximityError::Internal("x".to_string()).category(),
        ErrorCategory::Internal
    );

    assert_eq!(ErrorCategory::Validation.to_string(), "validation");
    assert_eq!(ErrorCategory::Hardware.to_string(), "hardware");
    assert_eq!(ErrorCategory::Internal.to_string(), "internal");
}

#[test]
fn test_every_plugin_error_reaches_bridge_as_plugin_failure() {
    let errors = vec![
        argument_error(),
        ProximityError::UnknownMethod("watchProximity".to_string()),
        ProximityError::SensorUnavailable,
        ProximityError::Internal("poisoned".to_string()),
    ];

    for error in errors {
        let expected = error.to_string();
        assert_eq!(BridgeError::from(error), BridgeError::Plugin(expected));
    }
}

#[test]
fn test_bridge_error_from_plugin_failure() {
    let bridge_error = BridgeError::from(ProximityError::Internal("sensor thread died".to_string()));

    match bridge_error {
        BridgeError::Plugin(msg) => assert!(msg.contains("sensor thread died")),
        other => panic!("unexpected bridge error: {:?}", other),
    }
}

#[test]
fn test_error_context_builder() {
    let request_id = Uuid::new_v4();
    let context = ErrorContext::new()
        .with_request_id(request_id)
        .with_service("Proximity")
        .with_action("start")
        .with_info("platform: Simulated".to_string());

    assert_eq!(context.request_id, Some(request_id));
    assert_eq!(context.service.as_deref(), Some("Proximity"));
    assert_eq!(context.action.as_deref(), Some("start"));
    assert_eq!(context.additional_info.as_deref(), Some("platform: Simulated"));

    // Logging must not panic without a subscriber
    ProximityError::SensorUnavailable.log_with_context(&context);
}
