// Contract tests for the proximity client against a recording bridge
// The bridge keeps callbacks so tests decide when (or whether) native answers

use proximity::{
    Arg, BridgeRequest, ErrorCallback, NativeBridge, ProximityClient, ProximityError,
    SuccessCallback,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

struct RecordedCall {
    request: BridgeRequest,
    success: Option<SuccessCallback>,
    error: Option<ErrorCallback>,
}

#[derive(Default)]
struct RecordingBridge {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingBridge {
    fn requests(&self) -> Vec<(BridgeRequest, bool, bool)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| (call.request.clone(), call.success.is_some(), call.error.is_some()))
            .collect()
    }

    /// Answer the call at `index` the way the native side would
    fn respond(&self, index: usize, value: Value) {
        let success = self.calls.lock().unwrap()[index].success.take();
        if let Some(callback) = success {
            callback(value);
        }
    }
}

impl NativeBridge for RecordingBridge {
    fn exec(
        &self,
        success: Option<SuccessCallback>,
        error: Option<ErrorCallback>,
        service: &str,
        action: &str,
        args: Vec<Value>,
    ) {
        self.calls.lock().unwrap().push(RecordedCall {
            request: BridgeRequest::new(service, action, args),
            success,
            error,
        });
    }
}

fn setup() -> (ProximityClient, Arc<RecordingBridge>) {
    let bridge = Arc::new(RecordingBridge::default());
    (ProximityClient::new(bridge.clone()), bridge)
}

fn collector() -> (Arc<Mutex<Vec<bool>>>, impl FnOnce(bool) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |near: bool| sink.lock().unwrap().push(near))
}

#[test]
fn test_missing_callback_issues_no_request() {
    let (client, bridge) = setup();

    let result = client.try_get_proximity_state(None);
    assert!(matches!(result, Err(ProximityError::ArgumentType { .. })));

    let result = client.call("getProximityState", vec![Arg::Value(json!("callback"))]);
    assert!(matches!(result, Err(ProximityError::ArgumentType { .. })));

    let result = client.call("getProximityState", vec![Arg::Undefined]);
    assert!(matches!(result, Err(ProximityError::ArgumentType { .. })));

    assert!(bridge.requests().is_empty());
}

#[test]
fn test_get_state_issues_one_request() {
    let (client, bridge) = setup();

    client.get_proximity_state(|_| {});

    let requests = bridge.requests();
    assert_eq!(requests.len(), 1);

    let (request, has_success, has_error) = &requests[0];
    assert_eq!(request.service, "Proximity");
    assert_eq!(request.action, "getProximityState");
    assert!(request.args.is_empty());
    assert!(*has_success);
    assert!(!*has_error);
}

#[test]
fn test_enable_sensor_is_fire_and_forget() {
    let (client, bridge) = setup();

    client.enable_sensor();

    let requests = bridge.requests();
    assert_eq!(requests.len(), 1);
    let (request, has_success, has_error) = &requests[0];
    assert_eq!(request, &BridgeRequest::new("Proximity", "start", Vec::new()));
    assert!(!*has_success);
    assert!(!*has_error);
}

#[test]
fn test_disable_sensor_is_fire_and_forget() {
    let (client, bridge) = setup();

    client.disable_sensor();

    let requests = bridge.requests();
    assert_eq!(requests.len(), 1);
    let (request, has_success, has_error) = &requests[0];
    assert_eq!(request, &BridgeRequest::new("Proximity", "stop", Vec::new()));
    assert!(!*has_success);
    assert!(!*has_error);
}

#[test]
fn test_near_delivered_exactly_once() {
    let (client, bridge) = setup();
    let (seen, callback) = collector();

    client.get_proximity_state(callback);
    bridge.respond(0, json!(1));
    // A second answer finds the callback already consumed
    bridge.respond(0, json!(0));

    assert_eq!(*seen.lock().unwrap(), vec![true]);
}

#[test]
fn test_far_delivered() {
    let (client, bridge) = setup();
    let (seen, callback) = collector();

    client.get_proximity_state(callback);
    bridge.respond(0, json!(0));

    assert_eq!(*seen.lock().unwrap(), vec![false]);
}

#[test]
fn test_boolean_payload_accepted() {
    let (client, bridge) = setup();
    let (seen, callback) = collector();

    client.get_proximity_state(callback);
    bridge.respond(0, json!(true));

    assert_eq!(*seen.lock().unwrap(), vec![true]);
}

#[test]
fn test_no_native_answer_has_no_effect() {
    let (client, bridge) = setup();
    let (seen, callback) = collector();

    client.get_proximity_state(callback);

    assert_eq!(bridge.requests().len(), 1);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_outstanding_requests_are_independent() {
    let (client, bridge) = setup();
    let (first_seen, first) = collector();
    let (second_seen, second) = collector();

    client.get_proximity_state(first);
    client.get_proximity_state(second);

    // Answers may come back in any order
    bridge.respond(1, json!(0));
    bridge.respond(0, json!(1));

    assert_eq!(*first_seen.lock().unwrap(), vec![true]);
    assert_eq!(*second_seen.lock().unwrap(), vec![false]);
}
