use std::cell::RefCell;
use std::rc::Rc;

use chart_embed::api::{ChartEngine, MessageReceiver, OriginPolicy, extract_model};
use chart_embed::api::StoreEngine;
use chart_embed::core::InputData;
use chart_embed::observe::{ChartStores, MessageEvent, MessagePort};
use chart_embed::{BridgeError, BridgeResult};
use serde_json::{Value, json};

#[derive(Default)]
struct RecordingEngine {
    models: RefCell<Vec<Value>>,
}

impl ChartEngine for RecordingEngine {
    fn receive_model(&self, model: Value) -> BridgeResult<()> {
        self.models.borrow_mut().push(model);
        Ok(())
    }

    fn update_input(&self, _key: &str, _input: InputData) -> BridgeResult<()> {
        Ok(())
    }
}

fn attach(policy: OriginPolicy) -> (MessagePort, Rc<RecordingEngine>, MessageReceiver) {
    let port = MessagePort::new();
    let engine = Rc::new(RecordingEngine::default());
    let receiver = MessageReceiver::attach(&port, engine.clone(), policy);
    (port, engine, receiver)
}

fn model_payload(title: &str) -> serde_json::Value {
    json!({
        "model": {
            "chartProps": {
                "input": { "raw": "x,y\n1,2\n" },
                "chartSettings": [{ "type": "line", "colorIndex": 1 }]
            },
            "metadata": { "chartType": "xy", "title": title, "credit": "Data desk" }
        }
    })
}

#[test]
fn posted_model_is_forwarded_verbatim() {
    let (port, engine, _receiver) = attach(OriginPolicy::AnyOrigin);

    port.post(MessageEvent::new("https://a.example", model_payload("Hello")))
        .expect("post");

    let models = engine.models.borrow();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0], model_payload("Hello")["model"]);
}

#[test]
fn sparse_and_loosely_typed_models_reach_the_engine_untouched() {
    let (port, engine, _receiver) = attach(OriginPolicy::AnyOrigin);
    let sparse = json!({
        "chartProps": {
            "chartSettings": [{ "colorIndex": 0 }],
            "scale": { "typeSettings": { "maxLength": null } }
        }
    });
    let loose = json!({
        "chartProps": { "scale": { "typeSettings": { "maxLength": 7.5 } } },
        "metadata": { "title": null }
    });

    port.post(MessageEvent::new("x", json!({ "model": sparse.clone() })))
        .expect("sparse model");
    port.post(MessageEvent::new("x", json!({ "model": loose.clone() })))
        .expect("loose model");

    assert_eq!(*engine.models.borrow(), vec![sparse, loose]);
}

#[test]
fn store_engine_rejects_models_it_cannot_read() {
    let port = MessagePort::new();
    let stores = ChartStores::new();
    let _receiver = MessageReceiver::attach(
        &port,
        Rc::new(StoreEngine::new(stores.clone())),
        OriginPolicy::AnyOrigin,
    );

    let err = port
        .post(MessageEvent::new(
            "x",
            json!({ "model": { "metadata": { "title": null } } }),
        ))
        .expect_err("null title");
    assert!(matches!(err, BridgeError::InvalidData(_)));
    assert_eq!(stores.metadata.with(|meta| meta.title.clone()), "");
}

#[test]
fn payload_without_model_is_malformed() {
    let (port, engine, _receiver) = attach(OriginPolicy::AnyOrigin);

    let err = port
        .post(MessageEvent::new("https://a.example", json!({ "type": "resize" })))
        .expect_err("missing model");
    assert!(matches!(err, BridgeError::MalformedMessage(_)));
    assert!(engine.models.borrow().is_empty());
}

#[test]
fn extract_model_reads_the_model_field() {
    let event = MessageEvent::new("x", model_payload("Direct"));
    let model = extract_model(&event).expect("model");
    assert_eq!(model["metadata"]["title"], "Direct");
}

#[test]
fn allow_list_drops_other_origins_silently() {
    let policy = OriginPolicy::AllowList(vec!["https://trusted.example".to_owned()]);
    let (port, engine, _receiver) = attach(policy);

    port.post(MessageEvent::new("https://evil.example", model_payload("No")))
        .expect("disallowed origin is not an error");
    port.post(MessageEvent::new("https://trusted.example", model_payload("Yes")))
        .expect("post");

    let titles: Vec<String> = engine
        .models
        .borrow()
        .iter()
        .map(|model| model["metadata"]["title"].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(titles, vec!["Yes".to_owned()]);
}

#[test]
fn any_origin_policy_allows_everything() {
    assert!(OriginPolicy::AnyOrigin.allows(""));
    assert!(OriginPolicy::AnyOrigin.allows("null"));
    let policy = OriginPolicy::AllowList(vec!["https://a.example".to_owned()]);
    assert!(policy.allows("https://a.example"));
    assert!(!policy.allows("https://a.example.evil"));
}

#[test]
fn receiver_registers_a_single_listener_and_detaches_once() {
    let (port, engine, mut receiver) = attach(OriginPolicy::AnyOrigin);
    assert_eq!(port.listener_count(), 1);
    assert!(receiver.is_attached());

    assert!(receiver.detach());
    assert!(!receiver.is_attached());
    assert!(!receiver.detach());
    assert_eq!(port.listener_count(), 0);

    port.post(MessageEvent::new("x", model_payload("Late")))
        .expect("post without listeners");
    assert!(engine.models.borrow().is_empty());
}

#[test]
fn dropping_the_receiver_detaches_it() {
    let (port, _engine, receiver) = attach(OriginPolicy::AnyOrigin);
    drop(receiver);
    assert_eq!(port.listener_count(), 0);
}

#[test]
fn origin_policy_serializes_with_mode_tag() {
    let policy = OriginPolicy::AllowList(vec!["https://a.example".to_owned()]);
    let text = serde_json::to_string(&policy).expect("serialize");
    assert_eq!(text, r#"{"mode":"allowList","origins":["https://a.example"]}"#);

    let any: OriginPolicy = serde_json::from_str(r#"{"mode":"anyOrigin"}"#).expect("parse");
    assert_eq!(any, OriginPolicy::AnyOrigin);
}
