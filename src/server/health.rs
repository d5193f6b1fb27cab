use serde_json::{json, Value};

use crate::reply::Envelope;

pub async fn healthz() -> Envelope<Value> {
    Envelope(json!({ "status": "ok" }))
}
