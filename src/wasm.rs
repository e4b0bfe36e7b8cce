use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

use crate::bytecode::Bytecode;
use crate::graph_op::GraphOp;
use crate::response::{RemoteFailure, ResponseStatus};
use crate::status::ResponseStatusCode;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}

/// Returns every graph operation with its canonical bytecode.
#[wasm_bindgen]
pub fn get_all_graph_ops() -> JsValue {
    let result: Vec<serde_json::Value> = GraphOp::iter()
        .map(|op| {
            serde_json::json!({
                "name": op.as_ref(),
                "bytecode": op.bytecode(),
                "display": op.bytecode().to_string(),
            })
        })
        .collect();
    to_js(&serde_json::Value::Array(result))
}

/// Name of the graph operation a bytecode object denotes, or null.
#[wasm_bindgen]
pub fn lookup_graph_op(bytecode: JsValue) -> JsValue {
    let bytecode: Bytecode = match serde_wasm_bindgen::from_value(bytecode) {
        Ok(b) => b,
        Err(e) => return error_result(&format!("Invalid bytecode: {e}")),
    };
    match GraphOp::from_bytecode(&bytecode) {
        Some(op) => JsValue::from_str(op.as_ref()),
        None => JsValue::NULL,
    }
}

/// Classification of a numeric response status code.
#[wasm_bindgen]
pub fn describe_status(code: u16) -> JsValue {
    let Ok(status) = ResponseStatusCode::from_code(code) else {
        return error_result(&format!("Unknown status code {code}"));
    };
    let obj = serde_json::json!({
        "code": status.code(),
        "name": status.as_ref(),
        "success": status.is_success(),
        "finalResponse": status.is_final_response(),
        "clientError": status.is_client_error(),
        "serverError": status.is_server_error(),
        "retryable": status.is_retryable(),
    });
    to_js(&obj)
}

/// Turns a response status JSON block into the failure a caller would see.
#[wasm_bindgen]
pub fn remote_failure_from_status(json: &str) -> JsValue {
    let status: ResponseStatus = match serde_json::from_str(json) {
        Ok(s) => s,
        Err(_) => return error_result("Invalid status JSON"),
    };
    if status.code.is_success() {
        return JsValue::NULL;
    }
    let failure = RemoteFailure::from_status(status);
    let obj = serde_json::json!({
        "statusCode": failure.status_code(),
        "message": failure.message(),
        "exceptionHierarchy": failure.exception_hierarchy(),
        "stackTrace": failure.stack_trace(),
        "attributes": failure.attributes(),
    });
    to_js(&obj)
}
