use crate::domain::logging::{LogComponent, Logger, get_logger};
use crate::domain::overlay::DiagnosticSink;
use wasm_bindgen::JsValue;

/// Echoes diagnostics to a host-provided JS function, e.g. the webview
/// bridge's `log(text)`.
pub struct HostCallbackSink {
    callback: js_sys::Function,
}

impl HostCallbackSink {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl DiagnosticSink for HostCallbackSink {
    fn echo(&self, message: &str) {
        if let Err(e) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(message)) {
            get_logger().warn(
                LogComponent::Infrastructure("HostSink"),
                &format!("host logger threw: {:?}", e),
            );
        }
    }
}
