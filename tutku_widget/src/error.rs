use wasm_bindgen::{JsCast, JsValue};

/// Failures that prevent the widget from being mounted.
///
/// A missing loader tag or missing attributes are not errors: they produce a
/// configuration with empty values.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("no global window object")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("an element with id '{0}' already exists")]
    MountIdTaken(String),
    #[error("component '{0}' is not registered on the host page")]
    ComponentUnavailable(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for BootError {
    fn from(value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|err| String::from(err.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        Self::Dom(message)
    }
}

impl From<BootError> for JsValue {
    fn from(err: BootError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
