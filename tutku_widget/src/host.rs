//! Binding to a chat UI component registered by the host page.

use wasm_bindgen::{JsCast, JsValue};

use crate::{component::Component, config::WidgetConfig, web, BootError};

/// Window property holding the chat UI component.
///
/// The value must be an object with a `mount(element, props)` function.
pub const HOST_COMPONENT_GLOBAL: &str = "TutkuAIChatbotWidget";

/// The externally provided chat UI, reached through
/// `window.TutkuAIChatbotWidget`.
pub struct HostComponent {
    factory: JsValue,
    props: js_sys::Object,
    instance: Option<JsValue>,
}

impl HostComponent {
    fn mount_fn(&self) -> Result<js_sys::Function, BootError> {
        js_sys::Reflect::get(&self.factory, &JsValue::from_str("mount"))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| {
                BootError::ComponentUnavailable(format!("{}.mount", HOST_COMPONENT_GLOBAL))
            })
    }

    /// Whatever the component's `mount` returned.
    pub fn instance(&self) -> Option<&JsValue> {
        self.instance.as_ref()
    }
}

impl Component for HostComponent {
    type Properties = WidgetConfig;

    fn init(config: WidgetConfig) -> Result<Self, BootError> {
        let window = web::window()?;
        let factory = js_sys::Reflect::get(&window, &JsValue::from_str(HOST_COMPONENT_GLOBAL))?;
        if factory.is_undefined() || factory.is_null() {
            return Err(BootError::ComponentUnavailable(
                HOST_COMPONENT_GLOBAL.to_string(),
            ));
        }

        Ok(Self {
            factory,
            props: config.to_js_props()?,
            instance: None,
        })
    }

    fn mount(&mut self, parent: &web_sys::Element) -> Result<(), BootError> {
        let mount = self.mount_fn()?;
        let instance = mount.call2(&self.factory, parent, &self.props)?;
        self.instance = Some(instance);
        Ok(())
    }
}
