use crate::BootError;

/// A UI component tree the bootstrapper can launch.
pub trait Component: Sized + 'static {
    type Properties;

    fn init(props: Self::Properties) -> Result<Self, BootError>;

    /// Attach the component to `parent`.
    fn mount(&mut self, parent: &web_sys::Element) -> Result<(), BootError>;
}

/// Instantiate `C` with `properties` and mount it into `parent`.
///
/// The component lives for the rest of the page.
pub fn launch_component<C: Component>(
    parent: &web_sys::Element,
    properties: C::Properties,
) -> Result<(), BootError> {
    let mut component = C::init(properties)?;
    component.mount(parent)?;
    tracing::debug!(
        component=%std::any::type_name::<C>(),
        "component mounted"
    );
    std::mem::forget(component);
    Ok(())
}
