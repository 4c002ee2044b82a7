use crate::{
    component::{launch_component, Component},
    config::{extract_config, ConfigProfile, WidgetConfig},
    mount::{create_mount_point, MountId},
    ready::{when_content_parsed, Scheduled},
    source::{find_marked, resolve_source, MarkerRule, SourceStrategy},
    web, BootError,
};

/// Settings for one bootstrap run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BootOptions {
    pub profile: ConfigProfile,
    pub strategy: SourceStrategy,
    pub marker: MarkerRule,
    pub mount_id: MountId,
}

impl BootOptions {
    pub fn with_profile(mut self, profile: ConfigProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_strategy(mut self, strategy: SourceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_marker(mut self, marker: MarkerRule) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_mount_id(mut self, mount_id: MountId) -> Self {
        self.mount_id = mount_id;
        self
    }
}

/// Finds the loader tag, builds the configuration and mounts the component.
pub struct Bootstrapper {
    options: BootOptions,
    current: Option<web_sys::HtmlScriptElement>,
}

impl Bootstrapper {
    /// Create a bootstrapper, capturing `document.currentScript`.
    ///
    /// Must be called during synchronous evaluation of the bundle, since the
    /// current script is gone once evaluation yields.
    pub fn new(options: BootOptions) -> Self {
        let current = if options.strategy.uses_current_script() {
            web::document().ok().and_then(|doc| web::current_script(&doc))
        } else {
            None
        };
        Self::with_current_script(options, current)
    }

    /// Create a bootstrapper with an already captured current script.
    pub fn with_current_script(
        options: BootOptions,
        current: Option<web_sys::HtmlScriptElement>,
    ) -> Self {
        Self { options, current }
    }

    pub fn options(&self) -> &BootOptions {
        &self.options
    }

    /// The loader tag, or `None` if no script element qualifies.
    pub fn locate_config_source(
        &self,
        doc: &web_sys::Document,
    ) -> Option<web_sys::HtmlScriptElement> {
        let source = resolve_source(
            self.options.strategy,
            self.current.clone(),
            &self.options.marker,
            || find_marked(web::script_elements(doc), &self.options.marker),
        );

        match &source {
            Some(script) => {
                tracing::debug!(src=?script.get_attribute("src"), "located loader tag")
            }
            None => tracing::warn!("no loader tag found, using empty configuration"),
        }
        source
    }

    pub fn extract_config(&self, source: Option<&web_sys::HtmlScriptElement>) -> WidgetConfig {
        extract_config(source, self.options.profile)
    }

    pub fn create_mount_point(
        &self,
        doc: &web_sys::Document,
    ) -> Result<web_sys::Element, BootError> {
        create_mount_point(doc, &self.options.mount_id)
    }

    pub fn launch<C>(
        &self,
        config: WidgetConfig,
        mount_point: &web_sys::Element,
    ) -> Result<(), BootError>
    where
        C: Component<Properties = WidgetConfig>,
    {
        launch_component::<C>(mount_point, config)
    }

    /// Run the whole routine. Returns the mount point.
    ///
    /// If the launch fails the mount point is removed again.
    pub fn run<C>(&self) -> Result<web_sys::Element, BootError>
    where
        C: Component<Properties = WidgetConfig>,
    {
        let doc = web::document()?;
        let source = self.locate_config_source(&doc);
        let config = self.extract_config(source.as_ref());
        let mount_point = self.create_mount_point(&doc)?;
        if let Err(err) = self.launch::<C>(config, &mount_point) {
            mount_point.remove();
            return Err(err);
        }
        Ok(mount_point)
    }
}

/// Bootstrap the widget with component `C`.
///
/// Runs immediately if the document is already parsed, otherwise once on
/// `DOMContentLoaded`. Failures of the routine itself are logged.
pub fn boot<C>(options: BootOptions) -> Result<Scheduled, BootError>
where
    C: Component<Properties = WidgetConfig>,
{
    let doc = web::document()?;
    let bootstrapper = Bootstrapper::new(options);

    when_content_parsed(&doc, move || {
        if let Err(err) = bootstrapper.run::<C>() {
            tracing::error!(error=%err, "widget bootstrap failed");
        }
    })
}
