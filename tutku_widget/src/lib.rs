//! Bootstrapper for the Tutku AI chatbot widget.
//!
//! The widget bundle is included on a host page with a script tag such as
//!
//! ```html
//! <script src="tutku-chatbot-widget.js" data-user-id="u1" data-thread-id="t1"></script>
//! ```
//!
//! On load it finds that tag, reads the `data-*` attributes into a
//! [`WidgetConfig`], appends a mount point to the body and launches a
//! [`Component`] into it.

// NOTE: needs to be on top because it defines macros used elsewhere.
#[macro_use]
pub mod web;

mod boot;
pub mod component;
pub mod config;
mod error;
pub mod host;
pub mod logging;
pub mod mount;
pub mod ready;
pub mod source;

pub use self::{
    boot::{boot, BootOptions, Bootstrapper},
    component::{launch_component, Component},
    config::{extract_config, ConfigKey, ConfigProfile, WidgetConfig},
    error::BootError,
    host::HostComponent,
    mount::{create_mount_point, MountId, DEFAULT_MOUNT_ID},
    ready::{DocumentPhase, Scheduled},
    source::{MarkerRule, ScriptTag, SourceStrategy},
};
