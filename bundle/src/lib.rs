use tutku_widget::{BootOptions, ConfigProfile, HostComponent};
use wasm_bindgen::prelude::*;

fn options() -> BootOptions {
    let profile = if cfg!(feature = "app-profile") {
        ConfigProfile::Application
    } else {
        ConfigProfile::Conversation
    };
    BootOptions::default().with_profile(profile)
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    tutku_widget::logging::init(tutku_widget::logging::default_level());

    let scheduled = tutku_widget::boot::<HostComponent>(options())?;
    tracing::debug!(?scheduled, "widget bootstrap scheduled");
    Ok(())
}
