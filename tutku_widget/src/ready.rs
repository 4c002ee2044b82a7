//! Running the bootstrap routine once the document is parsed.

use wasm_bindgen::{prelude::Closure, JsCast};

use crate::BootError;

/// Name of the event fired once the document structure is parsed.
pub const CONTENT_PARSED_EVENT: &str = "DOMContentLoaded";

/// The document's `readyState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentPhase {
    Loading,
    Interactive,
    Complete,
}

impl DocumentPhase {
    pub fn from_ready_state(state: &str) -> Self {
        match state {
            "loading" => Self::Loading,
            "interactive" => Self::Interactive,
            // Unknown values are newer than "loading".
            _ => Self::Complete,
        }
    }

    pub fn of(doc: &web_sys::Document) -> Self {
        Self::from_ready_state(&doc.ready_state())
    }

    pub fn is_parsed(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// When the routine passed to [`schedule`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheduled {
    /// Ran before `schedule` returned.
    Immediate,
    /// Handed to `register` and runs when the content-parsed signal fires.
    Deferred,
}

/// Run `routine` now if the document is parsed, otherwise hand it to
/// `register` to be invoked exactly once later.
pub fn schedule<R, F>(
    phase: DocumentPhase,
    register: R,
    routine: F,
) -> Result<Scheduled, BootError>
where
    R: FnOnce(Box<dyn FnOnce()>) -> Result<(), BootError>,
    F: FnOnce() + 'static,
{
    if phase.is_parsed() {
        routine();
        Ok(Scheduled::Immediate)
    } else {
        register(Box::new(routine))?;
        Ok(Scheduled::Deferred)
    }
}

/// Schedule `routine` against the real document.
///
/// While the document is loading a one-shot `DOMContentLoaded` listener is
/// installed; the closure is released by JS after its single call.
pub fn when_content_parsed<F>(
    doc: &web_sys::Document,
    routine: F,
) -> Result<Scheduled, BootError>
where
    F: FnOnce() + 'static,
{
    when_phase_parsed(doc, DocumentPhase::of(doc), routine)
}

/// Like [`when_content_parsed`], with the document phase given by the caller.
pub fn when_phase_parsed<F>(
    doc: &web_sys::Document,
    phase: DocumentPhase,
    routine: F,
) -> Result<Scheduled, BootError>
where
    F: FnOnce() + 'static,
{
    tracing::debug!(?phase, "scheduling widget bootstrap");

    schedule(
        phase,
        |routine| {
            let callback = Closure::once_into_js(move || routine());
            let options = web_sys::AddEventListenerOptions::new();
            options.set_once(true);
            doc.add_event_listener_with_callback_and_add_event_listener_options(
                CONTENT_PARSED_EVENT,
                callback.unchecked_ref(),
                &options,
            )?;
            Ok(())
        },
        routine,
    )
}
