use once_cell::sync::OnceCell;
use tracing_wasm::{ConsoleConfig, WASMLayerConfigBuilder};

static INIT: OnceCell<()> = OnceCell::new();

/// The level used when the embedder does not choose one.
pub fn default_level() -> tracing::Level {
    if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    }
}

/// Route `tracing` output and panics to the browser console.
///
/// Only the first call has an effect.
pub fn init(max_level: tracing::Level) {
    INIT.get_or_init(|| {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config = WASMLayerConfigBuilder::new()
            .set_report_logs_in_timings(false)
            .set_console_config(ConsoleConfig::ReportWithoutConsoleColor)
            .set_max_level(max_level)
            .build();
        tracing_wasm::set_as_global_default_with_config(config);
    });
}
