use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use base64::Engine;

/// Global the wasm-bindgen glue is exposed under.
const GLOBAL_NAME: &str = "TutkuAIChatbot";
/// File name of the published bundle, without extension.
const BUNDLE_NAME: &str = "tutku-chatbot-widget";
const CRATE_NAME: &str = "tutku_chatbot_widget";

fn execute(dir: &str, args: &[&str]) -> anyhow::Result<()> {
    let cmd = &args[0];
    let cmd_full = args.join(" ");
    eprintln!("Running '{}'", cmd_full);
    let status = std::process::Command::new(cmd)
        .current_dir(dir)
        .args(&args[1..])
        .spawn()
        .with_context(|| format!("Could not start command '{}'", cmd_full))?
        .wait()
        .with_context(|| format!("cmd failed: '{}'", cmd_full))?;

    if !status.success() {
        bail!("Command '{}' terminated with a non-0 exit code", cmd_full);
    }
    eprintln!("Finished: '{}'", cmd_full);
    Ok(())
}

/// Wrap the wasm-bindgen glue, the wasm module and the stylesheet into one
/// self-executing script.
///
/// The module is instantiated synchronously so the bootstrapper still sees
/// `document.currentScript`.
fn render_bundle(glue: &str, wasm: &[u8], css: &str) -> anyhow::Result<String> {
    let css = serde_json::to_string(css).context("Could not encode stylesheet")?;
    let wasm = base64::engine::general_purpose::STANDARD.encode(wasm);

    Ok(format!(
        r#"(function () {{
var style = document.createElement('style');
style.textContent = {css};
document.head.appendChild(style);
{glue}
var bytes = Uint8Array.from(atob("{wasm}"), function (c) {{ return c.charCodeAt(0); }});
{global}.initSync({{ module: bytes }});
window.{global} = {global};
}})();
"#,
        css = css,
        glue = glue,
        wasm = wasm,
        global = GLOBAL_NAME,
    ))
}

fn bundle_build(release: bool) -> anyhow::Result<()> {
    let mut cargo = vec![
        "cargo",
        "build",
        "-p",
        CRATE_NAME,
        "--target",
        "wasm32-unknown-unknown",
    ];
    if release {
        cargo.push("--release");
    }
    execute("./", &cargo)?;

    let profile = if release { "release" } else { "debug" };
    let wasm_path = format!("./target/wasm32-unknown-unknown/{}/{}.wasm", profile, CRATE_NAME);
    execute(
        "./",
        &[
            "wasm-bindgen",
            "--target",
            "no-modules",
            "--no-modules-global",
            GLOBAL_NAME,
            "--no-typescript",
            "--out-dir",
            "target/bundle",
            wasm_path.as_str(),
        ],
    )?;

    let out_dir = Path::new("target/bundle");
    let glue_path = out_dir.join(format!("{}.js", CRATE_NAME));
    let glue = std::fs::read_to_string(&glue_path)
        .with_context(|| format!("Could not read '{}'", glue_path.display()))?;
    let wasm_path = out_dir.join(format!("{}_bg.wasm", CRATE_NAME));
    let wasm = std::fs::read(&wasm_path)
        .with_context(|| format!("Could not read '{}'", wasm_path.display()))?;
    let css_path = Path::new("bundle/assets/main.css");
    let css = std::fs::read_to_string(css_path)
        .with_context(|| format!("Could not read '{}'", css_path.display()))?;

    let bundle = render_bundle(&glue, &wasm, &css)?;

    std::fs::create_dir_all("dist").context("Could not create dist/")?;
    let target: PathBuf = Path::new("dist").join(format!("{}.js", BUNDLE_NAME));
    std::fs::write(&target, bundle)
        .with_context(|| format!("Could not write '{}'", target.display()))?;
    eprintln!("Wrote {}", target.display());
    Ok(())
}

fn bundle_serve() -> anyhow::Result<()> {
    execute(
        "./",
        &[
            "cargo",
            "watch",
            "-w",
            "bundle/src",
            "-w",
            "bundle/assets",
            "-w",
            "tutku_widget/src",
            "-s",
            "cargo xtask bundle-build",
        ],
    )
}

fn main() {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let arg_refs: Vec<_> = args.iter().map(|x| x.as_str()).collect();

    let result = match arg_refs.as_slice() {
        &["bundle-build"] => bundle_build(false),
        &["bundle-build", "--release"] => bundle_build(true),
        &["bundle-serve"] => bundle_serve(),
        _ => {
            eprintln!(
                "Unknown arguments. Usage: cargo xtask [bundle-build [--release] | bundle-serve]"
            );
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}
