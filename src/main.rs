//! `stardrift` binary: opens the scene in a native window.
//!
//! ```text
//! stardrift [OPTIONS.toml | PRESET] [--dump-options PATH] [--dump-schema PATH] [--list-presets]
//! ```

use std::path::{Path, PathBuf};

use stardrift::{options::Options, Viewer};

const PRESET_DIR: &str = "assets/presets";

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    options: Option<String>,
    dump_options: Option<PathBuf>,
    dump_schema: Option<PathBuf>,
    list_presets: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dump-options" => {
                let path = args.next().ok_or("--dump-options needs a path")?;
                parsed.dump_options = Some(PathBuf::from(path));
            }
            "--dump-schema" => {
                let path = args.next().ok_or("--dump-schema needs a path")?;
                parsed.dump_schema = Some(PathBuf::from(path));
            }
            "--list-presets" => parsed.list_presets = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag: {flag}"));
            }
            _ if parsed.options.is_some() => {
                return Err(format!("unexpected argument: {arg}"));
            }
            _ => parsed.options = Some(arg),
        }
    }
    Ok(parsed)
}

/// Load options from a TOML path, or a preset name under [`PRESET_DIR`].
fn resolve_options(input: &str) -> Result<Options, String> {
    let direct = Path::new(input);
    let path = if direct.exists() {
        direct.to_path_buf()
    } else {
        let preset = Path::new(PRESET_DIR).join(format!("{input}.toml"));
        if !preset.exists() {
            return Err(format!(
                "not a file or known preset: {input} (presets: {})",
                Options::list_presets(Path::new(PRESET_DIR)).join(", ")
            ));
        }
        preset
    };
    log::info!("options from {}", path.display());
    Options::load(&path).map_err(|e| format!("{}: {e}", path.display()))
}

fn run(args: Args) -> Result<(), String> {
    if args.list_presets {
        for name in Options::list_presets(Path::new(PRESET_DIR)) {
            log::info!("preset: {name}");
        }
        return Ok(());
    }

    let options = match &args.options {
        Some(input) => resolve_options(input)?,
        None => Options::default(),
    };

    let mut dumped = false;
    if let Some(path) = &args.dump_options {
        options.save(path).map_err(|e| e.to_string())?;
        log::info!("wrote options to {}", path.display());
        dumped = true;
    }
    if let Some(path) = &args.dump_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| e.to_string())?;
        std::fs::write(path, schema).map_err(|e| e.to_string())?;
        log::info!("wrote schema to {}", path.display());
        dumped = true;
    }
    if dumped {
        return Ok(());
    }

    Viewer::builder()
        .with_options(options)
        .build()
        .run()
        .map_err(|e| e.to_string())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
