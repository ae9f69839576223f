//! Entry point for the **slategrid** generator.
//!
//! Loads the configuration, builds the grid layout and writes the resulting
//! bindings to stdout in one of three formats:
//!
//! * `js` (default): a Slate config script, ready for `~/.slate.js`;
//! * `json`: the binding plan, for inspection or other hosts;
//! * `preview`: every binding with its rectangle resolved against
//!   `--screen WxH` (default `1920x1080`).

use log::{error, info};
use slategrid::binding::{Binding, BindingDriver};
use slategrid::config::Config;
use slategrid::expr::ScreenSize;
use slategrid::host::recording::RecordingHost;
use slategrid::host::slate::SlateScriptHost;
use slategrid::operation::Operation;
use std::io::Write;
use std::path::PathBuf;

const USAGE: &str = "usage: slategrid [--config PATH] [--format js|json|preview] [--screen WxH]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Js,
    Json,
    Preview,
}

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    format: Format,
    screen: ScreenSize,
}

fn parse_screen(s: &str) -> Option<ScreenSize> {
    let (w, h) = s.split_once('x')?;
    let width: f64 = w.trim().parse().ok()?;
    let height: f64 = h.trim().parse().ok()?;
    (width > 0.0 && height > 0.0).then(|| ScreenSize::new(width, height))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        config: None,
        format: Format::Js,
        screen: ScreenSize::new(1920.0, 1080.0),
    };
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--format" => {
                parsed.format = match value("--format")?.as_str() {
                    "js" => Format::Js,
                    "json" => Format::Json,
                    "preview" => Format::Preview,
                    other => return Err(format!("unknown format {:?}", other)),
                }
            }
            "--screen" => {
                let v = value("--screen")?;
                parsed.screen =
                    parse_screen(&v).ok_or_else(|| format!("invalid screen size {:?}", v))?;
            }
            other => return Err(format!("unexpected argument {:?}", other)),
        }
    }
    Ok(parsed)
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/slategrid`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("slategrid")
}

/// Load an explicitly requested config, or try the default location and
/// fall back to compiled-in defaults only if no file exists there.
fn load_config(explicit: Option<PathBuf>) -> Result<Config, String> {
    if let Some(path) = explicit {
        let cfg = Config::load(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
        info!("loaded config from {}", path.display());
        return Ok(cfg);
    }
    let path = config_dir().join("config.json");
    match Config::load_optional(&path).map_err(|e| format!("{}: {}", path.display(), e))? {
        Some(cfg) => {
            info!("loaded config from {}", path.display());
            Ok(cfg)
        }
        None => {
            info!("no config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let config = load_config(args.config)?;
    let layout = config.layout().map_err(|e| e.to_string())?;
    info!(
        "{}x{} grid, {}x{} regular cells",
        layout.grid().columns(),
        layout.grid().rows(),
        layout.columns(),
        layout.rows()
    );
    let driver = BindingDriver::new(&layout, &config.singletons, &config.focus);

    let stdout = std::io::stdout();
    match args.format {
        Format::Js => {
            let mut host = SlateScriptHost::new(stdout.lock());
            driver.install(&mut host).map_err(|e| e.to_string())?;
            host.finish().map_err(|e| e.to_string())?;
        }
        Format::Json => {
            let bindings = record(&driver)?;
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &bindings).map_err(|e| e.to_string())?;
            writeln!(out).map_err(|e| e.to_string())?;
        }
        Format::Preview => {
            let bindings = record(&driver)?;
            let mut out = stdout.lock();
            for b in &bindings {
                let line = match &b.operation {
                    Operation::Move(rect) => {
                        let r = rect.eval(args.screen);
                        format!(
                            "{:<18} move   x={:.1} y={:.1} w={:.1} h={:.1}",
                            b.hotkey.to_string(),
                            r.x,
                            r.y,
                            r.width,
                            r.height
                        )
                    }
                    Operation::Focus { direction } => {
                        format!("{:<18} focus  {}", b.hotkey.to_string(), direction)
                    }
                    Operation::Noop => format!("{:<18} noop", b.hotkey.to_string()),
                };
                writeln!(out, "{}", line).map_err(|e| e.to_string())?;
            }
        }
    }
    Ok(())
}

fn record(driver: &BindingDriver<'_>) -> Result<Vec<Binding>, String> {
    let mut host = RecordingHost::new();
    driver.install(&mut host).map_err(|e| e.to_string())?;
    info!("{} distinct hotkeys", host.len());
    Ok(host.into_bindings())
}
