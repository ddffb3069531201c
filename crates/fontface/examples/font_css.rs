//! Print the `@font-face` CSS one client should receive.
//!
//! Usage:
//!
//! ```text
//! cargo run -p fontface --example font_css -- <config.json|config.toml> <user-agent> <locale> <font>...
//! ```
//!
//! Set `RUST_LOG`-style verbosity with the `FONTFACE_LOG` variable
//! (`trace`, `debug`, `info`, `warn`, `error`).

use std::process::ExitCode;

use fontface::prelude::*;

fn main() -> ExitCode {
    let level = std::env::var("FONTFACE_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [config_path, user_agent, locale, fonts @ ..] = args.as_slice() else {
        eprintln!("usage: font_css <config> <user-agent> <locale> <font>...");
        return ExitCode::FAILURE;
    };

    match run(config_path, user_agent, locale, fonts) {
        Ok(css) => {
            print!("{css}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &str, user_agent: &str, locale: &str, fonts: &[String]) -> fontface::Result<String> {
    let registry = FontRegistry::with_config(RegistryConfig::from_path(config_path)?)?;
    let request = FontRequest::new()
        .client(user_agent)
        .locale(locale)
        .fonts(fonts.iter().cloned());
    get_font_css(&registry, &request)
}
