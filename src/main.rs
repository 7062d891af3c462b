// SPDX-License-Identifier: MPL-2.0
//! `cat_gallery` binary entry point.
//!
//! # Environment variables
//!
//! | Variable                 | Default             | Description                          |
//! |--------------------------|---------------------|--------------------------------------|
//! | `CAT_GALLERY_API_KEY`    | settings file       | TheCatAPI credential                 |
//! | `CAT_GALLERY_CONFIG_DIR` | platform config dir | Directory holding `settings.toml`    |
//! | `RUST_LOG`               | `cat_gallery=info`  | Log filter                           |
//!
//! A `.env` file in the working directory is loaded before these are read.

use cat_gallery::app::{self, paths, Flags};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the API credential.
const ENV_API_KEY: &str = "CAT_GALLERY_API_KEY";

const HELP: &str = "\
Cat Gallery

USAGE:
  cat_gallery [OPTIONS]

OPTIONS:
  -h, --help                 Print this help
  --lang <LOCALE>            Interface language (e.g. en-US, fr)
  --api-key <KEY>            TheCatAPI key (overrides CAT_GALLERY_API_KEY)
  --config-dir <DIR>         Directory holding settings.toml
";

struct Args {
    lang: Option<String>,
    api_key: Option<String>,
    config_dir: Option<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let args = Args {
        lang: pargs.opt_value_from_str("--lang")?,
        api_key: pargs.opt_value_from_str("--api-key")?,
        config_dir: pargs.opt_value_from_str("--config-dir")?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }

    Ok(Some(args))
}

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cat_gallery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(error) => {
            eprintln!("error: {error}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_override(args.config_dir);

    let non_blank = |key: &String| !key.trim().is_empty();
    let api_key = args
        .api_key
        .filter(non_blank)
        .or_else(|| std::env::var(ENV_API_KEY).ok().filter(non_blank));

    app::run(Flags {
        lang: args.lang,
        api_key,
    })
}
