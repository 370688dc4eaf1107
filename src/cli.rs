//! Pieces shared by the command-line binaries

use std::env;
use std::io::{self, BufRead, Write};

use clap::Args;
use log::LevelFilter;

use crate::auth::Credentials;
use crate::config::Config;
use crate::error::{Error, Result};

/// Connection and credential arguments common to both tools
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Admin email. Falls back to POCKETBASE_ADMIN_EMAIL, then a prompt.
    pub email: Option<String>,

    /// Admin password. Falls back to POCKETBASE_ADMIN_PASSWORD, then a prompt.
    pub password: Option<String>,

    /// PocketBase base URL
    #[clap(long, env = "POCKETBASE_URL")]
    pub url: Option<String>,

    /// Per-request timeout in seconds (default: wait forever)
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Output debug logs to stderr
    #[clap(long)]
    pub debug: bool,
}

impl ConnectionArgs {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(url) = &self.url {
            config = config.with_base_url(url)?;
        }
        if let Some(secs) = self.timeout {
            config = config.with_request_timeout(Some(std::time::Duration::from_secs(secs)));
        }
        Ok(config)
    }

    /// Resolve credentials: arguments, then environment, then an interactive prompt
    pub fn credentials(&self) -> Result<Credentials> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        let email = resolve(
            self.email.clone(),
            "POCKETBASE_ADMIN_EMAIL",
            "Enter admin email: ",
            &mut input,
            &mut output,
        )?;
        let password = resolve(
            self.password.clone(),
            "POCKETBASE_ADMIN_PASSWORD",
            "Enter admin password: ",
            &mut input,
            &mut output,
        )?;

        Ok(Credentials::new(email, password))
    }
}

fn resolve<R: BufRead, W: Write>(
    arg: Option<String>,
    var: &str,
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if let Some(value) = arg {
        return Ok(value);
    }
    if let Ok(value) = env::var(var) {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    read_line(prompt, input, output)
}

/// Read line from `input` after writing `prompt`
pub fn read_line<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        let label = prompt.trim_end_matches([':', ' ']);
        return Err(Error::input(format!("no input for \"{}\"", label)));
    }

    Ok(line.trim().to_string())
}

/// Install the logger. `RUST_LOG` applies unless `debug` forces debug level.
pub fn init_logging(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else {
        builder.filter_level(LevelFilter::Warn);
    }
    let _ = builder.try_init();
}
