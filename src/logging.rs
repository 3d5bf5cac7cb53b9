//! Tracing setup. Logs go to `MERAKI_CHAT_LOG` when set, otherwise to stderr
//! only when `RUST_LOG` asks for them, so the chat transcript stays clean.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EnvConfig;

const FILE_FILTER: &str = "meraki_chat=info,chat_session=info,agent_runner_api=info";
const STDERR_FILTER: &str = "off";

pub fn init_logging(config: &EnvConfig) -> io::Result<()> {
    let default_filter = if config.log_file.is_some() {
        FILE_FILTER
    } else {
        STDERR_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init(),
    };

    result.map_err(io::Error::other)
}
