use std::io::{self, IsTerminal};
use std::process::ExitCode;

use agent_runner_api::RunnerApiConfig;
use chat_session::{ChatApp, HttpRunnerBackend, SessionContext};
use meraki_chat::logging::init_logging;
use meraki_chat::{run_chat, ChatExit, EnvConfig, TerminalOptions, TerminalSurface};

fn main() -> io::Result<ExitCode> {
    let config = EnvConfig::from_env();
    init_logging(&config)?;

    let backend = HttpRunnerBackend::new(RunnerApiConfig::new(&config.runner_host))
        .map_err(io::Error::other)?;
    tracing::info!(base_url = %backend.base_url(), "agent runner configured");

    let mut app = ChatApp::new(backend, SessionContext::new(&config.user_id));

    let stdout = io::stdout();
    let interactive = stdout.is_terminal();
    let options = TerminalOptions {
        width: config.columns,
        color: interactive && !config.no_color,
        animate: interactive,
    };
    let mut surface = TerminalSurface::new(stdout, options);

    let exit = run_chat(&mut app, io::stdin().lock(), &mut surface)?;
    tracing::info!(?exit, "chat ended");

    Ok(match exit {
        ChatExit::SessionFailed => ExitCode::FAILURE,
        ChatExit::Quit | ChatExit::EndOfInput => ExitCode::SUCCESS,
    })
}
