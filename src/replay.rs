//! Drives a session from a stream of replay commands, one response per command.
use crate::config::ToolConfig;
use crate::interfaces::ModuleChooser;
use crate::protocol::{ReplayCommand, ReplayResponse};
use crate::protocol_io::{decode_command, read_line, write_response};
use crate::scripted_host::ScriptedHost;
use crate::session::Session;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error, info};

pub async fn run_replay<R, W>(mut reader: R, mut writer: W, config: ToolConfig) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::with_config(ScriptedHost::new(), config);
    info!("Replay started");
    while let Some(line) = read_line(&mut reader).await? {
        let resp = match decode_command(&line) {
            Ok(cmd) => {
                debug!(?cmd, "Received command");
                apply(&mut session, cmd)
            }
            Err(e) => {
                error!(error = %e, "Malformed command");
                ReplayResponse::Error { message: format!("Invalid command: {}", e) }
            }
        };
        write_response(&mut writer, &resp).await?;
    }
    session.terminate();
    info!("Replay finished");
    Ok(())
}

fn apply(session: &mut Session<ScriptedHost>, cmd: ReplayCommand) -> ReplayResponse {
    match cmd {
        ReplayCommand::SetModules { modules } => {
            session.host_mut().set_modules(modules);
            ReplayResponse::Ack
        }
        ReplayCommand::QueueAnswer { text } => {
            session.host_mut().queue_answer(text.as_deref());
            ReplayResponse::Ack
        }
        ReplayCommand::Run => match session.run() {
            Ok(outcome) => ReplayResponse::Ran { outcome },
            Err(e) => ReplayResponse::Error { message: e.to_string() },
        },
        ReplayCommand::Event { event } => ReplayResponse::Disposition {
            handled: session.handle_event(&event).is_handled(),
        },
        ReplayCommand::Rows => match session.selector() {
            Some(selector) => {
                let rows = (0..selector.get_count()).filter_map(|n| selector.get_row(n).ok()).collect();
                ReplayResponse::Rows { rows }
            }
            None => ReplayResponse::Error { message: "Module chooser is not open".to_string() },
        },
        ReplayCommand::Breakpoints => ReplayResponse::Breakpoints {
            addresses: session.host().breakpoints().to_vec(),
            cursor: session.host().cursor(),
        },
        ReplayCommand::Terminate => {
            session.terminate();
            ReplayResponse::Ack
        }
    }
}
