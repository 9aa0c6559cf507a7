//! JSON-lines framing for replay commands and responses.
use crate::protocol::{ReplayCommand, ReplayResponse};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Next non-blank line from `reader`, or `None` at end of input.
pub async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        if !line.trim().is_empty() {
            return Ok(Some(line.trim().to_string()));
        }
    }
}

pub fn decode_command(line: &str) -> anyhow::Result<ReplayCommand> {
    let command = serde_json::from_str(line)?;
    Ok(command)
}

pub async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, resp: &ReplayResponse) -> anyhow::Result<()> {
    let mut data = serde_json::to_vec(resp)?;
    data.push(b'\n');
    writer.write_all(&data).await?;
    writer.flush().await?;
    debug!(?resp, "Sent response");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HostEvent;

    #[test]
    fn decodes_tagged_commands() {
        let cmd = decode_command(r#"{"type":"Event","data":{"event":{"event_type":"ModuleLoaded","data":{"name":"libc","base":8323072}}}}"#).unwrap();
        match cmd {
            ReplayCommand::Event { event } => {
                assert_eq!(event, HostEvent::ModuleLoaded { name: "libc".into(), base: 0x7f0000 })
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(matches!(decode_command(r#"{"type":"Run"}"#).unwrap(), ReplayCommand::Run));
        assert!(decode_command("{").is_err());
    }

    #[tokio::test]
    async fn skips_blank_lines_and_stops_at_eof() {
        let mut input: &[u8] = b"\n  \n{\"type\":\"Rows\"}\n";
        assert_eq!(read_line(&mut input).await.unwrap().as_deref(), Some(r#"{"type":"Rows"}"#));
        assert_eq!(read_line(&mut input).await.unwrap(), None);
    }

    #[tokio::test]
    async fn responses_are_newline_terminated() {
        let mut out = Vec::new();
        write_response(&mut out, &ReplayResponse::Ack).await.unwrap();
        assert_eq!(out, b"{\"type\":\"Ack\"}\n");
    }
}
