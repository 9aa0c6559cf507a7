pub mod protocol;
pub mod protocol_io;
pub mod interfaces;
pub mod formatting;
pub mod address;
pub mod registry;
pub mod selector;
pub mod bridge;
pub mod command;
pub mod session;
pub mod config;
pub mod scripted_host;
pub mod replay;

pub use session::Session;

pub async fn run() -> anyhow::Result<()> {
    let path = std::env::var_os(config::CONFIG_ENV).map(std::path::PathBuf::from);
    let tool_config = config::ToolConfig::load(path.as_deref())?;
    tracing::info!(
        tool = config::TOOL_NAME,
        comment = config::TOOL_COMMENT,
        help = config::TOOL_HELP,
        hotkey = config::TOOL_HOTKEY,
        chooser = %tool_config.chooser_title,
        trigger = %tool_config.trigger,
        "Starting"
    );
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    replay::run_replay(stdin, tokio::io::stdout(), tool_config).await
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .without_time()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
