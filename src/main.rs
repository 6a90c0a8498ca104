use arbitrage_desk::{app, cli::CommandLine, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    logging::init_tracing();

    app::run(cli).await
}
