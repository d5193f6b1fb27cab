use clap::Parser;
use envelope::{
    server::{create_server, Config, ServerBind},
    tracing_config::configure_tracing,
    Error,
};
use error_stack::{Report, ResultExt};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Do not read the .env file
    #[clap(long)]
    no_dotenv: bool,

    /// The IP host to bind to
    #[clap(long, env = "HOST", default_value = "::1")]
    host: String,

    /// The TCP port to listen on
    #[clap(long, env = "PORT", default_value_t = 9783)]
    port: u16,
}

async fn serve(cmd: Cli) -> Result<(), Report<Error>> {
    error_stack::Report::set_color_mode(error_stack::fmt::ColorMode::None);
    configure_tracing()?;

    let server = create_server(Config {
        bind: ServerBind::HostPort(cmd.host, cmd.port),
    })
    .await?;

    server.run().await?;

    tracing::info!("Server shut down");
    Ok(())
}

fn main() -> Result<(), Report<Error>> {
    let cli = Cli::parse();
    // Parse again once .env is loaded so its values can fill in the env fallbacks.
    let cli = if !cli.no_dotenv && dotenvy::dotenv().is_ok() {
        Cli::parse()
    } else {
        cli
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .change_context(Error::ServerStart)?
        .block_on(serve(cli))
}
