use app_state::load_app_settings;
use clap::Parser;
use color_eyre::Result;
use common_services::database::get_db_pool;
use worker::worker::create_worker;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Exit once the queue runs dry instead of polling forever.
    #[clap(long, default_value_t = false, action)]
    stop_on_sleep: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worker=info,common_services=info".into()),
        )
        .init();
    color_eyre::install()?;

    let args = Args::parse();
    let settings = load_app_settings()?;
    let pool = get_db_pool(&settings.secrets.database_url).await?;
    create_worker(pool, settings, args.stop_on_sleep).await?;

    Ok(())
}
