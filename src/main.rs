use std::{sync::Arc, time::Duration};

use clap::Parser;
use color_eyre::eyre::Result;

use dishlist::{
    domain::catalog::MockCatalog,
    infrastructure::{
        cli::{Cli, Command, PerfCommand},
        config::Config,
        http_source::HttpDataSource,
        mock_source::MockDataSource,
        server,
        tui::real::RealTui,
    },
    integration::app_runner::AppRunner,
    perf::monitor::{demo_comparison, Monitor},
    utils::{initialize_logging, initialize_panic_handler, LogOutput},
};

/// Latency of the offline source, matching the mock server's default
const OFFLINE_DELAY: Duration = Duration::from_millis(500);

async fn run_tui(args: &Cli, config: &Config) -> Result<()> {
    let tui = RealTui::new()?
        .tick_rate(args.tick_rate)
        .frame_rate(args.frame_rate);

    if args.offline {
        let source = MockDataSource::new(MockCatalog::new(config.server.total_pages))
            .with_delay(OFFLINE_DELAY);
        AppRunner::new(config, Arc::new(source), tui).run().await
    } else {
        let source = HttpDataSource::new(&config.api.base_url, config.api.timeout())?;
        AppRunner::new(config, Arc::new(source), tui).run().await
    }
}

async fn tokio_main() -> Result<()> {
    let args = <Cli as Parser>::parse();

    let output = match args.command {
        None => LogOutput::FileOnly,
        Some(_) => LogOutput::FileAndConsole,
    };
    initialize_logging(output)?;

    initialize_panic_handler()?;

    let mut config = Config::new()?;
    args.apply(&mut config);

    match &args.command {
        None => run_tui(&args, &config).await,
        Some(Command::Serve(_)) => server::serve(&config.server).await,
        Some(Command::Perf { command }) => {
            match command {
                PerfCommand::Monitor { api_url, app_url } => {
                    let api_url = api_url.as_deref().unwrap_or(&config.api.base_url);
                    let app_url = app_url.as_deref().unwrap_or(api_url);
                    Monitor::new(api_url, app_url)?.run().await;
                }
                PerfCommand::Compare => println!("{}", demo_comparison()),
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
