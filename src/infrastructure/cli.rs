use clap::{Args, Parser, Subcommand};

use crate::{
    infrastructure::config::{Config, ServerConfig},
    utils::version,
};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 60.0
    )]
    pub frame_rate: f64,

    #[arg(long, value_name = "URL", help = "Base URL of the list API")]
    pub api_url: Option<String>,

    #[arg(long, help = "Serve pages from an in-process mock instead of HTTP")]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Fold command line overrides into the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(api_url) = &self.api_url {
            config.api.base_url = api_url.clone();
        }
        if let Some(Command::Serve(args)) = &self.command {
            args.apply(&mut config.server);
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the mock paging server
    Serve(ServeArgs),
    /// Measure a running list server
    Perf {
        #[command(subcommand)]
        command: PerfCommand,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ServeArgs {
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    #[arg(long, value_name = "N", help = "Number of pages before the end of the list")]
    pub total_pages: Option<u32>,

    #[arg(long, value_name = "MS", help = "Artificial latency of each page")]
    pub delay_ms: Option<u64>,
}

impl ServeArgs {
    pub fn apply(&self, server: &mut ServerConfig) {
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        if let Some(total_pages) = self.total_pages {
            server.total_pages = total_pages;
        }
        if let Some(delay_ms) = self.delay_ms {
            server.delay_ms = delay_ms;
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PerfCommand {
    /// Time a few API requests and print the results
    Monitor {
        #[arg(long, value_name = "URL", help = "Base URL of the list API")]
        api_url: Option<String>,
        #[arg(long, value_name = "URL", help = "URL of the app server")]
        app_url: Option<String>,
    },
    /// Print the fixed before/after comparison
    Compare,
}
