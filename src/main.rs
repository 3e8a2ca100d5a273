use anyhow::Result;
use clap::{App as ClapApp, Arg};
use looma_tui::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml (defaults to ~/.config/looma-tui)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("empty")
                .long("empty")
                .help("Start with an empty store instead of the demo data"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if matches.is_present("empty") {
        config.seed_demo_data = false;
    }
    App::start(config).await?;
    Ok(())
}
