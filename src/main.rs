mod app;
mod assets;
mod audio;
mod battle;
mod config;
mod game;
mod main_menu;
mod model;
mod prelude;
mod render;
mod screen;
mod stocks;
mod title;

use geng::prelude::*;

#[derive(clap::Parser)]
struct Opts {
    #[clap(long)]
    config: Option<std::path::PathBuf>,
    #[clap(subcommand)]
    command: Option<Command>,
    #[clap(flatten)]
    geng: geng::CliArgs,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the first closing price of each of the last months for the configured tickers.
    Stocks {
        /// RON file mapping tickers to `(date, close)` pairs.
        #[clap(long)]
        history: std::path::PathBuf,
        /// Count months back from this date instead of today.
        #[clap(long)]
        today: Option<chrono::NaiveDate>,
    },
}

fn main() {
    logger::init();
    geng::setup_panic_handler();

    let opts: Opts = clap::Parser::parse();

    let config_path = opts
        .config
        .clone()
        .unwrap_or_else(|| run_dir().join("assets").join("config.ron"));
    let config = match futures::executor::block_on(config::Config::load(&config_path)) {
        Ok(config) => Rc::new(config),
        Err(err) => {
            log::error!("{:#}", err);
            std::process::exit(1);
        }
    };

    if let Some(Command::Stocks { history, today }) = &opts.command {
        if let Err(err) = futures::executor::block_on(stocks::run(&config, history, *today)) {
            log::error!("{:#}", err);
            std::process::exit(1);
        }
        return;
    }

    let mut geng_options = geng::ContextOptions::default();
    geng_options.window.title = config.window_title.clone();
    geng_options.with_cli(&opts.geng);

    Geng::run_with(&geng_options, move |geng| async move {
        let assets = Rc::new(assets::Assets::load(geng.asset_manager(), &config.music).await);
        let music = audio::Jukebox::new_or_silent(&assets, config.music.volume);
        let state = app::App::new(&geng, &config, music);
        geng.run_state(state).await;
    });
}
