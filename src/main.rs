use clap::Parser;
use log::{error, info};

use tombs::cli::{init_logging, Args};
use tombs::tcod_frontend::{TcodFov, TcodFrontend};
use tombs::{main_menu, Context, RogueResult};

fn run(args: Args) -> RogueResult<()> {
    let config = args.into_config()?;
    info!("tombs v{} starting, saves go to {}", tombs::VERSION, config.save_path.display());

    let frontend = TcodFrontend::new(&config)?;
    let fov = TcodFov::new(config.map_width, config.map_height);
    let mut ctx = Context::new(Box::new(frontend), Box::new(fov), config);

    main_menu(&mut ctx);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
