use clap::{crate_version, App, Arg};
use quire::build::build_site;
use quire::config::Config;
use spdlog::{error, info};
use std::path::Path;

fn main() {
    let matches = App::new("quire")
        .version(crate_version!())
        .about("Builds a static blog from a directory of markdown posts")
        .arg(
            Arg::with_name("config")
                .help("The project file (TOML, or YAML with a .yaml/.yml extension)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log every file as it is read and written"),
        )
        .get_matches();

    quire::logger::configure(matches.is_present("verbose"));

    // `config` is required, so clap has already exited if it's missing.
    let config_path = Path::new(matches.value_of("config").unwrap_or_default());
    if let Err(e) = run(config_path) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_file(config_path)?;
    build_site(&config)?;
    info!(
        "site built in `{}`",
        config.public_output_directory.display()
    );
    Ok(())
}
