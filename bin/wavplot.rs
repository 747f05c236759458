use wavplot::convert::{self, Layout};
use wavplot::params::Parameters;
use wavplot::utils;

use std::path::PathBuf;

use clap::{Arg, Command};
use log::error;


fn app() -> Command<'static> {
    Command::new("Render waveform and spectrogram textures from Assets/wave.wav")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .arg(Arg::new("root")
                .help("The project directory containing 'Assets' [default: current directory]")
                .value_name("DIR")
                .long("root")
                .takes_value(true)
                .allow_invalid_utf8(true))
        .arg(Arg::new("params")
                .help("The rendering parameters to use (as yaml file)")
                .value_name("PARAMS")
                .short('p')
                .long("params")
                .takes_value(true)
                .allow_invalid_utf8(true))
        .arg(Arg::new("show")
                .help("Whether to preview the plots with gnuplot")
                .short('s')
                .long("show"))
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> wavplot::Result<()> {
    let matches = app().get_matches();
    let root = matches.value_of_os("root").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let show = matches.is_present("show");

    // load parameters
    let params = match matches.value_of_os("params") {
        Some(path) => Parameters::load(path)?,
        None => Parameters::default(),
    };

    // render and write both textures
    let out = convert::run(&Layout::new(root), &params)?;

    // plot
    if show {
        utils::show_waveform(&out.left, &out.times, out.duration)?;
        utils::show_spectrogram(&out.spectrum, out.duration, &params.spectrogram)?;
    }

    Ok(())
}
