extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate log;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{value_t, App, Arg, ArgMatches};
use env_logger::Builder;
use failure::{err_msg, Error};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use log::{info, LevelFilter};
use mandelbrot::parse::{
    parse_complex, parse_pair, validate_pair, validate_positive, validate_range,
};
use mandelbrot::{Bounds, Config, Explorer};
use num::Complex;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const PERIOD: &str = "period";
const ZOOM: &str = "zoom";
const PAN: &str = "pan";
const VERBOSITY: &str = "verbosity";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders one frame of the Mandelbrot set")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (binary PNM pixmap)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("700x400")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.5,-1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the complex plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the complex plane"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        max_threads * 4,
                        "Could not parse thread count",
                        &format!("Thread count must be between 0 and {}", max_threads * 4),
                    )
                })
                .help("Row bands computed in parallel, default one per CPU; 0 or 1 is sequential"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Escape cap per point"),
        )
        .arg(
            Arg::with_name(PERIOD)
                .required(false)
                .long(PERIOD)
                .short("p")
                .takes_value(true)
                .default_value("20")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse periodicity cutoff",
                        "Periodicity cutoff must be between 1 and 1000000",
                    )
                })
                .help("Iterations between periodicity checks"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| validate_positive(&s, "Zoom factor must be a positive number"))
                .help("Zoom about the center; below 1 zooms in"),
        )
        .arg(
            Arg::with_name(PAN)
                .required(false)
                .long(PAN)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse pan distance"))
                .help("Pan by dx,dy pixels after zooming (+x right, +y down)"),
        )
        .arg(
            Arg::with_name(VERBOSITY)
                .required(false)
                .long(VERBOSITY)
                .short("v")
                .takes_value(true)
                .default_value("error")
                .help("Log level: error, warn, info, debug or trace"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(())
}

fn pair<T: FromStr>(matches: &ArgMatches, name: &str, separator: char) -> Result<(T, T), Error> {
    matches
        .value_of(name)
        .and_then(|s| parse_pair(s, separator))
        .ok_or_else(|| err_msg(format!("Error parsing {}", name)))
}

fn corner(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, Error> {
    matches
        .value_of(name)
        .and_then(parse_complex)
        .ok_or_else(|| err_msg(format!("Error parsing {}", name)))
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = pair::<usize>(matches, SIZE, 'x')?;
    let (dx, dy) = pair::<f64>(matches, PAN, ',')?;
    let output = matches
        .value_of(OUTPUT)
        .ok_or_else(|| err_msg("No output file given"))?;

    let threads = if matches.is_present(THREADS) {
        value_t!(matches, THREADS, usize)?
    } else {
        num_cpus::get()
    };

    let config = Config {
        width,
        height,
        max_iterations: value_t!(matches, ITERATIONS, u32)?,
        periodicity_cutoff: value_t!(matches, PERIOD, u32)?,
        worker_count: threads,
        bounds: Bounds::new(corner(matches, LEFTLOWER)?, corner(matches, RIGHTUPPER)?)?,
        ..Config::default()
    };

    let mut explorer = Explorer::new(config)?;
    explorer.zoom(value_t!(matches, ZOOM, f64)?)?;
    explorer.pan(dx, dy)?;

    let frame = explorer.frame();
    info!("Writing {} over {:?}", output, frame.bounds());
    let dimensions = frame.colors().dimensions();
    write_image(
        output,
        &frame.colors().to_rgb_bytes(),
        (dimensions.width(), dimensions.height()),
    )
}

fn main() {
    let matches = args();

    let verbosity = matches.value_of(VERBOSITY).unwrap_or("error");
    let level = LevelFilter::from_str(verbosity).unwrap_or(LevelFilter::Error);
    let mut builder = Builder::from_default_env();
    builder.filter_level(level).init();

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
