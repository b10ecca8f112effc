extern crate clap;
extern crate env_logger;
extern crate histobrot;
extern crate image;
#[macro_use]
extern crate log;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use histobrot::{default_gradient, render_threaded, ColorStop, PixelGrid, RenderConfig,
                RenderError, Rgb, Zoom};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A zoom is written as "x,y,scale": the pixel to recenter on and
/// the magnification factor, e.g. "295,202,0.1".
fn parse_zoom(s: &str) -> Option<Zoom> {
    let fields: Vec<&str> = s.split(',').collect();
    if fields.len() != 3 {
        return None;
    }
    match (
        f64::from_str(fields[0]),
        f64::from_str(fields[1]),
        f64::from_str(fields[2]),
    ) {
        (Ok(x), Ok(y), Ok(scale)) => Some(Zoom {
            focus: (x, y),
            scale,
        }),
        _ => None,
    }
}

/// A gradient stop is written as "fraction:r,g,b", e.g. "0.3:255,0,0".
fn parse_stop(s: &str) -> Option<ColorStop> {
    let colon = s.find(':')?;
    let threshold = match f64::from_str(&s[..colon]) {
        Ok(t) => t,
        Err(_) => return None,
    };
    let channels: Vec<&str> = s[colon + 1..].split(',').collect();
    if channels.len() != 3 {
        return None;
    }
    match (
        u8::from_str(channels[0]),
        u8::from_str(channels[1]),
        u8::from_str(channels[2]),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Some(ColorStop::new(threshold, Rgb(r, g, b))),
        _ => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ZOOM: &str = "zoom";
const STOP: &str = "stop";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("histobrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Histogram-equalized Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (PNG)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| match parse_zoom(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse zoom, expected x,y,scale".to_string()),
                })
                .help("Zoom step as x,y,scale; repeat to zoom deeper, applied in order"),
        )
        .arg(
            Arg::with_name(STOP)
                .required(false)
                .long(STOP)
                .short("g")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| match parse_stop(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse gradient stop, expected fraction:r,g,b".to_string()),
                })
                .help("Gradient stop as fraction:r,g,b; repeat to replace the whole gradient"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the iteration pass"),
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
                .help("Maximum iterations per pixel"),
        )
        .get_matches()
}

fn write_image(outfile: &str, grid: &PixelGrid) -> Result<(), RenderError> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(
        &grid.to_bytes(),
        grid.width() as u32,
        grid.height() as u32,
        ColorType::RGB(8),
    )?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();

    let image_size: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Could not parse thread count.");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");

    // The base zoom converts pixel units to complex units, framing
    // the real axis across four units; user zooms stack on top.
    let mut zooms = vec![Zoom {
        focus: (0.0, 0.0),
        scale: 4.0 / (image_size.0 as f64),
    }];
    if let Some(values) = matches.values_of(ZOOM) {
        for value in values {
            zooms.push(parse_zoom(value).expect("Error parsing zoom"));
        }
    }

    let stops = match matches.values_of(STOP) {
        Some(values) => values
            .map(|value| parse_stop(value).expect("Error parsing gradient stop"))
            .collect(),
        None => default_gradient(),
    };

    let config = match RenderConfig::new(image_size.0, image_size.1, zooms, stops, iterations) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!(
        "rendering {}x{} at {} iterations on {} threads",
        config.width(),
        config.height(),
        iterations,
        threads
    );
    let grid = render_threaded(&config, threads);

    if let Err(e) = write_image(matches.value_of(OUTPUT).unwrap(), &grid) {
        eprintln!("Write failure: {}", e);
        std::process::exit(1);
    }
}
