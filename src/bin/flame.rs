extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate flame;
#[macro_use]
extern crate log;
extern crate num_cpus;
extern crate rand;

use clap::{App, Arg, ArgMatches};
use flame::{AffineMatrix, FlameConfig, Renderer, Variation};
use rand::Rng;
use std::path::PathBuf;
use std::str::FromStr;

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

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
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

fn validate_variation(s: &str) -> Result<(), String> {
    if s == "random" || s.parse::<Variation>().is_ok() {
        return Ok(());
    }
    validate_range(
        s,
        0,
        Variation::ALL.len(),
        "Variation must be a name, 'random', or a number",
        &format!("Variation number must be between 0 and {}", Variation::ALL.len()),
    )
}

const OUTPUT: &str = "output";
const FORMAT: &str = "format";
const SIZE: &str = "size";
const VARIATION: &str = "variation";
const ITERATIONS: &str = "iterations";
const POINTS: &str = "points";
const MATRIX: &str = "matrix";
const PRESET: &str = "preset";
const SYMMETRY: &str = "symmetry";
const THREADS: &str = "threads";
const GAMMA: &str = "gamma";
const SEED: &str = "seed";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("flame")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Fractal flame renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .required(false)
                .long(FORMAT)
                .short("f")
                .takes_value(true)
                .possible_values(&["png", "jpeg", "bmp"])
                .help("Image format; replaces the output file's extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1920x1080")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(VARIATION)
                .required(false)
                .long(VARIATION)
                .short("v")
                .takes_value(true)
                .default_value("random")
                .validator(|s| validate_variation(&s))
                .help("diamond, bubble, fisheye, exponential, rays, random, or 0-5"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Plotted iterations per seed point"),
        )
        .arg(
            Arg::with_name(POINTS)
                .required(false)
                .long(POINTS)
                .short("p")
                .takes_value(true)
                .default_value("10000")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        100_000_000,
                        "Could not parse point count",
                        "Point count must be between 1 and 100000000",
                    )
                })
                .help("Number of seed points"),
        )
        .arg(
            Arg::with_name(MATRIX)
                .required(false)
                .long(MATRIX)
                .short("m")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| s.parse::<AffineMatrix>().map(|_| ()).map_err(|e| e.to_string()))
                .help("Affine matrix as a,b,c,d,e,f,r,g,b; repeat for more"),
        )
        .arg(
            Arg::with_name(PRESET)
                .required(false)
                .long(PRESET)
                .short("P")
                .takes_value(true)
                .conflicts_with(MATRIX)
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        AffineMatrix::PRESET_COUNT - 1,
                        "Could not parse preset number",
                        &format!("Preset must be between 0 and {}", AffineMatrix::PRESET_COUNT - 1),
                    )
                })
                .help("Built-in matrix set; chosen at random if neither this nor --matrix is given"),
        )
        .arg(
            Arg::with_name(SYMMETRY)
                .required(false)
                .long(SYMMETRY)
                .short("S")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        360,
                        "Could not parse symmetry order",
                        "Symmetry order must be between 1 and 360",
                    )
                })
                .help("Rotated copies of every point"),
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
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(GAMMA)
                .required(false)
                .long(GAMMA)
                .short("g")
                .takes_value(true)
                .default_value("2.2")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0.01,
                        100.0,
                        "Could not parse gamma",
                        "Gamma must be between 0.01 and 100",
                    )
                })
                .help("Gamma correction applied to density"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    u64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse seed".to_string())
                })
                .help("Seed for reproducible single-threaded renders"),
        )
        .get_matches()
}

fn parse<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    let value = matches
        .value_of(name)
        .ok_or_else(|| failure::err_msg(format!("missing --{}", name)))?;
    T::from_str(value).map_err(|_| failure::err_msg(format!("could not parse --{} '{}'", name, value)))
}

fn variation<R: Rng>(selector: &str, rng: &mut R) -> Result<Variation, failure::Error> {
    if selector == "random" {
        return Ok(Variation::random(rng));
    }
    match usize::from_str(selector) {
        Ok(index) => Ok(Variation::select(index, rng)?),
        Err(_) => Ok(selector.parse::<Variation>()?),
    }
}

fn matrices<R: Rng>(matches: &ArgMatches, rng: &mut R) -> Result<Vec<AffineMatrix>, failure::Error> {
    if let Some(values) = matches.values_of(MATRIX) {
        return values
            .map(|m| m.parse::<AffineMatrix>().map_err(failure::Error::from))
            .collect();
    }
    let preset = match matches.value_of(PRESET) {
        Some(p) => usize::from_str(p)?,
        None => rng.gen_range(0, AffineMatrix::PRESET_COUNT),
    };
    info!("using matrix preset {}", preset);
    AffineMatrix::preset(preset).ok_or_else(|| failure::err_msg(format!("no preset {}", preset)))
}

fn output_path(matches: &ArgMatches) -> Result<PathBuf, failure::Error> {
    let mut path = PathBuf::from(parse::<String>(matches, OUTPUT)?);
    match matches.value_of(FORMAT) {
        Some(format) => {
            path.set_extension(format);
        }
        None => {
            if path.extension().is_none() {
                path.set_extension("png");
            }
        }
    }
    Ok(path)
}

fn run() -> Result<(), failure::Error> {
    let matches = args();
    let (width, height): (u16, u16) = parse_pair(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))?;
    let mut rng = rand::thread_rng();
    let variation = variation(matches.value_of(VARIATION).unwrap_or("random"), &mut rng)?;
    let matrices = matrices(&matches, &mut rng)?;
    let output = output_path(&matches)?;

    let mut config = FlameConfig::new(width as usize, height as usize, variation, matrices)
        .iterations(parse(&matches, ITERATIONS)?)
        .points(parse(&matches, POINTS)?)
        .symmetry(parse(&matches, SYMMETRY)?)
        .threads(parse(&matches, THREADS)?)
        .gamma(parse(&matches, GAMMA)?);
    if matches.is_present(SEED) {
        config = config.seed(parse(&matches, SEED)?);
    }

    let image = Renderer::new(config)?.render()?;
    image.save(&output)?;
    info!("wrote {}", output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
