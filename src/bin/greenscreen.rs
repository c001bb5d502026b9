//! Command-line greenscreen.
//!
//! Keys out the most common colour of a foreground image and shows a background
//! through it. Prints the key colour and replaced pixel count as JSON on stdout.

use greenscreen_rust::filters::color_adjust::invert_u8;
use greenscreen_rust::{io, FilterError, GreenScreenConfig, KeyingParams};
use std::{env, path::PathBuf, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config = GreenScreenConfig::default();
    let mut positional = Vec::new();

    // Parse arguments; --config is applied first so later flags override it
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let path = next_value(&args, &mut i);
                config = match GreenScreenConfig::from_json_file(&PathBuf::from(path)) {
                    Ok(c) => c,
                    Err(e) => fail(&args[0], e),
                };
            }
            "--buckets" => {
                config.buckets = parse_number(&args[0], "--buckets", next_value(&args, &mut i));
            }
            "--threshold" => {
                config.threshold =
                    parse_number(&args[0], "--threshold", next_value(&args, &mut i));
            }
            "--invert" => config.invert_output = true,
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => positional.push(PathBuf::from(arg)),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    match positional.len() {
        0 => {}
        3 => {
            config.output = positional.pop().unwrap_or_default();
            config.background = positional.pop().unwrap_or_default();
            config.foreground = positional.pop().unwrap_or_default();
        }
        _ => {
            eprintln!("Error: expected <foreground> <background> <output> or no paths");
            process::exit(1);
        }
    }

    if let Err(e) = run(&config) {
        fail(&args[0], e);
    }
}

fn run(config: &GreenScreenConfig) -> Result<(), FilterError> {
    config.validate()?;

    let foreground = io::load_bgr(&config.foreground)?;
    let background = io::load_bgr(&config.background)?;

    let params = KeyingParams::from(config);
    let key = params.resolve_key(foreground.view())?;
    let result = params
        .with_key_color(key)
        .render(foreground.view(), background.view())?;

    log::info!(
        "key color (b, g, r) = ({}, {}, {}); replaced {} of {} pixels",
        key.blue,
        key.green,
        key.red,
        result.replaced,
        foreground.dim().0 * foreground.dim().1
    );

    let output = if config.invert_output {
        invert_u8(result.image.view())
    } else {
        result.image
    };
    io::save_bgr(output.view(), &config.output)?;

    let summary = serde_json::json!({
        "key": key,
        "replaced": result.replaced,
        "output": config.output,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn next_value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(v) => v,
        None => {
            eprintln!("Error: {} requires a value", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_number<T: std::str::FromStr>(program: &str, flag: &str, value: &str) -> T {
    match value.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Error: {} expects a number, got '{}'", flag, value);
            print_help(program);
            process::exit(1);
        }
    }
}

fn fail(program: &str, error: FilterError) -> ! {
    eprintln!("greenscreen failed: {}", error);
    if error.is_invalid_argument() {
        eprintln!("Run '{} --help' for parameter ranges.", program);
    }
    process::exit(1);
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] [<foreground> <background> <output>]", program_name);
    eprintln!();
    eprintln!("Replace the most common colour of the foreground with the (tiled) background.");
    eprintln!("Without paths, reads foreground.jpg and background.jpg and writes overlay.jpg.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE      Load settings from a JSON file");
    eprintln!("  --buckets N        Histogram buckets per channel, 1-256 (default: 4)");
    eprintln!("  --threshold N      Per-channel tolerance, >= 0 (default: 60)");
    eprintln!("  --invert           Invert the result before saving");
    eprintln!("  --help, -h         Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for per-stage logging.");
}
