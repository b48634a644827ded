//! fileconv - Entry Point
//!
//! Thin command line front end over the conversion core: converts one
//! uploaded file into the requested output format.

use std::env;
use std::process;

use env_logger;
use log::info;

use fileconv::config::AppConfig;
use fileconv::convert::Converter;
use fileconv::error::{AppError, handlers};

fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: fileconv <filename> <format>");
        process::exit(2);
    }

    match run(&args[1], &args[2]) {
        Ok(output_path) => println!("{}", output_path),
        Err(e) => {
            handlers::handle_error(&e);
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(filename: &str, format: &str) -> Result<String, AppError> {
    let config = AppConfig::load()?;
    config.ensure_directories()?;

    info!("Converting {} to {}", filename, format);

    let converter = Converter::new(
        &config.upload_dir_path(),
        &config.converted_dir_path(),
        config.conversion_timeout(),
    )?;

    let result = converter.convert(filename, format)?;
    Ok(result.output_path.display().to_string())
}
