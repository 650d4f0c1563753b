//! This is the command line tool that loads an input file and either compresses
//! or decompresses it with one of the registered algorithms.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command};
use squash::registry::{self, Algorithm};
use squash::{Error, Result};

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use std::{fs, fs::File, io::Write};

fn save_file(data: &[u8], path: &str) -> Result<()> {
    let mut f = File::create(path)?;
    f.write_all(data)?;
    log::info!("Wrote {}.", &path);
    Ok(())
}

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

/// Replace the last extension of 'input' with 'extension'.
fn encoded_path(input: &str, extension: &str) -> String {
    let path = Path::new(input);
    match path.extension() {
        Some(_) => {
            let stem = path.with_extension("");
            stem.to_string_lossy().into_owned() + extension
        }
        None => String::from(input) + extension,
    }
}

/// Strip the algorithm extension from 'input', if it has one.
fn decoded_path(input: &str, extension: &str) -> Option<String> {
    let stem = input.strip_suffix(extension)?;
    if stem.is_empty() {
        return None;
    }
    Some(String::from(stem))
}

fn compress(algo: &Algorithm, input: &[u8], out: &str, checked: bool) -> Result<()> {
    log::info!("Compressing using the {} compressor", algo.name);
    let mut dest = Vec::new();
    let written = (algo.encode)(input, &mut dest)?;
    log::info!("Compressed from {} to {} bytes.", input.len(), written);
    if written > 0 {
        log::info!(
            "Compression ratio is {:.4}x.",
            input.len() as f64 / written as f64
        );
    }
    save_file(&dest, out)?;

    if checked {
        let mut decoded = Vec::new();
        let (from, to) = (algo.decode)(&dest, &mut decoded)?;
        log::info!("Decompressed from {} to {} bytes.", from, to);
        if input == decoded {
            log::info!("Correct!");
        } else {
            log::error!("Incorrect!");
            return Err(Error::MalformedStream("round trip mismatch"));
        }
    }
    Ok(())
}

fn decompress(algo: &Algorithm, input: &[u8], out: &str) -> Result<()> {
    log::info!("Decompressing the {} compression", algo.name);
    let mut dest = Vec::new();
    let (from, to) = (algo.decode)(input, &mut dest)?;
    log::info!("Decompressed from {} to {} bytes.", from, to);
    save_file(&dest, out)
}

fn main() -> ExitCode {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .value_name("algorithm")
                .help("The algorithm used for compression.")
                .value_parser(PossibleValuesParser::new(registry::names()))
                .num_args(1),
        )
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Decompress after compressing and verify the result")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompress")
                .short('d')
                .long("decode")
                .help("Decompress the input")
                .action(ArgAction::SetTrue)
                .conflicts_with("compress"),
        )
        .arg(
            Arg::new("compress")
                .short('c')
                .long("compress")
                .help("Compress the input")
                .conflicts_with("decompress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list-algorithms")
                .help("List all available algorithms")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required_unless_present("list")
                .index(1),
        )
        .arg(
            Arg::new("OUTPUT")
                .help("Sets the output file")
                .conflicts_with("output")
                .index(2),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    if matches.get_flag("list") {
        println!("Available algorithm options are:");
        for algo in registry::ALGORITHMS.iter() {
            println!("    - \"{}\" ({})", algo.name, algo.extension);
        }
        return ExitCode::SUCCESS;
    }

    let cli_decompress = matches.get_flag("decompress");
    let cli_checked_mode = matches.get_flag("checked");
    let cli_algorithm = matches
        .get_one::<String>("algorithm")
        .cloned()
        .unwrap_or_else(|| String::from("huffman"));
    let cli_output_path = matches
        .get_one::<String>("output")
        .or_else(|| matches.get_one::<String>("OUTPUT"))
        .cloned();

    let Some(input_path) = matches.get_one::<String>("INPUT") else {
        log::error!("Must provide an input file");
        return ExitCode::FAILURE;
    };

    let algo = match registry::select(&cli_algorithm) {
        Ok(algo) => algo,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    // Come up with a file name.
    let out = match cli_output_path {
        Some(path) => path,
        None if !cli_decompress => encoded_path(input_path, algo.extension),
        None => match decoded_path(input_path, algo.extension) {
            Some(path) => path,
            None => {
                log::error!("Decoding {} needs an output filename", input_path);
                return ExitCode::FAILURE;
            }
        },
    };

    let input = match fs::read(input_path) {
        Ok(input) => input,
        Err(err) => {
            log::error!("Can't open the input file {}: {}", input_path, err);
            return ExitCode::FAILURE;
        }
    };

    let timer = Timer::new();
    let res = if cli_decompress {
        decompress(algo, &input, &out)
    } else {
        compress(algo, &input, &out, cli_checked_mode)
    };
    drop(timer);

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Operation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[test]
fn test_output_paths() {
    assert_eq!(encoded_path("notes.txt", ".huff"), "notes.huff");
    assert_eq!(encoded_path("notes", ".rle"), "notes.rle");
    assert_eq!(encoded_path("a.b.c", ".huff"), "a.b.huff");
    assert_eq!(decoded_path("notes.huff", ".huff").unwrap(), "notes");
    assert!(decoded_path("notes.txt", ".huff").is_none());
}
