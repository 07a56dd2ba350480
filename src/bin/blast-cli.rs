//! blast-cli - Command-line interface for pkblast
//!
//! A command-line tool for decompressing PKWare DCL imploded files and
//! inspecting their headers.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pkblast::{CompressionHeader, CompressionMode, Decompressor, DEFAULT_CHUNK_SIZE};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "blast-cli")]
#[command(about = "A CLI tool for PKWare DCL decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress a PKWare DCL imploded file
    Decompress {
        /// Input compressed file ("-" for stdin)
        input: PathBuf,

        /// Output decompressed file ("-" for stdout)
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,

        /// Bytes read from the input per chunk
        #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Load the whole input into memory and decode it without chunking
        #[arg(long)]
        in_memory: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

/// Options shared by the decompress command
struct DecompressOptions {
    force: bool,
    chunk_size: usize,
    in_memory: bool,
    verbose: bool,
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Decompress {
            input,
            output,
            force,
            chunk_size,
            in_memory,
        } => decompress_file(
            &input,
            &output,
            &DecompressOptions {
                force,
                chunk_size,
                in_memory,
                verbose: cli.verbose,
                quiet: cli.quiet,
            },
        ),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_input(path: &Path) -> Result<(Box<dyn Read>, Option<u64>), Box<dyn std::error::Error>> {
    if is_std_stream(path) {
        return Ok((Box::new(io::stdin().lock()), None));
    }
    if !path.exists() {
        return Err(format!("Input file '{}' does not exist", path.display()).into());
    }
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    Ok((Box::new(file), Some(len)))
}

fn open_output(path: &Path, force: bool) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
    if is_std_stream(path) {
        return Ok(Box::new(io::stdout().lock()));
    }
    if path.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            path.display()
        )
        .into());
    }
    Ok(Box::new(File::create(path)?))
}

/// Counts bytes on their way to the real sink
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn decompress_file(
    input: &Path,
    output: &Path,
    options: &DecompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (reader, input_size) = open_input(input)?;
    let writer = open_output(output, options.force)?;
    // Decoded output goes to stdout when output is "-"
    let report = !options.quiet && !is_std_stream(output);

    if options.verbose && report {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();
    let decompressor = Decompressor::new().with_chunk_size(options.chunk_size);
    let mut sink = CountingWriter {
        inner: BufWriter::new(writer),
        written: 0,
    };

    let remainder = if options.in_memory {
        let mut compressed = Vec::new();
        let mut reader = reader;
        reader.read_to_end(&mut compressed)?;
        let (remainder, _) = decompressor
            .buffer_to_stream(&compressed, &mut sink)
            .map_err(|e| format!("Decompression failed: {}", e))?;
        remainder
    } else {
        // Show progress bar for large files
        let progress = match input_size {
            Some(len) if report && len > 1024 * 1024 => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}",
                        )?
                        .progress_chars("#>-"),
                );
                pb.set_message("Decompressing...");
                Some(pb)
            }
            _ => None,
        };

        let result = match &progress {
            Some(pb) => decompressor.stream_to_stream(pb.wrap_read(reader), &mut sink),
            None => decompressor.stream_to_stream(reader, &mut sink),
        };
        let (remainder, _) = result.map_err(|e| format!("Decompression failed: {}", e))?;

        if let Some(pb) = progress {
            pb.finish_with_message("Decompression complete");
        }
        remainder
    };
    sink.flush()?;

    let decompression_time = start_time.elapsed();
    let output_size = sink.written;

    if report {
        println!("✓ Decompression successful!");
        if let Some(input_size) = input_size {
            println!("  Input:     {} bytes", input_size);
        }
        println!("  Output:    {} bytes", output_size);
        println!("  Remainder: {} bytes", remainder);
        println!("  Time:      {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let file_size = data.len();

    let header = CompressionHeader::parse(&data)
        .map_err(|e| format!("Not a valid PKWare DCL stream: {}", e))?;

    let mode_str = match header.mode {
        CompressionMode::Binary => "Binary (uncoded literals)",
        CompressionMode::ASCII => "ASCII (coded literals)",
    };

    println!("PKWare DCL File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);
    println!("  Compression Mode: {}", mode_str);
    println!(
        "  Dictionary Size: {} bytes ({} bits)",
        header.dict_size as u32,
        header.dict_size.bits()
    );

    if verbose {
        println!("  Header bytes: {:02x} {:02x}", data[0], data[1]);
    }

    match Decompressor::new().buffer_to_buffer(&data) {
        Ok((remainder, decompressed)) => {
            let decompressed_size = decompressed.len();
            println!("  Decompressed Size: {} bytes", decompressed_size);
            if decompressed_size > 0 {
                let ratio = (file_size as f64 / decompressed_size as f64) * 100.0;
                println!("  Compression Ratio: {:.1}%", ratio);
            }
            println!("  Trailing Bytes: {}", remainder);
            println!("  Status: ✓ Valid stream");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted stream");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
