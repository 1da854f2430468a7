//! Rowcrypt CLI - Command line interface.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Parser, Subcommand, ValueEnum};
use rowcrypt_functions::context::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use rowcrypt_functions::{ArenaConfig, Arity, ByteBuffer, Bytes, RowArena, ScalarFunction};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "rowcrypt")]
#[command(about = "Rowcrypt CLI - Encrypt, encode and hash values the way the query engine does")]
#[command(version)]
struct Cli {
    /// How arguments are written
    #[arg(long, value_enum, default_value = "utf8", env = "ROWCRYPT_INPUT_ENCODING")]
    input_encoding: Encoding,

    /// How results are printed
    #[arg(long, value_enum, default_value = "utf8", env = "ROWCRYPT_OUTPUT_ENCODING")]
    output_encoding: Encoding,

    /// Literal that stands for a null argument or result
    #[arg(long, default_value = "NULL", env = "ROWCRYPT_NULL_LITERAL")]
    null_literal: String,

    /// Arena chunk size in bytes
    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        env = "ROWCRYPT_ARENA_CHUNK_SIZE",
        value_parser = parse_chunk_size
    )]
    arena_chunk_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a function once
    Call {
        /// Function name (see `list`)
        function: ScalarFunction,
        /// Arguments, in the input encoding
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Invoke a function for every line of stdin
    Batch {
        /// Function name (see `list`)
        function: ScalarFunction,
        /// Separator between the arguments of a line
        #[arg(long, default_value = "\t")]
        delimiter: String,
        /// Rows evaluated per arena lifecycle
        #[arg(long, default_value = "1024")]
        batch_size: usize,
    },
    /// List available functions
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_chunk_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if !(1..=MAX_CHUNK_SIZE).contains(&size) {
        return Err(format!("must be between 1 and {MAX_CHUNK_SIZE}"));
    }
    Ok(size)
}

/// Text representation of raw bytes on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Encoding {
    /// Bytes as-is; output must be valid UTF-8
    Utf8,
    /// Lowercase hexadecimal
    Hex,
    /// Standard padded base64
    Base64,
}

impl Encoding {
    fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Hex => hex::decode(text).with_context(|| format!("invalid hex argument: {text:?}")),
            Self::Base64 => BASE64
                .decode(text)
                .with_context(|| format!("invalid base64 argument: {text:?}")),
        }
    }

    fn encode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec())
                .context("result is not valid UTF-8, use --output-encoding hex or base64"),
            Self::Hex => Ok(hex::encode(bytes)),
            Self::Base64 => Ok(BASE64.encode(bytes)),
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Argument and result conventions shared by every command.
struct Codec<'a> {
    input: Encoding,
    output: Encoding,
    null_literal: &'a str,
}

impl Codec<'_> {
    fn parse_args<S: AsRef<str>>(&self, raw: &[S]) -> Result<Vec<Option<Vec<u8>>>> {
        raw.iter()
            .map(|arg| {
                let arg = arg.as_ref();
                if arg == self.null_literal {
                    Ok(None)
                } else {
                    self.input.decode(arg).map(Some)
                }
            })
            .collect()
    }

    fn format_result(&self, result: Option<&Bytes>) -> Result<String> {
        match result {
            Some(bytes) => self.output.encode(bytes),
            None => Ok(self.null_literal.to_string()),
        }
    }
}

fn as_buffers(args: &[Option<Vec<u8>>]) -> Vec<ByteBuffer<'_>> {
    args.iter().map(|arg| ByteBuffer::from(arg.as_deref())).collect()
}

#[derive(Serialize)]
struct FunctionInfo {
    name: &'static str,
    arity: Arity,
    description: &'static str,
}

// ============================================================================
// Commands
// ============================================================================

fn call(
    codec: &Codec<'_>,
    arena: &mut RowArena,
    function: ScalarFunction,
    raw_args: &[String],
) -> Result<String> {
    let args = codec.parse_args(raw_args)?;
    let result = function
        .invoke(arena, &as_buffers(&args))
        .with_context(|| format!("failed to call {function}"))?;
    codec.format_result(result.as_ref())
}

fn run_batch<R: BufRead, W: Write>(
    codec: &Codec<'_>,
    arena: &mut RowArena,
    function: ScalarFunction,
    delimiter: &str,
    batch_size: usize,
    input: R,
    output: &mut W,
) -> Result<usize> {
    if batch_size == 0 {
        bail!("--batch-size must be at least 1");
    }
    if delimiter.is_empty() {
        bail!("--delimiter must not be empty");
    }

    let mut rows = Vec::with_capacity(batch_size);
    let mut total = 0;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let fields: Vec<&str> = line.split(delimiter).collect();
        rows.push(codec.parse_args(&fields)?);

        if rows.len() == batch_size {
            total += flush_batch(codec, arena, function, &rows, output)?;
            rows.clear();
        }
    }
    if !rows.is_empty() {
        total += flush_batch(codec, arena, function, &rows, output)?;
    }

    Ok(total)
}

/// Transposes `rows` into columns, evaluates them and writes one line per row.
fn flush_batch<W: Write>(
    codec: &Codec<'_>,
    arena: &mut RowArena,
    function: ScalarFunction,
    rows: &[Vec<Option<Vec<u8>>>],
    output: &mut W,
) -> Result<usize> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let columns: Vec<Vec<ByteBuffer<'_>>> = (0..width)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|arg| ByteBuffer::from(arg.as_deref()))
                .collect()
        })
        .collect();
    let column_refs: Vec<&[ByteBuffer<'_>]> = columns.iter().map(Vec::as_slice).collect();

    let results = function
        .evaluate(arena, rows.len(), &column_refs)
        .with_context(|| format!("failed to evaluate {function} over {} row(s)", rows.len()))?;

    for result in &results {
        writeln!(output, "{}", codec.format_result(result.as_ref())?)?;
    }

    tracing::debug!(
        rows = rows.len(),
        arena_bytes = arena.allocated_bytes(),
        chunk_size = arena.config().chunk_size,
        "batch evaluated"
    );
    arena.reset();

    Ok(results.len())
}

fn list(json: bool) -> Result<String> {
    let functions: Vec<FunctionInfo> = ScalarFunction::ALL
        .into_iter()
        .map(|function| FunctionInfo {
            name: function.name(),
            arity: function.arity(),
            description: function.description(),
        })
        .collect();

    if json {
        return serde_json::to_string_pretty(&functions).context("failed to serialize listing");
    }

    let lines: Vec<String> = functions
        .iter()
        .map(|f| format!("{:<12} {:>13} arg(s)  {}", f.name, f.arity.to_string(), f.description))
        .collect();
    Ok(lines.join("\n"))
}

// ============================================================================
// Main
// ============================================================================

fn run<R: BufRead, W: Write>(cli: Cli, input: R, output: &mut W) -> Result<()> {
    let codec = Codec {
        input: cli.input_encoding,
        output: cli.output_encoding,
        null_literal: &cli.null_literal,
    };
    let mut arena = RowArena::with_config(ArenaConfig {
        chunk_size: cli.arena_chunk_size,
    });

    match cli.command {
        Commands::Call { function, args } => {
            writeln!(output, "{}", call(&codec, &mut arena, function, &args)?)?;
        }
        Commands::Batch {
            function,
            delimiter,
            batch_size,
        } => {
            let rows = run_batch(
                &codec,
                &mut arena,
                function,
                &delimiter,
                batch_size,
                input,
                output,
            )?;
            tracing::info!(rows, "batch complete");
        }
        Commands::List { json } => {
            writeln!(output, "{}", list(json)?)?;
        }
    }

    output.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(cli, stdin.lock(), &mut stdout.lock())
}
