//! fmoread CLI
//!
//! Show how ABINIT-MP CPF and LOG files split into fields.

use std::io::{self, BufWriter, Write};

use fmoread::commands::{fields_file, lex_file, ScanOptions};
use fmoread::CliError;

fn main() {
    fmoread::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "lex" => run(&args[2..], |path, options, out| lex_file(path, options, out)),
        "fields" => run(&args[2..], |path, options, out| {
            fields_file(path, options, out)
        }),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("fmoread {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        if e.is_usage() {
            eprintln!("Usage: fmoread {command} <file> [--format=cpf|log] [options]");
        }
        std::process::exit(1);
    }
}

/// Parse the command's arguments and run it with buffered stdout.
fn run<F>(args: &[String], command: F) -> Result<(), CliError>
where
    F: FnOnce(&str, &ScanOptions, &mut BufWriter<io::StdoutLock<'static>>) -> Result<(), CliError>,
{
    let (path, options) = ScanOptions::parse(args)?;
    let mut out = BufWriter::new(io::stdout().lock());
    command(&path, &options, &mut out)?;
    out.flush()?;
    Ok(())
}

fn print_usage() {
    println!("fmoread - split ABINIT-MP output files into fields");
    println!();
    println!("Usage: fmoread <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>       List every token: kind, byte span, row:col");
    println!("  fields <file>    Print row, col and escaped text per field");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --format=<cpf|log>    Force the format (default: extension, then content)");
    println!("  --na=<a,b,...>        NA sentinels (default: -; empty for none)");
    println!("  --time-limit=<ms>     Stop tokenizing after this many milliseconds");
    println!("  --poll-interval=<n>   How often the time limit is checked");
    println!();
    println!("Examples:");
    println!("  fmoread fields water.cpf");
    println!("  fmoread lex run.out --format=log");
    println!("  RUST_LOG=fmo_lexer=trace fmoread lex water.cpf");
}
