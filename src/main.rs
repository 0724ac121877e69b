//! Main entry point for the zipcrack CLI app

use std::fs;
use std::io::{self, Write};
use std::thread;

use crossbeam_channel::Receiver;
use zipcrack::cli::{self, Commands};
use zipcrack::{crack, estimate, test_single, Phase, Snapshot};

fn main() -> std::process::ExitCode {
    if let Err(e) = run_app() {
        if e.downcast_ref::<clap::Error>().is_none() {
            eprintln!("Error: {}", e);
        }
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let command = cli::run()?;

    match command {
        Commands::Crack { archive, search, threads, json } => {
            let bytes = fs::read(&archive)?;
            let config = search.into_config()?;
            let num_workers = if threads == 0 { num_cpus::get() } else { threads };
            if !json {
                eprintln!("Searching with {} worker threads", num_workers);
            }

            let (sender, receiver) = crossbeam_channel::bounded::<Snapshot>(8);
            let printer = thread::spawn(move || {
                if json {
                    print_json_progress(receiver);
                } else {
                    render_progress(receiver);
                }
            });

            // The engine fans out on the installed rayon pool; an explicit
            // --threads builds a dedicated one instead of the global pool.
            let result = if threads == 0 {
                crack(&bytes, &config, sender)
            } else {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?
                    .install(|| crack(&bytes, &config, sender))
            };
            let _ = printer.join();

            let password = result?;
            println!("{}", password);
        }
        Commands::Test { archive, password } => {
            let bytes = fs::read(&archive)?;
            if test_single(&bytes, &password)? {
                println!("password accepted");
            } else {
                println!("password rejected");
                return Err(zipcrack::CrackError::NotFound.into());
            }
        }
        Commands::Estimate { search } => {
            let config = search.into_config()?;
            config.validate()?;
            println!("{}", estimate(&config));
        }
        Commands::List { archive } => {
            let bytes = fs::read(&archive)?;
            for entry in zipcrack::archive::scan_entries(&bytes) {
                let method = match entry.method {
                    0 => "store",
                    8 => "deflate",
                    99 => "aes",
                    _ => "other",
                };
                println!(
                    "{:9} {:8} {:>10} -> {:>10}  {}",
                    if entry.encrypted { "encrypted" } else { "plain" },
                    method,
                    entry.compressed_size,
                    entry.uncompressed_size,
                    entry.name,
                );
            }
        }
    }

    Ok(())
}

/// Drain the observer stream as JSON lines on stdout.
fn print_json_progress(receiver: Receiver<Snapshot>) {
    for snapshot in receiver.iter() {
        if let Ok(line) = serde_json::to_string(&snapshot) {
            println!("{}", line);
        }
    }
}

/// Drain the observer stream into a single overwriting status line on
/// stderr, so stdout carries only the result.
fn render_progress(receiver: Receiver<Snapshot>) {
    let mut prev_len = 0usize;
    let mut printed = false;
    for snapshot in receiver.iter() {
        let line = format!(
            "[{}] {} tried | {:.0}/s | {}s | {}",
            snapshot.phase,
            snapshot.attempts,
            snapshot.passwords_per_second,
            snapshot.elapsed_seconds,
            snapshot.current_password,
        );
        let mut padded = line.clone();
        if prev_len > padded.len() {
            padded.push_str(&" ".repeat(prev_len - padded.len()));
        }
        prev_len = line.len();
        printed = true;
        eprint!("\r\x1B[2K{}", padded);
        io::stderr().flush().ok();

        if matches!(snapshot.phase, Phase::Done | Phase::Error) {
            break;
        }
    }
    if printed {
        eprintln!();
    }
}
