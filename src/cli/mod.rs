use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CrackConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recover the password of a ZipCrypto-protected archive.
    #[command(alias = "c")]
    Crack {
        /// The encrypted ZIP archive.
        archive: PathBuf,

        #[command(flatten)]
        search: SearchOpts,

        /// Number of worker threads. [0 = one per logical core]
        #[arg(long, default_value_t = 0)]
        threads: usize,

        /// Emit progress snapshots as JSON lines on stdout instead of the
        /// interactive status line.
        #[arg(long)]
        json: bool,
    },

    /// Test a single password against the archive.
    #[command(alias = "t")]
    Test {
        /// The encrypted ZIP archive.
        archive: PathBuf,

        /// The password to test.
        password: String,
    },

    /// Print the number of candidates the configured search would try.
    #[command(alias = "e")]
    Estimate {
        #[command(flatten)]
        search: SearchOpts,
    },

    /// List the entries of an archive without attacking it.
    #[command(alias = "l")]
    List {
        /// The ZIP archive to inspect.
        archive: PathBuf,
    },
}

/// Search-space options shared by `crack` and `estimate`.
#[derive(clap::Args, Debug)]
pub struct SearchOpts {
    /// Minimum password length for brute force.
    #[arg(long, default_value_t = 1)]
    pub min: usize,

    /// Maximum password length for brute force.
    #[arg(long, default_value_t = 8)]
    pub max: usize,

    /// Include lowercase letters a-z.
    #[arg(long)]
    pub lowercase: bool,

    /// Include uppercase letters A-Z.
    #[arg(long)]
    pub uppercase: bool,

    /// Include digits 0-9.
    #[arg(long)]
    pub numbers: bool,

    /// Include the 32 ASCII punctuation symbols.
    #[arg(long)]
    pub symbols: bool,

    /// Try the embedded common-password corpus before brute force.
    #[arg(long)]
    pub dictionary: bool,

    /// File with extra candidate words, one per line, tried before
    /// everything else.
    #[arg(long)]
    pub words: Option<PathBuf>,
}

impl SearchOpts {
    /// Resolve the options into an engine configuration, reading the
    /// custom-words file if one was given.
    pub fn into_config(self) -> io::Result<CrackConfig> {
        let custom_words = match &self.words {
            Some(path) => crate::dictionary::load_words(path)?,
            None => Vec::new(),
        };
        Ok(CrackConfig {
            min_length: self.min,
            max_length: self.max,
            use_lowercase: self.lowercase,
            use_uppercase: self.uppercase,
            use_numbers: self.numbers,
            use_symbols: self.symbols,
            use_dictionary: self.dictionary,
            custom_words,
        })
    }
}

/// Parse command-line arguments and return the command to execute.
pub fn run() -> Result<Commands, Box<dyn std::error::Error>> {
    let args = Args::parse();
    Ok(args.command)
}
