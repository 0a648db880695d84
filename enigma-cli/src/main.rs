//! A command-line interface for the Enigma rotor cipher machine.

use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use enigma_core::catalog::{MachineDescriptor, RotorVariant};
use enigma_core::session_key;
use log::{error, info};
use sha2::{Digest, Sha256};

mod session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Convert the messages in input.txt\nenigma-cli run --config demos/standard.json input.txt\n\n# Convert standard input, tracing every character\nenigma-cli run --config demos/standard.json --verbose\n\n# Generate a random setting line with 10 plugboard pairs\nenigma-cli keygen --config demos/standard.json --pairs 10\n\n# Show the catalog and its fingerprint\nenigma-cli inspect --config demos/standard.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert messages through a configured machine
    Run {
        /// Path to the machine configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Input message file; standard input when omitted
        #[arg()]
        input: Option<PathBuf>,

        /// Output file; standard output when omitted
        #[arg()]
        output: Option<PathBuf>,

        /// Trace every converted character to stderr
        #[arg(long)]
        verbose: bool,
    },
    /// Generate a random setting line for a configuration
    Keygen {
        /// Path to the machine configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Number of plugboard pairs to include
        #[arg(long, default_value_t = 0)]
        pairs: usize,
    },
    /// Summarize a configuration and print its fingerprint
    Inspect {
        /// Path to the machine configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Run {
            config,
            input,
            output,
            verbose,
        } => {
            let descriptor = MachineDescriptor::load(config)?;
            let mut machine = descriptor.build()?;
            info!(
                "machine ready: {} slots, {} pawls, {} rotors in catalog",
                machine.num_rotors(),
                machine.num_pawls(),
                descriptor.rotors.len()
            );
            if *verbose {
                machine.set_observer(Box::new(session::StderrTrace));
            }
            let reader: Box<dyn BufRead> = match input {
                Some(path) => Box::new(BufReader::new(File::open(path)?)),
                None => Box::new(BufReader::new(io::stdin())),
            };
            let mut writer: Box<dyn Write> = match output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout()),
            };
            session::process(&mut machine, reader, &mut writer)?;
            writer.flush()?;
            Ok(())
        }
        Commands::Keygen { config, pairs } => {
            let descriptor = MachineDescriptor::load(config)?;
            let key = session_key::random_session_key(&descriptor, *pairs)?;
            if key.plugboard.is_empty() {
                println!("* {} {}", key.rotors.join(" "), key.setting);
            } else {
                println!("* {} {} {}", key.rotors.join(" "), key.setting, key.plugboard);
            }
            Ok(())
        }
        Commands::Inspect { config } => {
            let bytes = fs::read(config)?;
            let descriptor = MachineDescriptor::from_json(std::str::from_utf8(&bytes)?)?;
            let digest = Sha256::digest(&bytes);

            println!("Configuration: {}", config.display());
            println!("{:-<40}", "");
            println!("Alphabet size: {}", descriptor.alphabet.chars().count());
            println!(
                "Rotor slots:   {} ({} pawls)",
                descriptor.rotor_slots, descriptor.pawls
            );
            println!("Rotors:");
            for rotor in &descriptor.rotors {
                let variant = match rotor.variant {
                    RotorVariant::Moving => "moving",
                    RotorVariant::Fixed => "fixed",
                    RotorVariant::Reflector => "reflector",
                };
                if rotor.notches.is_empty() {
                    println!("  {:<12} {variant}", rotor.name);
                } else {
                    println!("  {:<12} {variant} (notches {})", rotor.name, rotor.notches);
                }
            }
            println!("SHA-256: {digest:x}");
            Ok(())
        }
    }
}
