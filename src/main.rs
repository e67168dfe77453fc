use clap::Parser;
use std::process;

#[derive(Parser)]
#[command(name = "mlogc")]
#[command(about = "Compile a script file to Mindustry logic assembly", long_about = None)]
struct Cli {
    /// Path to the script file to compile.
    file: String,
}

fn main() {
    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {}", cli.file, e);
            process::exit(1);
        }
    };

    let lines: Vec<&str> = source.lines().collect();
    match mlogc::compile(&lines) {
        Ok(instructions) => {
            for instruction in instructions {
                println!("{instruction}");
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
