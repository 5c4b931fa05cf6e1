use std::process;

fn main() {
    if let Err(e) = machconf::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
