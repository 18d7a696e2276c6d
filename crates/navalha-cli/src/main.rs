fn main() {
    if let Err(error) = navalha_cli::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
