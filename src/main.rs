fn main() {
    if let Err(err) = riskledger::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
