fn main() {
    if let Err(err) = crmchat::cli::main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
