fn main() {
    if let Err(err) = airport_diagram::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
