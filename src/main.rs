fn main() {
    if let Err(err) = schematic_placer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
