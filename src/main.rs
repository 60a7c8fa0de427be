fn main() {
    if let Err(e) = intake_lib::run() {
        eprintln!("intake: {e}");
        std::process::exit(1);
    }
}
