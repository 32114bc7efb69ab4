//! Binary entrypoint for fontpick-cli

fn main() {
    if let Err(err) = fontpick_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
