//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors")]
fn main() {
    if let Err(err) = shuttle_cli::run() {
        eprintln!("shuttle: {err}");
        std::process::exit(1);
    }
}
