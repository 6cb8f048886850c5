use resort_ledger::{
    cli::{output, run_cli},
    init,
};

fn main() {
    init();

    if let Err(err) = run_cli() {
        if err.is_recoverable() {
            output::warning(format!("Error: {err}"));
        } else {
            output::error(format!("Error: {err}"));
        }
        std::process::exit(1);
    }
}
