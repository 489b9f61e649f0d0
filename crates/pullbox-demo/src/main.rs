#![forbid(unsafe_code)]

fn main() {
    pullbox_demo::init_logging();
    if let Err(error) = pullbox_demo::run_from_env() {
        tracing::error!(exit_code = error.exit_code(), "{error}");
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
