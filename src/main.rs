use powertier::cli::{exit_code, format_error, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{}", format_error(&e));
        std::process::exit(exit_code(&e));
    }
}
