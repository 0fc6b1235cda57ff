use nexus_cli::settings::init_tracing;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = nexus_cli::command().get_matches();
    init_tracing(matches.get_count("verbose"), matches.get_flag("log-json"));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match nexus_cli::run(&matches, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
