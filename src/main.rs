use std::process::ExitCode;

use to_trash::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let (args, dropped) = match to_trash::cli::parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let failed = e.use_stderr();
            let _ = e.print();
            return if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match app::run(args, &dropped) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
