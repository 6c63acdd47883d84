use std::process::ExitCode;

fn main() -> ExitCode {
    match datashare_blob::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
