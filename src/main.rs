use std::process::ExitCode;

fn main() -> ExitCode {
    pydocmd::cli::run()
}
