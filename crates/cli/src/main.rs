use std::process::ExitCode;

fn main() -> ExitCode {
    rosco_cli::run()
}
