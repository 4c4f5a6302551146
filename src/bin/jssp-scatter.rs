use std::process::ExitCode;

fn main() -> ExitCode {
    jssp_charts::cli::scatter_main(std::env::args_os())
}
