use std::process::ExitCode;

fn main() -> ExitCode {
    jssp_charts::cli::gantt_main(std::env::args_os())
}
