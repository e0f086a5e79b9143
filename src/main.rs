use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    timetabler::runner::run()
}
