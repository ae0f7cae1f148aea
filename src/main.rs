use notistack::cli::{self, Command};
use notistack::Lifecycle::ExitOutcome;
use notistack::{app, logging};

fn main() {
    logging::init();

    let code = match cli::parse(std::env::args_os().skip(1).collect()) {
        Ok(Command::Version) => {
            println!("notistack {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Ok(Command::Show(options)) => match app::run(options) {
            Ok(outcome) => outcome.exit_code(),
            Err(e) => {
                eprintln!("notistack: {}", e);
                ExitOutcome::Fail.exit_code()
            }
        },
        Err(e) => {
            eprintln!("{}", e);
            ExitOutcome::Fail.exit_code()
        }
    };

    std::process::exit(code);
}
