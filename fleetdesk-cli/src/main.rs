use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use colored::Colorize;
use fleetdesk_lib::{
    Error,
    config::{self, CoreConfig},
    roster, session,
    session::{Role, Session},
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod company;
mod driver;
mod render;
mod shell;

#[derive(Parser, Debug)]
#[command(name = "fleetdesk")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Seed for the generated mock data, to get the same drivers every run
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Use this configuration file instead of the default one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Browse the driver roster
    #[command(subcommand)]
    Drivers(driver::Command),
    /// Browse companies and their vehicles
    #[command(subcommand)]
    Companies(company::Command),
    /// Show the driver dashboard
    Dashboard,
    /// Start an interactive session
    Shell {
        /// Who to log in as
        #[arg(short, long, default_value_t = Role::Admin)]
        role: Role,
    },
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    let cli = Cli::parse();

    let path = match &cli.config {
        Some(path) => path.clone(),
        None => match CoreConfig::default_path() {
            Ok(path) => path,
            Err(e) => return fail(&e.into()),
        },
    };
    let cfg = match CoreConfig::load_from(&path) {
        Ok(cfg) => cfg,
        Err(e) => return fail(&e.into()),
    };

    let result = match &cli.command {
        Command::Drivers(cmd) => {
            let (session, _) = Session::login(Role::Admin, &cfg, cli.seed);
            driver::handle(&session, &cfg, cmd)
        }
        Command::Companies(cmd) => {
            let (mut session, _) = Session::login(Role::Admin, &cfg, cli.seed);
            company::handle(&mut session, cmd)
        }
        Command::Dashboard => {
            let (session, _) = Session::login(Role::Driver, &cfg, cli.seed);
            render::dashboard(&session.dashboard());
            Ok(())
        }
        Command::Shell { role } => {
            if let Err(e) = shell::run(cfg.into_handle(), &path, *role, cli.seed) {
                eprintln!("{} {e}", "error:".red().bold());
                return sysexits::ExitCode::IoErr.into();
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(e: &Error) -> ExitCode {
    eprintln!("{} {e}", "error:".red().bold());
    exit_code(e).into()
}

fn exit_code(e: &Error) -> sysexits::ExitCode {
    match e {
        Error::Roster(roster::Error::AuthFailed) | Error::Session(session::Error::Forbidden) => {
            sysexits::ExitCode::NoPerm
        }
        Error::Session(session::Error::MissingImage(_)) => sysexits::ExitCode::NoInput,
        Error::Roster(_) | Error::Fleet(_) | Error::Session(_) => sysexits::ExitCode::DataErr,
        Error::Config(config::Error::Io(_)) => sysexits::ExitCode::IoErr,
        Error::Config(_) => sysexits::ExitCode::Config,
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;
    use fleetdesk_lib::fleet;

    use super::*;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from([
            "fleetdesk",
            "--seed",
            "4",
            "drivers",
            "list",
            "--status",
            "active",
            "--sort",
            "performanceRating",
            "--desc",
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(4));
        assert!(matches!(cli.command, Command::Drivers(driver::Command::List(_))));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&roster::Error::AuthFailed.into()),
            sysexits::ExitCode::NoPerm
        );
        assert_eq!(
            exit_code(&fleet::Error::CarNotFound(fleet::CarId::from(3)).into()),
            sysexits::ExitCode::DataErr
        );
        assert_eq!(
            exit_code(&session::Error::MissingImage(PathBuf::from("fleet.jpg")).into()),
            sysexits::ExitCode::NoInput
        );
    }
}
