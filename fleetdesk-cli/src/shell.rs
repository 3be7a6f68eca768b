//! Interactive session: one live roster, one command per line.

use std::{
    io::{self, BufRead, Write},
    path::Path,
    str::FromStr,
    time::{Duration, Instant},
};

use clap::{Parser, Subcommand};
use colored::Colorize;
use fleetdesk_lib::{
    Result, Roster, Session,
    config::Cfg,
    fleet::{CarId, CompanyId},
    roster::{self, DriverId, RosterQuery, SortColumn, StatusFilter},
    session::{FleetUpload, Role},
};

use crate::render;

const PROMPT: &str = "fleetdesk> ";

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum ShellCommand {
    /// Show the current page of drivers
    #[command(alias = "ls")]
    List,
    /// Show a driver's profile and remarks
    Show { id: DriverId },
    /// Switch a driver between active and inactive
    Toggle { id: DriverId },
    /// Add a remark to a driver
    Remark {
        id: DriverId,
        #[arg(default_value = "", allow_hyphen_values = true)]
        text: String,
    },
    /// Ask to remove a driver. The removal happens once it is confirmed
    Remove { id: DriverId },
    /// Confirm the pending removal with the administrator password
    Confirm {
        #[arg(allow_hyphen_values = true)]
        password: String,
    },
    /// Forget the pending removal
    Cancel,
    /// Sort by a column, or flip the direction when already sorted by it
    Sort { column: SortColumn },
    /// Only show drivers with this status (all, active or inactive)
    Filter { status: StatusFilter },
    /// Search driver names. Without a term the search is cleared
    Search {
        #[arg(default_value = "", allow_hyphen_values = true)]
        term: String,
    },
    /// Go to a page: a number, `next` or `prev`
    Page { target: PageTarget },
    /// List companies, optionally searching names and locations
    Companies {
        #[arg(default_value = "", allow_hyphen_values = true)]
        term: String,
    },
    /// Open a company's vehicles
    Company { id: CompanyId },
    /// Switch a car of the open company between broken down and operational
    Breakdown { car: CarId },
    /// Show the driver dashboard
    Dashboard,
    /// Take minutes off the shift clock
    Tick {
        #[arg(default_value_t = 1)]
        minutes: u32,
    },
    /// Log out and leave
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageTarget {
    Number(usize),
    Next,
    Previous,
}

impl FromStr for PageTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "next" | "n" => Ok(Self::Next),
            "prev" | "previous" | "p" => Ok(Self::Previous),
            _ => s
                .parse()
                .map(Self::Number)
                .map_err(|_| format!("expected a page number, `next` or `prev`, got `{s}`")),
        }
    }
}

/// What to do after a command has run.
enum Flow {
    Continue,
    Quit,
}

/// Split a line into the words clap sees. Commands that take free text get the rest of the line
/// as a single word, so remarks and passwords keep their spacing.
fn words(line: &str) -> Vec<&str> {
    let (command, mut rest) = split_word(line);
    let leading = match command {
        "remark" => 1,
        "confirm" | "search" | "companies" => 0,
        _ => return line.split_whitespace().collect(),
    };

    let mut words = vec![command];
    for _ in 0..leading {
        let (word, tail) = split_word(rest);
        if word.is_empty() {
            break;
        }
        words.push(word);
        rest = tail;
    }

    let rest = rest.trim_start();
    if !rest.is_empty() {
        words.push(rest);
    }

    words
}

/// The first word of `s` and everything after the whitespace that ends it.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    s.split_once(char::is_whitespace).unwrap_or((s, ""))
}

/// Run the shell until stdin closes or the user quits. Sort and filter changes are remembered in
/// `cfg`, which is written back to `path` on the way out.
pub fn run(cfg: Cfg, path: &Path, role: Role, seed: Option<u64>) -> io::Result<()> {
    let (mut session, welcome) = Session::login(role, &cfg.read(), seed);
    render::notice(&welcome);

    let mut query = {
        let cfg = cfg.read();
        RosterQuery::new(cfg.roster.sort, cfg.roster.status_filter)
    };
    let mut lines = io::stdin().lock().lines();

    // The shift clock follows wall-clock time between commands
    let mut last = Instant::now();
    let mut carry = Duration::ZERO;

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        let now = Instant::now();
        carry = session.catch_up_shift(carry.saturating_add(now.duration_since(last)));
        last = now;

        let words = words(&line);
        if words.is_empty() {
            continue;
        }

        let command = match Line::try_parse_from(words) {
            Ok(line) => line.command,
            Err(e) => {
                e.print()?;
                continue;
            }
        };

        match execute(&mut session, &mut query, &cfg, command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => render::error(&e),
        }
    }

    let (notice, upload) = session.logout();
    render::notice(&notice);
    if let Some(upload) = upload {
        fleet_upload(&upload, &mut lines)?;
    }

    if let Err(e) = cfg.read().save_to(path) {
        render::error(&e.into());
    }

    Ok(())
}

fn execute(
    session: &mut Session,
    query: &mut RosterQuery,
    cfg: &Cfg,
    command: ShellCommand,
) -> Result<Flow> {
    match command {
        ShellCommand::List => list(session.roster()?, query),
        ShellCommand::Show { id } => {
            let drivers = session.roster()?;
            let driver = drivers.get(id).ok_or(roster::Error::NotFound(id))?;
            render::profile(driver, drivers.remarks(id));
        }
        ShellCommand::Toggle { id } => {
            if let Some(notice) = session.toggle_status(id)? {
                render::notice(&notice);
            }
            clamp(session.roster()?, query);
        }
        ShellCommand::Remark { id, text } => {
            if let Some(notice) = session.add_remark(id, &text)? {
                render::notice(&notice);
            }
        }
        ShellCommand::Remove { id } => {
            if session.request_removal(id)? {
                println!("Enter {} to remove driver {id}", "confirm <password>".bold());
            }
        }
        ShellCommand::Confirm { password } => {
            if let Some(notice) = session.confirm_removal(&password)? {
                render::notice(&notice);
            }
            clamp(session.roster()?, query);
        }
        ShellCommand::Cancel => {
            if let Some(id) = session.cancel_removal()? {
                println!("Driver {id} will not be removed");
            }
        }
        ShellCommand::Sort { column } => {
            let drivers = session.roster()?;
            query.sort_by(column);
            cfg.write().roster.sort = query.sort;
            list(drivers, query);
        }
        ShellCommand::Filter { status } => {
            let drivers = session.roster()?;
            query.filter(status);
            cfg.write().roster.status_filter = status;
            list(drivers, query);
        }
        ShellCommand::Search { term } => {
            let drivers = session.roster()?;
            query.search(term);
            list(drivers, query);
        }
        ShellCommand::Page { target } => {
            let drivers = session.roster()?;
            let total_pages = drivers.query(query).total_pages;
            match target {
                PageTarget::Number(page) => {
                    query.page = page;
                    query.clamp_page(total_pages);
                }
                PageTarget::Next => query.next_page(total_pages),
                PageTarget::Previous => query.previous_page(),
            }
            list(drivers, query);
        }
        ShellCommand::Companies { term } => {
            render::companies(&session.search_companies(&term)?);
        }
        ShellCommand::Company { id } => render::company(session.open_company(id)?),
        ShellCommand::Breakdown { car } => {
            render::notice(&session.toggle_breakdown(car)?);
        }
        ShellCommand::Dashboard => render::dashboard(&session.dashboard()),
        ShellCommand::Tick { minutes } => {
            for _ in 0..minutes {
                if !session.tick_shift() {
                    break;
                }
            }
            println!("Shift left: {}", session.dashboard().shift);
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn list(drivers: &Roster, query: &mut RosterQuery) {
    clamp(drivers, query);
    render::page(&drivers.query(query), query);
}

/// Keep the page in range after the number of matching drivers changed.
fn clamp(drivers: &Roster, query: &mut RosterQuery) {
    let total_pages = drivers.query(query).total_pages;
    query.clamp_page(total_pages);
}

/// Ask a driver who just logged out for a photo of their fleet and how many fleets they got
/// done. Closing stdin skips the upload.
fn fleet_upload(
    upload: &FleetUpload,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
    println!("{}", "Fleet upload".bold());

    loop {
        let Some(image) = ask("Image file: ", lines)? else {
            return Ok(());
        };
        let Some(count) = ask("Number of fleets done: ", lines)? else {
            return Ok(());
        };

        let Ok(fleets_done) = count.trim().parse::<u32>() else {
            eprintln!("{} `{}` is not a number", "error:".red().bold(), count.trim());
            continue;
        };

        match upload.submit(Path::new(image.trim()), fleets_done) {
            Ok(notice) => {
                render::notice(&notice);
                return Ok(());
            }
            Err(e) => render::error(&e.into()),
        }
    }
}

fn ask(
    question: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Option<String>> {
    print!("{question}");
    io::stdout().flush()?;

    lines.next().transpose()
}
