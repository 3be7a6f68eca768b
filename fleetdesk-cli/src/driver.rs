use clap::{Args, Subcommand};
use fleetdesk_lib::{
    Result, Session,
    config::CoreConfig,
    roster::{self, DriverId, RosterQuery, SortColumn, SortDirection, StatusFilter},
};

use crate::render;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List drivers, one page at a time
    List(ListArgs),
    /// Show a driver's profile
    Show { id: DriverId },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ListArgs {
    /// Only list drivers whose name contains this
    #[arg(long, default_value = "")]
    search: String,
    /// Only list drivers with this status (all, active or inactive)
    #[arg(long)]
    status: Option<StatusFilter>,
    /// Column to sort by, e.g. `name` or `performanceRating`
    #[arg(long)]
    sort: Option<SortColumn>,
    /// Sort in descending order
    #[arg(long)]
    desc: bool,
    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,
}

impl ListArgs {
    /// The query these arguments describe, on top of the configured defaults.
    fn query(&self, cfg: &CoreConfig) -> RosterQuery {
        let mut query = RosterQuery::new(cfg.roster.sort, cfg.roster.status_filter);

        if let Some(column) = self.sort {
            query.sort.column = column;
            query.sort.direction = SortDirection::Ascending;
        }
        if self.desc {
            query.sort.direction = SortDirection::Descending;
        }
        if let Some(status) = self.status {
            query.status_filter = status;
        }
        query.search_term = self.search.clone();
        query.page = self.page;

        query
    }
}

pub fn handle(session: &Session, cfg: &CoreConfig, cmd: &Command) -> Result<()> {
    let drivers = session.roster()?;

    match cmd {
        Command::List(args) => {
            let mut query = args.query(cfg);
            query.clamp_page(drivers.query(&query).total_pages);

            render::page(&drivers.query(&query), &query);
        }
        Command::Show { id } => {
            let driver = drivers.get(*id).ok_or(roster::Error::NotFound(*id))?;

            render::profile(driver, drivers.remarks(*id));
        }
    }

    Ok(())
}
