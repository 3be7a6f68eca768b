use clap::Subcommand;
use fleetdesk_lib::{Result, Session, fleet::CompanyId};

use crate::render;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List companies
    List {
        /// Only list companies whose name or location contains this
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show a company's vehicles
    Show { id: CompanyId },
}

pub fn handle(session: &mut Session, cmd: &Command) -> Result<()> {
    match cmd {
        Command::List { search } => render::companies(&session.search_companies(search)?),
        Command::Show { id } => {
            render::company(session.open_company(*id)?);
        }
    }

    Ok(())
}
