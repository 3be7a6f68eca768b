//! Terminal output for roster pages, profiles, companies and notices.

use colored::{ColoredString, Colorize};
use fleetdesk_lib::{
    Error,
    fleet::{Company, CompanyDetails},
    roster::{DriverRecord, DriverStatus, Remark, RosterPage, RosterQuery, SortColumn, StatusFilter},
    session::{DriverDashboard, Notice, NoticeLevel},
};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Roster table columns with their headers and widths.
const COLUMNS: [(SortColumn, &str, usize); 6] = [
    (SortColumn::Id, "ID", 5),
    (SortColumn::Name, "Name", 12),
    (SortColumn::Company, "Company", 17),
    (SortColumn::LicenseNumber, "License", 10),
    (SortColumn::Status, "Status", 10),
    (SortColumn::PerformanceRating, "Rating", 7),
];

pub fn notice(notice: &Notice) {
    let tag = match notice.level {
        NoticeLevel::Info => "info".blue(),
        NoticeLevel::Success => "ok".green(),
        NoticeLevel::Error => "error".red(),
    };
    println!("{} {notice}", tag.bold());
}

pub fn error(e: &Error) {
    eprintln!("{} {e}", "error:".red().bold());
}

pub fn page(page: &RosterPage<'_>, query: &RosterQuery) {
    let header: String = COLUMNS
        .iter()
        .map(|(column, label, width)| {
            let label = format!("{label}{}", query.sort.indicator(*column).unwrap_or_default());
            format!("{label:<width$}")
        })
        .collect();
    println!("{}", header.bold());

    for driver in &page.drivers {
        println!(
            "{:<5}{:<12}{:<17}{:<10}{}{:.1}",
            driver.id().to_string(),
            driver.name(),
            driver.company(),
            driver.license_number(),
            status(driver.status(), 10),
            driver.performance_rating(),
        );
    }

    if page.drivers.is_empty() {
        println!("{}", "No drivers found".dimmed());
    }

    let mut footer = format!(
        "Page {} of {} ({} drivers",
        page.page, page.total_pages, page.total_count
    );
    if query.status_filter != StatusFilter::All {
        footer.push_str(&format!(", {}", query.status_filter));
    }
    if !query.search_term.is_empty() {
        footer.push_str(&format!(", matching \"{}\"", query.search_term));
    }
    footer.push(')');
    println!("{}", footer.dimmed());

    let hints: Vec<&str> = [(page.has_previous(), "prev"), (page.has_next(), "next")]
        .into_iter()
        .filter_map(|(shown, hint)| shown.then_some(hint))
        .collect();
    if !hints.is_empty() {
        println!("{}", format!("More pages: {}", hints.join(", ")).dimmed());
    }
}

pub fn profile(driver: &DriverRecord, remarks: &[Remark]) {
    println!("{} ({})", driver.name().bold(), driver.initials());
    println!("  ID:          {}", driver.id());
    println!("  Company:     {}", driver.company());
    println!("  License:     {}", driver.license_number());
    println!("  Status:      {}", status(driver.status(), 0));
    println!("  Email:       {}", driver.email());
    println!("  Phone:       {}", driver.phone());
    println!("  Address:     {}", driver.address());
    println!("  Hired:       {}", driver.hire_date());
    println!("  Rating:      {:.1}", driver.performance_rating());
    println!("  Photo:       {}", driver.profile_photo());

    println!("{}", "Remarks".bold());
    self::remarks(remarks);
}

pub fn companies(companies: &[Company]) {
    println!("{}", format!("{:<4}{:<18}{}", "ID", "Name", "Location").bold());
    for company in companies {
        println!(
            "{:<4}{:<18}{}",
            company.id.to_string(),
            company.name,
            company.location
        );
    }

    if companies.is_empty() {
        println!("{}", "No companies found".dimmed());
    }
}

pub fn company(details: &CompanyDetails) {
    let company = details.company();
    println!("{} ({})", company.name.bold(), company.location);
    println!(
        "{}",
        format!(
            "{:<8}{:<7}{:<11}{:<11}{:<15}{}",
            "Car ID", "Model", "Driver", "Service", "Insure due", "Condition"
        )
        .bold()
    );

    for car in details.cars() {
        let condition = if car.is_broken_down() {
            "Broken down".red()
        } else {
            "Operational".green()
        };
        println!(
            "{:<8}{:<7}{:<11}{:<11}{:<15}{condition}",
            car.id().to_string(),
            car.model().to_string(),
            car.driver(),
            car.service().to_string(),
            car.insure_due_date().to_string(),
        );
    }
}

pub fn dashboard(dashboard: &DriverDashboard<'_>) {
    match dashboard.driver {
        Some(driver) => println!("{} ({})", driver.name().bold(), driver.company()),
        None => println!("{}", "Unknown driver".bold()),
    }

    println!(
        "  Shift left:  {} ({:.0}% done)",
        dashboard.shift,
        dashboard.shift.progress_percent()
    );
    println!(
        "  Car:         {}",
        if dashboard.car_broken_down {
            "Broken down".red()
        } else {
            "Operational".green()
        }
    );

    println!("{}", "Recent remarks".bold());
    remarks(dashboard.recent_remarks);
}

fn remarks(remarks: &[Remark]) {
    if remarks.is_empty() {
        println!("  {}", "None".dimmed());
    }

    for remark in remarks {
        println!(
            "  {} {}",
            remark.date().format(DATE_FORMAT).to_string().dimmed(),
            remark.text()
        );
    }
}

/// A driver status, padded to `width` before colouring so table columns line up.
fn status(status: DriverStatus, width: usize) -> ColoredString {
    let text = format!("{:<width$}", status.to_string());
    match status {
        DriverStatus::Active => text.green(),
        DriverStatus::Inactive => text.red(),
    }
}
