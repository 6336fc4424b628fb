mod catalog;
mod config;
mod events;
mod matcher;
mod model;
mod nordvpn;
mod notify;
mod recency;
mod state;

use crate::catalog::Catalog;
use crate::config::load_config;
use crate::events::{Event, Reply, Row, Selection};
use crate::matcher::FuzzyRanker;
use crate::nordvpn::NordCli;
use crate::state::AppState;
use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog file to use instead of the built-in country list
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Run a single query and exit
    #[arg(short, long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config()?;
    let catalog_path = args.catalog.or_else(|| config.catalog.clone());
    let catalog = Catalog::load(catalog_path.as_deref())?;
    let cli = NordCli::detect(&config.nordvpn_paths);

    let mut state = AppState::new(config, catalog, FuzzyRanker::obtain(), Box::new(cli));

    if let Some(query) = args.query {
        let reply = state.dispatch(Event::Query(query));
        render(&reply, &mut Vec::new());
        return Ok(());
    }

    repl(&mut state)
}

/// Line-oriented front end standing in for a launcher window: each line is
/// either a launcher-style query, a row number to connect to, or one of
/// the fixed commands.
fn repl(state: &mut AppState) -> Result<()> {
    let stdin = io::stdin();
    let mut rows: Vec<Row> = Vec::new();

    let mut out = io::stdout();
    write!(out, "> ")?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        if line == "quit" || line == "exit" {
            break;
        }

        if let Some(event) = to_event(line, &state.config.keyword, &rows) {
            let reply = state.dispatch(event);
            render(&reply, &mut rows);
        } else {
            println!("no such entry");
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}

fn to_event(line: &str, keyword: &str, rows: &[Row]) -> Option<Event> {
    if let Ok(number) = line.parse::<usize>() {
        let row = rows.get(number.checked_sub(1)?)?;
        return Some(Event::Select(Selection::Country(row.id.clone())));
    }

    if line == "disconnect" {
        return Some(Event::Select(Selection::Disconnect));
    }

    if let Some(rest) = line.strip_prefix("keyword ") {
        return Some(Event::SetKeyword(rest.trim().to_string()));
    }

    // Accept launcher-style input with the keyword in front.
    let argument = match line.strip_prefix(keyword) {
        Some("") => "",
        Some(rest) if rest.starts_with(' ') => rest.trim_start(),
        _ => line,
    };
    Some(Event::Query(argument.to_string()))
}

fn render(reply: &Reply, rows: &mut Vec<Row>) {
    match reply {
        Reply::Menu { keyword } => {
            println!("Connect     type `{keyword} connect <country>` to pick a country");
            println!("Disconnect  type `disconnect`");
        }
        Reply::Candidates(candidates) => {
            if candidates.is_empty() {
                println!("no matching country");
            }
            for (index, row) in candidates.iter().enumerate() {
                println!("{:2}. {}  [{}]", index + 1, row.label, row.icon);
            }
            *rows = candidates.clone();
        }
        Reply::RankingUnavailable => {
            println!("approximate matching is unavailable in this build");
            println!("rebuild with the `fuzzy` feature to search countries");
        }
        Reply::CliMissing => {
            println!("NordVPN CLI not found");
            println!("install the nordvpn client to connect");
        }
        Reply::Done => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, label: &str) -> Row {
        Row {
            id: id.to_string(),
            label: label.to_string(),
            icon: format!("flags/{id}.svg"),
        }
    }

    #[test]
    fn numbers_select_from_the_last_listing() {
        let rows = vec![row("us", "United States"), row("uk", "United Kingdom")];
        let event = to_event("2", "nord", &rows);
        assert!(matches!(
            event,
            Some(Event::Select(Selection::Country(id))) if id == "uk"
        ));
    }

    #[test]
    fn out_of_range_numbers_select_nothing() {
        let rows = vec![row("us", "United States")];
        assert!(to_event("2", "nord", &rows).is_none());
        assert!(to_event("0", "nord", &rows).is_none());
    }

    #[test]
    fn keyword_prefix_is_stripped_from_queries() {
        let event = to_event("nord connect fra", "nord", &[]);
        assert!(matches!(
            event,
            Some(Event::Query(argument)) if argument == "connect fra"
        ));
    }

    #[test]
    fn unrelated_prefix_is_kept() {
        let event = to_event("nordic countries", "nord", &[]);
        assert!(matches!(
            event,
            Some(Event::Query(argument)) if argument == "nordic countries"
        ));
    }

    #[test]
    fn disconnect_line_maps_to_a_selection() {
        assert!(matches!(
            to_event("disconnect", "nord", &[]),
            Some(Event::Select(Selection::Disconnect))
        ));
    }

    #[test]
    fn keyword_line_updates_the_preference() {
        assert!(matches!(
            to_event("keyword vpn", "nord", &[]),
            Some(Event::SetKeyword(keyword)) if keyword == "vpn"
        ));
    }
}
