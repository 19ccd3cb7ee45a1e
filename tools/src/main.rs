//! impactbridge: command-line front end for the triage core.
//!
//! Usage:
//!   impactbridge [--db PATH] [--config PATH] <command> [args]
//!
//! Commands:
//!   migrate
//!   report-case --title T --description D --severity N --people N
//!               --urgency N --resources N --skill S
//!   list-cases [--page N]
//!   show-case ID
//!   set-status ID pending|active|completed
//!   assess-case ID --severity N --people N --urgency N --resources N
//!   register-volunteer --name N --skills S [--contact C]
//!   list-volunteers
//!   show-volunteer ID
//!   search-volunteers SKILL
//!   set-availability ID true|false
//!   stats
//!
//! Every command prints JSON on stdout.

use anyhow::{anyhow, bail, Context, Result};
use impactbridge_core::{
    case_store::{CaseStore, NewCase},
    config::TriageConfig,
    scoring::ScoreInputs,
    store::TriageStore,
    validation::{validate_case_report, validate_volunteer_registration},
    volunteer_store::{NewVolunteer, VolunteerStore},
};
use serde::Serialize;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = match flag(&args, "--config") {
        Some(path) => TriageConfig::load(path)?,
        None => TriageConfig::from_env()?,
    };
    if let Some(db) = flag(&args, "--db") {
        config.database_path = db.to_string();
    }

    let positional = positionals(&args);
    let Some((command, rest)) = positional.split_first() else {
        bail!("missing command (migrate, report-case, list-cases, show-case, set-status, assess-case, register-volunteer, list-volunteers, show-volunteer, search-volunteers, set-availability, stats)");
    };

    let store = TriageStore::open_migrated(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path))?;
    log::debug!("command={command} db={}", config.database_path);

    run(command, rest, &args, &config, &store)
}

fn run(
    command: &str,
    rest: &[&str],
    args: &[String],
    config: &TriageConfig,
    store: &TriageStore,
) -> Result<()> {
    let cases = CaseStore::new(store);
    let volunteers = VolunteerStore::new(store);

    match command {
        "migrate" => {
            let repaired = store.recompute_priority_scores()?;
            emit(&serde_json::json!({
                "migrated": true,
                "repaired_scores": repaired,
                "cases": store.case_count()?,
                "volunteers": store.volunteer_count()?,
            }))
        }
        "report-case" => {
            let report = NewCase {
                title:               required(args, "--title")?.to_string(),
                description:         required(args, "--description")?.to_string(),
                severity:            number(args, "--severity")?,
                people_affected:     number(args, "--people")?,
                urgency:             number(args, "--urgency")?,
                available_resources: number(args, "--resources")?,
                required_skill:      required(args, "--skill")?.to_string(),
            };
            let report = validate_case_report(&report, &config.limits)?;
            emit(&cases.create(report)?)
        }
        "list-cases" => match flag(args, "--page") {
            Some(page) => {
                let page: usize = page.parse().with_context(|| format!("bad page '{page}'"))?;
                emit(&cases.list_page(page, config.cases_per_page)?)
            }
            None => emit(&cases.list_all()?),
        },
        "show-case" => emit(&cases.get(id_arg(rest, 0)?)?),
        "set-status" => {
            let id = id_arg(rest, 0)?;
            let status = rest.get(1).ok_or_else(|| anyhow!("missing status"))?;
            emit(&cases.update_status(id, status)?)
        }
        "assess-case" => {
            let inputs = ScoreInputs {
                severity:            number(args, "--severity")?,
                people_affected:     number(args, "--people")?,
                urgency:             number(args, "--urgency")?,
                available_resources: number(args, "--resources")?,
            };
            emit(&cases.update_assessment(id_arg(rest, 0)?, inputs)?)
        }
        "register-volunteer" => {
            let registration = NewVolunteer {
                name:    required(args, "--name")?.to_string(),
                contact: flag(args, "--contact").map(str::to_string),
                skills:  required(args, "--skills")?.to_string(),
            };
            let registration = validate_volunteer_registration(&registration, &config.limits)?;
            emit(&volunteers.register(registration)?)
        }
        "list-volunteers" => emit(&volunteers.list_all()?),
        "show-volunteer" => emit(&volunteers.get(id_arg(rest, 0)?)?),
        "search-volunteers" => {
            let skill = rest.first().ok_or_else(|| anyhow!("missing skill"))?;
            emit(&volunteers.search_by_skill(skill)?)
        }
        "set-availability" => {
            let id = id_arg(rest, 0)?;
            let available = match rest.get(1).copied() {
                Some("true") | Some("yes") | Some("1") => true,
                Some("false") | Some("no") | Some("0") => false,
                Some(other) => bail!("availability must be true or false, got '{other}'"),
                None => bail!("missing availability"),
            };
            emit(&volunteers.set_availability(id, available)?)
        }
        "stats" => emit(&store.dashboard_stats(config.high_priority_threshold)?),
        other => bail!("unknown command '{other}'"),
    }
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Argument helpers ─────────────────────────────────────────────────────────

/// Value following `name`, if present.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn required<'a>(args: &'a [String], name: &str) -> Result<&'a str> {
    flag(args, name).ok_or_else(|| anyhow!("missing {name}"))
}

fn number(args: &[String], name: &str) -> Result<i64> {
    let raw = required(args, name)?;
    raw.trim()
        .parse()
        .with_context(|| format!("{name} must be a whole number, got '{raw}'"))
}

/// Arguments that are neither `--flags` nor flag values.
/// Every flag takes exactly one value.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn id_arg(rest: &[&str], index: usize) -> Result<i64> {
    let raw = rest.get(index).ok_or_else(|| anyhow!("missing id"))?;
    raw.parse().with_context(|| format!("bad id '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn positionals_skip_flag_values() {
        let args = argv("--db run.db set-status 3 active --config cfg.json");
        assert_eq!(positionals(&args), vec!["set-status", "3", "active"]);
        assert_eq!(flag(&args, "--db"), Some("run.db"));
    }

    #[test]
    fn number_reports_bad_input() {
        let args = argv("--severity high");
        assert!(number(&args, "--severity").is_err());
        assert!(number(&args, "--urgency").is_err());
        assert_eq!(number(&argv("--urgency 4"), "--urgency").unwrap(), 4);
    }
}
