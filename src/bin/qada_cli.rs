use std::{env, process};

use qada_core::{
    cli::output,
    config::ConfigManager,
    core::{
        services::{pending_milestones, required_pace, PaceOutcome, PacePlan, SetupDraft},
        LedgerManager, SystemClock,
    },
    errors::{QadaError, Result},
    init,
    ledger::{format_calendar_date, parse_calendar_date, Prayer},
    storage::JsonStorage,
};

fn main() {
    init();

    if let Err(err) = run() {
        output::error(&err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        process::exit(1);
    };

    if command == "version" {
        print_version();
        return Ok(());
    }

    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    let data_dir = config.resolve_data_dir(config_manager.base_dir());
    let storage = JsonStorage::new(Some(data_dir), Some(config.storage_key.as_str()))?;
    let mut manager = LedgerManager::open(Box::new(storage), Box::new(SystemClock));

    match command.as_str() {
        "setup" => setup(&mut manager, rest, config.default_start_age),
        "show" => show(&mut manager),
        "log" => log(&mut manager, rest),
        "pace" => pace(&manager, rest),
        "goal" => goal(&mut manager, rest),
        "json" => {
            let ledger = require_ledger(&manager)?;
            println!("{}", serde_json::to_string_pretty(ledger)?);
            Ok(())
        }
        "reset" => {
            manager.reset();
            output::success("Ledger erased. Run `setup` to start again.");
            Ok(())
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn setup(manager: &mut LedgerManager, args: &[String], default_start_age: u32) -> Result<()> {
    let counts = args.iter().any(|arg| arg == "--counts");
    let values: Vec<&String> = args.iter().filter(|arg| *arg != "--counts").collect();
    let [birth_date, start_age, per_prayer @ ..] = values.as_slice() else {
        return Err(usage_error());
    };
    if per_prayer.len() != Prayer::ALL.len() {
        return Err(usage_error());
    }
    let start_age = if start_age.trim().is_empty() {
        default_start_age
    } else {
        start_age
            .trim()
            .parse()
            .map_err(|_| QadaError::InvalidInput(format!("start age `{start_age}`")))?
    };

    let today = manager.today();
    let mut draft = SetupDraft::new(default_start_age);
    draft.set_birth_date(birth_date.as_str(), today);
    draft.set_start_age(start_age, today);
    for (prayer, value) in Prayer::ALL.into_iter().zip(per_prayer) {
        if counts {
            draft.edit_count(prayer, value, today);
        } else {
            draft.edit_percent(prayer, value, today);
        }
    }

    let ledger = manager.create(&draft.to_input())?;
    output::success(format!(
        "Ledger created: {} eligible days, {} prayers to make up.",
        ledger.eligible_days,
        ledger.total_debt()
    ));
    Ok(())
}

fn show(manager: &mut LedgerManager) -> Result<()> {
    let summary = manager.progress().ok_or_else(not_set_up)?;
    output::section("Progress");
    output::row("Days", summary.eligible_days);
    output::row("Remaining", summary.total_remaining);
    output::row("Completed", summary.completed);
    output::row("Updated", summary.updated_at.format("%Y-%m-%d %H:%M UTC"));
    for entry in &summary.per_prayer {
        output::row(
            entry.prayer,
            format!(
                "{} of {} ({}% missed)",
                entry.remaining, entry.total, entry.percent_missed
            ),
        );
    }

    let pending = manager.get().map(pending_milestones).unwrap_or_default();
    for milestone in &pending {
        output::success(format!("Milestone reached: {}", milestone.label()));
    }
    if !pending.is_empty() {
        manager.mark_milestones_seen(&pending);
    }
    Ok(())
}

fn log(manager: &mut LedgerManager, args: &[String]) -> Result<()> {
    let [prayer, delta] = args else {
        return Err(usage_error());
    };
    let prayer: Prayer = prayer.parse()?;
    let delta: i64 = delta
        .trim()
        .parse()
        .map_err(|_| QadaError::InvalidInput(format!("delta `{delta}`")))?;
    let ledger = manager
        .apply_delta(prayer, delta)
        .ok_or_else(not_set_up)?;
    output::info(format!("{prayer}: {} remaining", ledger.remaining[prayer]));
    Ok(())
}

fn pace(manager: &LedgerManager, args: &[String]) -> Result<()> {
    let plan = match args {
        [preset] if preset == "one-each" => PacePlan::one_each(),
        values if values.len() == Prayer::ALL.len() => {
            let mut plan = PacePlan::zero_all();
            for (prayer, value) in Prayer::ALL.into_iter().zip(values) {
                plan.set_text(prayer, value);
            }
            plan
        }
        _ => return Err(usage_error()),
    };
    let projection = manager.project_pace(&plan).ok_or_else(not_set_up)?;

    output::section("Plan");
    match &projection.outcome {
        PaceOutcome::Unreachable { blocked } => {
            let names: Vec<&str> = blocked.iter().map(|prayer| prayer.as_str()).collect();
            output::warning(format!(
                "No pace set for {}. Increase the pace to calculate a finish estimate.",
                names.join(", ")
            ));
        }
        PaceOutcome::Complete => output::success("Nothing remaining. All caught up."),
        PaceOutcome::OnTrack {
            days_needed,
            limiting,
            finish_date,
        } => {
            output::row("Days", days_needed);
            output::row("Finish", format_calendar_date(*finish_date));
            output::row("Limiting", limiting);
        }
    }

    if let Some(ledger) = manager.get() {
        if let Some(goal) = ledger.goal_date {
            match required_pace(&ledger.remaining, manager.today(), goal) {
                Some(needed) => {
                    output::section(format!("Pace needed for {}", format_calendar_date(goal)));
                    for (prayer, per_day) in needed.iter() {
                        output::row(prayer, format!("{per_day}/day"));
                    }
                }
                None => output::warning("Goal date has passed."),
            }
        }
    }
    Ok(())
}

fn goal(manager: &mut LedgerManager, args: &[String]) -> Result<()> {
    let [value] = args else {
        return Err(usage_error());
    };
    let goal = if value == "clear" {
        None
    } else {
        Some(parse_calendar_date(value).ok_or_else(|| QadaError::InvalidDate(value.clone()))?)
    };
    manager.set_goal_date(goal).ok_or_else(not_set_up)?;
    match goal {
        Some(date) => output::success(format!("Goal set to {}", format_calendar_date(date))),
        None => output::success("Goal cleared."),
    }
    Ok(())
}

fn require_ledger(manager: &LedgerManager) -> Result<&qada_core::Ledger> {
    manager.get().ok_or_else(not_set_up)
}

fn not_set_up() -> QadaError {
    QadaError::InvalidInput("no ledger found; run `setup` first".into())
}

fn usage_error() -> QadaError {
    print_usage();
    QadaError::InvalidInput("unexpected arguments".into())
}

fn print_version() {
    println!(
        "qada_cli {} ({} {}, built {} for {} [{}], {})",
        env!("CARGO_PKG_VERSION"),
        env!("QADA_CORE_BUILD_HASH"),
        env!("QADA_CORE_BUILD_STATUS"),
        env!("QADA_CORE_BUILD_TIMESTAMP"),
        env!("QADA_CORE_BUILD_TARGET"),
        env!("QADA_CORE_BUILD_PROFILE"),
        env!("QADA_CORE_BUILD_RUSTC"),
    );
}

fn print_usage() {
    eprintln!(
        "Usage: qada_cli <command>\n\
         Commands:\n  \
         setup <YYYY-MM-DD> <start-age> <fajr> <dhuhr> <asr> <maghrib> <isha> <witr> [--counts]\n  \
         show\n  \
         log <prayer> <delta>\n  \
         pace <fajr> <dhuhr> <asr> <maghrib> <isha> <witr> | pace one-each\n  \
         goal <YYYY-MM-DD|clear>\n  \
         json\n  \
         reset\n  \
         version"
    );
}
