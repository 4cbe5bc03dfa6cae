use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use studyflow_engine::{analyze, InsightsReport, Period};
use studyflow_store::SessionStore;
use studyflow_types::HistoryFilter;

use crate::context::CliContext;
use crate::types::OutputFormat;

pub fn handle(ctx: &mut CliContext, period: Period) -> Result<()> {
    let store = SessionStore::new(&mut ctx.backend);
    let sessions = store.history(&ctx.user_id, &HistoryFilter::default())?;
    let report = analyze(&sessions, period, ctx.tier, Utc::now());

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &InsightsReport) {
    println!("Sessions:   {}", report.basic.total_sessions);
    println!("Completed:  {}", report.basic.completed_sessions);
    println!("Minutes:    {}", report.basic.total_minutes);
    println!("Average:    {}m per session", report.basic.average_session_minutes);

    let Some(premium) = &report.premium else {
        if report.requires_premium {
            println!("{}", "Upgrade to premium for advanced analytics.".yellow());
        }
        return;
    };

    println!("Score:      {}/100", premium.productivity_score);
    if let Some(best) = &premium.best_productivity_time {
        println!("Best hours: {}", best);
    }
    println!("Streak:     {} day(s)", premium.streak_days);

    println!("Weekly:");
    for day in &premium.weekly_progress {
        println!("  {}  {:>3} session(s)  {:>5}m", day.day, day.sessions, day.minutes);
    }

    if !premium.focus_time_by_assignment.is_empty() {
        println!("By assignment:");
        for focus in &premium.focus_time_by_assignment {
            println!(
                "  {}  {}m over {} session(s)",
                focus.assignment_id, focus.total_minutes, focus.session_count
            );
        }
    }
}
