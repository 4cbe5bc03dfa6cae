use anyhow::Result;
use owo_colors::OwoColorize;
use studyflow_store::SessionStore;
use studyflow_types::{HistoryFilter, Session, SessionDraft, SessionKind};

use crate::context::CliContext;
use crate::types::OutputFormat;

use super::parse_date;

pub fn start(
    ctx: &mut CliContext,
    assignment: Option<String>,
    duration: Option<u32>,
    kind: SessionKind,
) -> Result<()> {
    let draft = SessionDraft {
        assignment_id: assignment,
        kind: Some(kind),
        duration_minutes: duration,
    };

    let mut store = SessionStore::new(&mut ctx.backend);
    let session = store.start(&ctx.user_id, draft, ctx.tier)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Plain => {
            println!(
                "Started {} session {} ({}m)",
                session.kind.as_str(),
                session.id,
                session.duration_minutes
            );
        }
    }
    Ok(())
}

pub fn end(ctx: &mut CliContext, id: &str, incomplete: bool, interrupted: bool) -> Result<()> {
    let completed = incomplete.then_some(false);
    let interrupted = interrupted.then_some(true);

    let mut store = SessionStore::new(&mut ctx.backend);
    let session = store.end(&ctx.user_id, id, completed, interrupted)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Plain => {
            let outcome = if session.completed && !session.interrupted {
                format!("{}", "completed".green())
            } else if session.interrupted {
                format!("{}", "interrupted".red())
            } else {
                format!("{}", "abandoned".yellow())
            };
            println!(
                "Ended session {} after {}m ({})",
                session.id, session.actual_minutes, outcome
            );
        }
    }
    Ok(())
}

pub fn active(ctx: &mut CliContext) -> Result<()> {
    let store = SessionStore::new(&mut ctx.backend);
    let active = store.active(&ctx.user_id)?;

    match ctx.format {
        OutputFormat::Json => match active {
            Some(active) => println!("{}", serde_json::to_string_pretty(&active)?),
            None => println!("null"),
        },
        OutputFormat::Plain => match active {
            Some(active) => println!(
                "{} session {}: {}m elapsed, {}m remaining",
                active.session.kind.as_str(),
                active.session.id,
                active.elapsed_minutes,
                active.remaining_minutes
            ),
            None => println!("No active session."),
        },
    }
    Ok(())
}

pub fn history(
    ctx: &mut CliContext,
    since: Option<&str>,
    until: Option<&str>,
    assignment: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let filter = HistoryFilter {
        start_date: since.map(|d| parse_date(d, false)).transpose()?,
        end_date: until.map(|d| parse_date(d, true)).transpose()?,
        assignment_id: assignment,
        limit,
    };

    let store = SessionStore::new(&mut ctx.backend);
    let sessions = store.history(&ctx.user_id, &filter)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
        OutputFormat::Plain => {
            if sessions.is_empty() {
                println!("No sessions.");
                return Ok(());
            }
            for session in &sessions {
                print_row(session);
            }
            println!("{} session(s)", sessions.len());
        }
    }
    Ok(())
}

fn print_row(session: &Session) {
    let state = match session.end_time {
        None => "open".to_string(),
        Some(_) if session.interrupted => format!("{}", "interrupted".red()),
        Some(_) if session.completed => format!("{}", "completed".green()),
        Some(_) => format!("{}", "abandoned".yellow()),
    };
    println!(
        "  {}  {} | {} | {}m of {}m | {}{}",
        session.id,
        session.start_time.format("%Y-%m-%d %H:%M"),
        session.kind.as_str(),
        session.actual_minutes,
        session.duration_minutes,
        state,
        session
            .assignment_id
            .as_deref()
            .map(|id| format!(" | {}", id))
            .unwrap_or_default(),
    );
}
