use anyhow::Result;
use owo_colors::OwoColorize;
use studyflow_store::AssignmentStore;
use studyflow_types::{Assignment, AssignmentDraft, AssignmentPatch, AssignmentSort};

use crate::context::CliContext;
use crate::types::{OutputFormat, PriorityArg};

use super::parse_date;

#[allow(clippy::too_many_arguments)]
pub fn add(
    ctx: &mut CliContext,
    title: String,
    due: &str,
    description: Option<String>,
    priority: Option<PriorityArg>,
    estimated: Option<u32>,
    course: Option<String>,
) -> Result<()> {
    let draft = AssignmentDraft {
        title: Some(title),
        description,
        due_date: Some(parse_date(due, true)?),
        priority: priority.map(Into::into),
        estimated_minutes: estimated,
        course,
    };

    let mut store = AssignmentStore::new(&mut ctx.backend);
    let record = store.create(&ctx.user_id, draft, ctx.tier)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Plain => {
            println!("Created assignment {}", record.id);
            print_row(&record);
        }
    }
    Ok(())
}

pub fn list(ctx: &mut CliContext, completed: Option<bool>, sort: AssignmentSort) -> Result<()> {
    let store = AssignmentStore::new(&mut ctx.backend);
    let records = store.list(&ctx.user_id, completed, sort)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("No assignments.");
                return Ok(());
            }
            for record in &records {
                print_row(record);
            }
            println!("{} assignment(s)", records.len());
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    ctx: &mut CliContext,
    id: &str,
    title: Option<String>,
    due: Option<&str>,
    description: Option<String>,
    priority: Option<PriorityArg>,
    estimated: Option<u32>,
    course: Option<String>,
    completed: Option<bool>,
) -> Result<()> {
    let patch = AssignmentPatch {
        title,
        description,
        due_date: due.map(|d| parse_date(d, true)).transpose()?,
        priority: priority.map(Into::into),
        estimated_minutes: estimated,
        course,
        completed,
    };

    let mut store = AssignmentStore::new(&mut ctx.backend);
    let record = store.update(&ctx.user_id, id, patch)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Plain => {
            println!("Updated assignment {}", record.id);
            print_row(&record);
        }
    }
    Ok(())
}

pub fn done(ctx: &mut CliContext, id: &str) -> Result<()> {
    update(
        ctx,
        id,
        None,
        None,
        None,
        None,
        None,
        None,
        Some(true),
    )
}

pub fn delete(ctx: &mut CliContext, id: &str) -> Result<()> {
    let mut store = AssignmentStore::new(&mut ctx.backend);
    store.delete(&ctx.user_id, id)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": id })),
        OutputFormat::Plain => println!("Deleted assignment {}", id),
    }
    Ok(())
}

fn print_row(record: &Assignment) {
    let status = if record.completed {
        format!("{}", "done".green())
    } else {
        format!("{}", "open".yellow())
    };
    println!(
        "  {}  [{}] {} | due {} | {} | {}m{}",
        record.id,
        status,
        record.title,
        record.due_date.format("%Y-%m-%d"),
        record.priority.as_str(),
        record.estimated_minutes,
        if record.course.is_empty() {
            String::new()
        } else {
            format!(" | {}", record.course)
        },
    );
}
