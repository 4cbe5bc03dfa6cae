use anyhow::{bail, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use studyflow_engine::generate_plan;
use studyflow_store::AssignmentStore;
use studyflow_types::AssignmentSort;

use crate::context::CliContext;
use crate::types::OutputFormat;

pub fn handle(ctx: &mut CliContext) -> Result<()> {
    if !ctx.tier.is_premium() {
        bail!("Study plan generation is a premium feature. Upgrade to premium to unlock it.");
    }

    let store = AssignmentStore::new(&mut ctx.backend);
    let outstanding = store.list(&ctx.user_id, Some(false), AssignmentSort::Stored)?;
    let plan = generate_plan(&outstanding, Utc::now());

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Plain => {
            if plan.is_empty() {
                println!("No outstanding assignments. Nothing to plan.");
                return Ok(());
            }
            for (index, block) in plan.blocks.iter().enumerate() {
                println!(
                    "{:>3}. {} [{}/{}] | {}m | due {} | {}{}",
                    index + 1,
                    block.title.bold(),
                    block.session_number,
                    block.total_sessions,
                    block.duration_minutes,
                    block.due_date.format("%Y-%m-%d"),
                    block.priority.as_str(),
                    if block.course.is_empty() {
                        String::new()
                    } else {
                        format!(" | {}", block.course)
                    },
                );
            }
            println!(
                "Total planned: {}m ({:.1}h) across {} block(s)",
                plan.total_minutes,
                f64::from(plan.total_minutes) / 60.0,
                plan.blocks.len()
            );
        }
    }
    Ok(())
}
