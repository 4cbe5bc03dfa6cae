use anyhow::Result;

use crate::args::{AssignmentCommand, Cli, Commands, SessionCommand};
use crate::context::CliContext;
use crate::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = CliContext::resolve(&cli)?;

    match cli.command {
        Commands::Assignment { command } => match command {
            AssignmentCommand::Add {
                title,
                due,
                description,
                priority,
                estimated,
                course,
            } => handlers::assignment::add(&mut ctx, title, &due, description, priority, estimated, course),
            AssignmentCommand::List { completed, sort } => {
                handlers::assignment::list(&mut ctx, completed, sort.into())
            }
            AssignmentCommand::Update {
                id,
                title,
                due,
                description,
                priority,
                estimated,
                course,
                completed,
            } => handlers::assignment::update(
                &mut ctx,
                &id,
                title,
                due.as_deref(),
                description,
                priority,
                estimated,
                course,
                completed,
            ),
            AssignmentCommand::Done { id } => handlers::assignment::done(&mut ctx, &id),
            AssignmentCommand::Delete { id } => handlers::assignment::delete(&mut ctx, &id),
        },

        Commands::Session { command } => match command {
            SessionCommand::Start {
                assignment,
                duration,
                kind,
            } => handlers::session::start(&mut ctx, assignment, duration, kind.into()),
            SessionCommand::End {
                id,
                incomplete,
                interrupted,
            } => handlers::session::end(&mut ctx, &id, incomplete, interrupted),
            SessionCommand::Active => handlers::session::active(&mut ctx),
            SessionCommand::History {
                since,
                until,
                assignment,
                limit,
            } => handlers::session::history(&mut ctx, since.as_deref(), until.as_deref(), assignment, limit),
        },

        Commands::Plan => handlers::plan::handle(&mut ctx),

        Commands::Stats { period } => handlers::stats::handle(&mut ctx, period.into()),
    }
}
