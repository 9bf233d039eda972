//! Replay command implementation.

use crate::cli::ReplayArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::puzzle::{parse_events, PuzzleFile};
use crate::render::GridView;
use gridmark_domain::{CellUpdate, PuzzleSession, RelationEvent};
use std::fs;

/// What happened while replaying an events file.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// Events written to the store
    pub applied: usize,
    /// Contradicting writes with their line numbers
    pub contradictions: Vec<(usize, CellUpdate)>,
    /// Line of the contradiction that stopped a strict replay
    pub stopped_at: Option<usize>,
}

/// Execute the replay command.
pub fn execute_replay(args: ReplayArgs, formatter: &Formatter) -> Result<()> {
    let puzzle = PuzzleFile::load(&args.puzzle)?;
    let mut session = puzzle.open_session()?;
    let mut view = GridView::build(&session)?;

    let contents = fs::read_to_string(&args.events)?;
    let events = parse_events(session.categories(), &contents)?;
    tracing::info!(events = events.len(), path = %args.events.display(), "Replaying events");

    let report = replay(&mut session, &mut view, &events, args.strict)?;

    for (line, update) in &report.contradictions {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "line {}: {} {} {} contradicts earlier '{}'",
                line,
                session.categories().label(update.a),
                update.current,
                session.categories().label(update.b),
                update.previous
            ))
        );
    }

    let fallback = args.puzzle.display().to_string();
    println!("{}", formatter.heading(puzzle.title_or(&fallback)));
    println!();
    print!("{}", view.render(&session, formatter));
    println!();
    println!("{}", formatter.format_counts(&session.counts(), session.is_solved()));

    if let Some(pivot) = &args.chart {
        let category = session
            .categories()
            .find(pivot)
            .ok_or_else(|| CliError::InvalidInput(format!("Unknown category '{}'", pivot)))?;
        let chart = session.chart(category.id)?;
        println!("{}", formatter.format_chart(&chart, session.categories())?);
    }

    if let Some(line) = report.stopped_at {
        return Err(CliError::InvalidInput(format!(
            "Replay stopped at line {} after {} event(s)",
            line, report.applied
        )));
    }
    Ok(())
}

/// Apply `events` in order, repainting `view` after each one.
///
/// Contradictions are stored like any other write; with `strict` the replay
/// stops right after the first one.
pub fn replay(
    session: &mut PuzzleSession,
    view: &mut GridView,
    events: &[(usize, RelationEvent)],
    strict: bool,
) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (line, event) in events {
        let update = session
            .apply(*event)
            .map_err(|e| CliError::InvalidInput(format!("line {}: {}", line, e)))?;
        view.repaint(&update);
        report.applied += 1;

        if update.is_contradiction() {
            report.contradictions.push((*line, update));
            if strict {
                report.stopped_at = Some(*line);
                break;
            }
        }
    }

    Ok(report)
}
