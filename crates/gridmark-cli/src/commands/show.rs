//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::puzzle::PuzzleFile;
use crate::render::GridView;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, formatter: &Formatter) -> Result<()> {
    let puzzle = PuzzleFile::load(&args.puzzle)?;
    let session = puzzle.open_session()?;
    let view = GridView::build(&session)?;

    let fallback = args.puzzle.display().to_string();
    println!("{}", formatter.heading(puzzle.title_or(&fallback)));
    println!();
    print!("{}", view.render(&session, formatter));
    Ok(())
}
