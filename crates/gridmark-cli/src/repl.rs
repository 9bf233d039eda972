//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::config::{Config, GridVerb};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::puzzle::{parse_event, parse_item, PuzzleFile};
use crate::render::GridView;
use gridmark_domain::{
    CategoryId, CategorySet, Cell, ItemRef, PuzzleSession, RelationEvent, RelationValue,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};

/// The loaded puzzle and its on-screen grid.
pub struct PlayState {
    session: PuzzleSession,
    view: GridView,
    title: String,
}

impl PlayState {
    /// Open a session for `puzzle` and lay out its grid.
    pub fn new(puzzle: &PuzzleFile, fallback_title: &str) -> Result<Self> {
        let session = puzzle.open_session()?;
        let view = GridView::build(&session)?;
        Ok(Self {
            session,
            view,
            title: puzzle.title_or(fallback_title).to_string(),
        })
    }

    /// The session being played
    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    /// The rendered grid state
    pub fn view(&self) -> &GridView {
        &self.view
    }
}

/// Run the interactive REPL.
pub fn run_repl(puzzle_path: &Path, config: &mut Config, formatter: &Formatter) -> Result<()> {
    let puzzle = PuzzleFile::load(puzzle_path)?;
    let mut state = PlayState::new(&puzzle, &puzzle_path.display().to_string())?;

    println!("{}", formatter.info("Gridmark REPL - Type 'help' for commands, 'exit' to quit"));
    println!();
    println!("{}", render(&state, formatter));

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("gridmark [{}]> ", RelationValue::from(config.settings.grid_verb));

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line, state.session.categories()) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => match execute_repl_command(cmd, &mut state, config, formatter) {
                        Ok(output) => println!("{}", output),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// List commands
    Help,
    /// Write a relation
    Mark(RelationEvent),
    /// Apply the grid verb to an open cell
    Pick(Cell),
    /// Toggle the grid verb, or set it
    Verb(Option<GridVerb>),
    /// Revert the last write
    Undo,
    /// Clear all relations
    Reset,
    /// Redraw the grid
    Grid,
    /// Chart pivoted on a category
    Chart(CategoryId),
    /// Show the cell and value of a pair
    Cell(ItemRef, ItemRef),
    /// Counts and solved state
    Status,
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str, categories: &CategorySet) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    // `Category:Item verb Category:Item`, as in events files.
    if parts[0].contains(':') {
        return Ok(ReplCommand::Mark(parse_event(categories, line)?));
    }

    match parts[0].to_lowercase().as_str() {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "is" | "not" | "maybe" => {
            let value = RelationValue::parse(parts[0])
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown relation '{}'", parts[0])))?;
            let (a, b) = parse_pair(categories, &parts[1..])?;
            Ok(ReplCommand::Mark(RelationEvent::new(a, value, b)))
        }
        "pick" => {
            let &[row, col] = &parts[1..] else {
                return Err(CliError::InvalidInput("Usage: pick <row> <col>".to_string()));
            };
            Ok(ReplCommand::Pick(Cell::new(parse_index(row)?, parse_index(col)?)))
        }
        "verb" => match parts.get(1) {
            None => Ok(ReplCommand::Verb(None)),
            Some(verb) => GridVerb::parse(verb)
                .map(|v| ReplCommand::Verb(Some(v)))
                .ok_or_else(|| CliError::InvalidInput("Usage: verb [is|not]".to_string())),
        },
        "undo" => Ok(ReplCommand::Undo),
        "reset" => Ok(ReplCommand::Reset),
        "grid" | "show" => Ok(ReplCommand::Grid),
        "chart" => {
            let name = parts[1..].join(" ");
            let category = categories
                .find(&name)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown category '{}'", name)))?;
            Ok(ReplCommand::Chart(category.id))
        }
        "cell" => {
            let (a, b) = parse_pair(categories, &parts[1..])?;
            Ok(ReplCommand::Cell(a, b))
        }
        "status" => Ok(ReplCommand::Status),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Split `Category:Item Category:Item` where item names may contain spaces:
/// the second item starts at the last token holding a colon.
fn parse_pair(categories: &CategorySet, tokens: &[&str]) -> Result<(ItemRef, ItemRef)> {
    let split = tokens
        .iter()
        .rposition(|t| t.contains(':'))
        .filter(|&i| i > 0)
        .ok_or_else(|| CliError::InvalidInput("Expected two items as Category:Item".to_string()))?;
    let a = parse_item(categories, &tokens[..split].join(" "))?;
    let b = parse_item(categories, &tokens[split..].join(" "))?;
    Ok((a, b))
}

fn parse_index(text: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| CliError::InvalidInput(format!("Expected a number, got '{}'", text)))
}

/// Execute a REPL command and return what to print.
pub fn execute_repl_command(
    cmd: ReplCommand,
    state: &mut PlayState,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<String> {
    let categories = state.session.categories().clone();

    match cmd {
        ReplCommand::Mark(event) => {
            let update = state.session.apply(event)?;
            state.view.repaint(&update);
            Ok(formatter.format_update(&update, &categories))
        }
        ReplCommand::Pick(cell) => {
            let verb = RelationValue::from(config.settings.grid_verb);
            match state.session.select(cell, verb)? {
                Some(update) => {
                    state.view.repaint(&update);
                    Ok(formatter.format_update(&update, &categories))
                }
                None => Ok(formatter.warning(&format!("Cell {} is not open", cell))),
            }
        }
        ReplCommand::Verb(verb) => {
            let verb = verb.unwrap_or_else(|| config.settings.grid_verb.toggled());
            config.set_grid_verb(verb)?;
            Ok(formatter.info(&format!("Grid verb: {}", RelationValue::from(verb))))
        }
        ReplCommand::Undo => match state.session.undo()? {
            Some(update) => {
                state.view.repaint(&update);
                Ok(formatter.info(&format!(
                    "Undid {} / {}, back to '{}'",
                    categories.label(update.a),
                    categories.label(update.b),
                    update.current
                )))
            }
            None => Ok(formatter.warning("Nothing to undo")),
        },
        ReplCommand::Reset => {
            state.session.reset();
            state.view.clear();
            Ok(formatter.success("All relations cleared"))
        }
        ReplCommand::Grid => Ok(render(state, formatter)),
        ReplCommand::Chart(pivot) => {
            let chart = state.session.chart(pivot)?;
            formatter.format_chart(&chart, &categories)
        }
        ReplCommand::Cell(a, b) => {
            let cell = state.session.translator().cell_of(a, b)?;
            let value = state.session.get(a, b)?;
            Ok(format!(
                "{} / {}: {} at {}",
                categories.label(a),
                categories.label(b),
                value,
                cell
            ))
        }
        ReplCommand::Status => Ok(format!(
            "{}\n{}",
            formatter.format_counts(&state.session.counts(), state.session.is_solved()),
            formatter.info(&format!("{} write(s) can be undone", state.session.history_len()))
        )),
        ReplCommand::Exit | ReplCommand::Help => Ok(String::new()),
    }
}

fn render(state: &PlayState, formatter: &Formatter) -> String {
    format!(
        "{}\n\n{}",
        formatter.heading(&state.title),
        state.view.render(&state.session, formatter)
    )
}

/// Print help message.
fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  is <Cat:Item> <Cat:Item>      Confirm that two items belong together");
    println!("  not <Cat:Item> <Cat:Item>     Rule out a pair");
    println!("  maybe <Cat:Item> <Cat:Item>   Set a pair back to unknown");
    println!("  <Cat:Item> is|not <Cat:Item>  Same, in events-file order");
    println!("  pick <row> <col>              Enter the grid verb in an open cell");
    println!("  verb [is|not]                 Toggle or set the grid verb");
    println!("  undo                          Revert the last change");
    println!("  reset                         Clear every relation");
    println!("  grid                          Redraw the grid");
    println!("  chart <Category>              Confirmed partners per item");
    println!("  cell <Cat:Item> <Cat:Item>    Show a pair's cell and value");
    println!("  status                        Counts and solved state");
    println!("  help                          Show this help");
    println!("  exit                          Leave");
    println!();
}

/// Get the history file path.
fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".gridmark").join("history.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    const PUZZLE: &str = r#"
title = "Pets"

[[categories]]
name = "Color"
items = ["Red", "Sky Blue"]

[[categories]]
name = "Pet"
items = ["Cat", "Dog"]

[[categories]]
name = "House"
items = ["First", "Second"]
"#;

    fn setup() -> (tempfile::TempDir, PlayState, Config, Formatter) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        let puzzle = PuzzleFile::parse(PUZZLE).unwrap();
        let state = PlayState::new(&puzzle, "untitled").unwrap();
        (dir, state, config, Formatter::new(OutputFormat::Table, false))
    }

    #[test]
    fn test_parse_commands() {
        let (_dir, state, _config, _formatter) = setup();
        let categories = state.session().categories();

        assert_eq!(parse_repl_command("quit", categories).unwrap(), ReplCommand::Exit);
        assert_eq!(
            parse_repl_command("pick 1 3", categories).unwrap(),
            ReplCommand::Pick(Cell::new(1, 3))
        );
        assert_eq!(
            parse_repl_command("verb is", categories).unwrap(),
            ReplCommand::Verb(Some(GridVerb::Is))
        );
        assert_eq!(
            parse_repl_command("chart pet", categories).unwrap(),
            ReplCommand::Chart(CategoryId::new(1))
        );
        assert!(parse_repl_command("pick 1", categories).is_err());
        assert!(parse_repl_command("dance", categories).is_err());
    }

    #[test]
    fn test_parse_mark_forms() {
        let (_dir, state, _config, _formatter) = setup();
        let categories = state.session().categories();
        let expected = ReplCommand::Mark(RelationEvent::new(
            ItemRef::new(0, 1),
            RelationValue::True,
            ItemRef::new(1, 0),
        ));

        assert_eq!(
            parse_repl_command("is Color:Sky Blue Pet:Cat", categories).unwrap(),
            expected
        );
        assert_eq!(
            parse_repl_command("Color:Sky Blue is Pet:Cat", categories).unwrap(),
            expected
        );
        assert!(parse_repl_command("is Color:Red", categories).is_err());
    }

    #[test]
    fn test_mark_undo_and_reset() {
        let (_dir, mut state, mut config, formatter) = setup();
        let cmd = parse_repl_command("not Color:Red House:Second", state.session().categories()).unwrap();
        let output = execute_repl_command(cmd, &mut state, &mut config, &formatter).unwrap();
        assert!(output.contains("Color:Red not House:Second"));

        let red = ItemRef::new(0, 0);
        let second = ItemRef::new(2, 1);
        assert_eq!(state.session().get(second, red).unwrap(), RelationValue::False);

        execute_repl_command(ReplCommand::Undo, &mut state, &mut config, &formatter).unwrap();
        assert_eq!(state.session().get(red, second).unwrap(), RelationValue::Unknown);

        let output = execute_repl_command(ReplCommand::Undo, &mut state, &mut config, &formatter).unwrap();
        assert!(output.contains("Nothing to undo"));

        execute_repl_command(
            ReplCommand::Mark(RelationEvent::new(red, RelationValue::True, second)),
            &mut state,
            &mut config,
            &formatter,
        )
        .unwrap();
        execute_repl_command(ReplCommand::Reset, &mut state, &mut config, &formatter).unwrap();
        assert_eq!(state.session().counts().unknown, state.session().counts().total());
    }

    #[test]
    fn test_pick_uses_grid_verb() {
        let (_dir, mut state, mut config, formatter) = setup();
        execute_repl_command(ReplCommand::Verb(None), &mut state, &mut config, &formatter).unwrap();
        assert_eq!(config.settings.grid_verb, GridVerb::Is);

        let output =
            execute_repl_command(ReplCommand::Pick(Cell::new(0, 0)), &mut state, &mut config, &formatter)
                .unwrap();
        assert!(output.contains("Color:Red is Pet:Cat"));
        assert_eq!(state.view().value_at(0, 0), Some(RelationValue::True));

        // A decided cell ignores further picks.
        let output =
            execute_repl_command(ReplCommand::Pick(Cell::new(0, 0)), &mut state, &mut config, &formatter)
                .unwrap();
        assert!(output.contains("not open"));
    }

    #[test]
    fn test_cell_and_status() {
        let (_dir, mut state, mut config, formatter) = setup();
        let cmd = parse_repl_command("cell House:First Color:Red", state.session().categories()).unwrap();
        let output = execute_repl_command(cmd, &mut state, &mut config, &formatter).unwrap();
        assert!(output.contains("maybe at (0, 2)"));

        let output = execute_repl_command(ReplCommand::Status, &mut state, &mut config, &formatter).unwrap();
        assert!(output.contains("12 unknown of 12 pairs"));
    }
}
