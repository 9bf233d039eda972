//! Layout command implementation.

use crate::cli::LayoutArgs;
use crate::error::Result;
use crate::output::Formatter;
use gridmark_domain::BlockTable;

/// Execute the layout command.
pub fn execute_layout(args: LayoutArgs, formatter: &Formatter) -> Result<()> {
    let table = BlockTable::try_from(args.categories)?;
    tracing::debug!(
        categories = table.category_count(),
        blocks = table.len(),
        "Enumerated category pairs"
    );
    println!("{}", formatter.format_layout(&table)?);
    Ok(())
}
