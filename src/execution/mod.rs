use std::io::Write;

use log::debug;

use crate::error::DbResult;
use crate::sql::ast::Statement;
use crate::storage::table::Table;

/// Run `stmt` against `table`, writing any result rows to `out`.
///
/// `TableFull` and `DuplicateKey` come back as errors; the caller decides
/// how to report them.
pub fn handle_statement<W: Write>(table: &mut Table, stmt: Statement, out: &mut W) -> DbResult<()> {
    match stmt {
        Statement::Insert(row) => {
            debug!("INSERT {}", row);
            table.insert(&row)
        }
        Statement::Select => {
            debug!("SELECT");
            for row in table.scan()? {
                writeln!(out, "{}", row?)?;
            }
            Ok(())
        }
    }
}
