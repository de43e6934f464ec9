use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::execution::handle_statement;
use crate::sql::ast::MetaCommand;
use crate::sql::parser::{parse_meta_command, parse_statement};
use crate::storage::btree::{
    LEAF_NODE_CELL_SIZE, LEAF_NODE_MAX_CELLS, LEAF_NODE_SPACE_FOR_CELLS,
};
use crate::storage::page::HEADER_SIZE;
use crate::storage::row::ROW_SIZE;
use crate::storage::table::Table;

pub const PROMPT: &str = "db > ";

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The command interpreter: reads lines, runs them against one table.
pub struct Engine {
    table: Table,
}

impl Engine {
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Engine { table: Table::open(path)? })
    }

    pub fn table(&mut self) -> &mut Table {
        &mut self.table
    }

    /// Prompt, read and execute lines until `.exit` or end of input.
    ///
    /// Returns early only on an error that leaves the table unusable.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> DbResult<()> {
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("End of input.");
                return Ok(());
            }
            if self.process_line(&line, out)? == Control::Exit {
                return Ok(());
            }
        }
    }

    /// Handle one input line, printing its outcome to `out`.
    pub fn process_line<W: Write>(&mut self, line: &str, out: &mut W) -> DbResult<Control> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Control::Continue);
        }

        if trimmed.starts_with('.') {
            return match parse_meta_command(trimmed) {
                Ok(cmd) => self.do_meta_command(cmd, out),
                Err(e) => {
                    report(&e, out)?;
                    Ok(Control::Continue)
                }
            };
        }

        let result = parse_statement(trimmed)
            .and_then(|stmt| handle_statement(&mut self.table, stmt, out));
        match result {
            Ok(()) => writeln!(out, "Executed.")?,
            Err(e) if e.is_recoverable() => report(&e, out)?,
            Err(e) => return Err(e),
        }
        Ok(Control::Continue)
    }

    fn do_meta_command<W: Write>(&mut self, cmd: MetaCommand, out: &mut W) -> DbResult<Control> {
        match cmd {
            MetaCommand::Exit => {
                info!("Received .exit");
                return Ok(Control::Exit);
            }
            MetaCommand::Btree => {
                writeln!(out, "Tree:")?;
                write!(out, "{}", self.table.describe()?)?;
            }
            MetaCommand::Constants => {
                writeln!(out, "Constants:")?;
                writeln!(out, "ROW_SIZE: {}", ROW_SIZE)?;
                writeln!(out, "NODE_HEADER_SIZE: {}", HEADER_SIZE)?;
                writeln!(out, "LEAF_NODE_CELL_SIZE: {}", LEAF_NODE_CELL_SIZE)?;
                writeln!(out, "LEAF_NODE_SPACE_FOR_CELLS: {}", LEAF_NODE_SPACE_FOR_CELLS)?;
                writeln!(out, "LEAF_NODE_MAX_CELLS: {}", LEAF_NODE_MAX_CELLS)?;
            }
        }
        Ok(Control::Continue)
    }

    /// Flush and close the underlying table.
    pub fn close(self) -> DbResult<()> {
        self.table.close()
    }
}

/// Print the user-facing message for a recoverable error.
fn report<W: Write>(err: &DbError, out: &mut W) -> DbResult<()> {
    warn!("{}", err);
    match err {
        DbError::DuplicateKey(_) => writeln!(out, "Error: Duplicate key.")?,
        DbError::TableFull => writeln!(out, "Error: Table full.")?,
        DbError::SyntaxError(_) => writeln!(out, "Syntax error. Could not parse statement.")?,
        DbError::StringTooLong => writeln!(out, "String is too long.")?,
        DbError::NulInString => writeln!(out, "String must not contain NUL bytes.")?,
        DbError::NegativeId => writeln!(out, "ID must be positive.")?,
        DbError::UnrecognizedStatement(line) => {
            writeln!(out, "Unrecognized keyword at start of '{}'.", line)?
        }
        DbError::UnrecognizedCommand(line) => writeln!(out, "Unrecognized command '{}'", line)?,
        other => writeln!(out, "Error: {}.", other)?,
    }
    Ok(())
}
