use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till1},
    character::complete::{i64 as signed_int, space0, space1},
    combinator::{all_consuming, value},
    sequence::{preceded, terminated},
};

use crate::error::{DbError, DbResult};
use crate::sql::ast::{MetaCommand, Statement};
use crate::storage::row::Row;

/// One whitespace-delimited argument, preceded by at least one space.
fn argument(input: &str) -> IResult<&str, &str> {
    preceded(space1, take_till1(|c: char| c.is_whitespace())).parse(input)
}

fn insert_keyword(input: &str) -> IResult<&str, &str> {
    tag_no_case("insert").parse(input)
}

/// `<id> <username> <email>` with nothing after it.
fn insert_arguments(input: &str) -> IResult<&str, (i64, &str, &str)> {
    all_consuming(terminated(
        (preceded(space1, signed_int), argument, argument),
        space0,
    ))
    .parse(input)
}

fn meta_command(input: &str) -> IResult<&str, MetaCommand> {
    all_consuming(alt((
        value(MetaCommand::Exit, tag(".exit")),
        value(MetaCommand::Btree, tag(".btree")),
        value(MetaCommand::Constants, tag(".constants")),
    )))
    .parse(input)
}

/// Parse a statement line: `insert <id> <username> <email>` or `select`.
pub fn parse_statement(input: &str) -> DbResult<Statement> {
    let line = input.trim();

    if let Ok((args, _)) = insert_keyword(line) {
        return parse_insert(args);
    }
    if line.eq_ignore_ascii_case("select") {
        return Ok(Statement::Select);
    }
    Err(DbError::UnrecognizedStatement(line.to_string()))
}

fn parse_insert(args: &str) -> DbResult<Statement> {
    let (_, (id, username, email)) = insert_arguments(args)
        .map_err(|_| DbError::SyntaxError("usage: insert <id> <username> <email>".into()))?;
    if id < 0 {
        return Err(DbError::NegativeId);
    }
    let id = u32::try_from(id)
        .map_err(|_| DbError::SyntaxError(format!("id {} does not fit in 32 bits", id)))?;
    Ok(Statement::Insert(Row::new(id, username, email)?))
}

/// Parse a line starting with `.`.
pub fn parse_meta_command(input: &str) -> DbResult<MetaCommand> {
    let line = input.trim();
    meta_command(line)
        .map(|(_, cmd)| cmd)
        .map_err(|_| DbError::UnrecognizedCommand(line.to_string()))
}
