//! Statement preparation and execution.

use std::io::Write;

use tracing::debug;

use crate::error::{ExecuteError, PrepareError};
use crate::row::{COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, Row};
use crate::table::Table;

/// A validated operation ready to run against a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

impl Statement {
    /// Turns a non-meta input line into a statement.
    pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
        let statement = if input.starts_with("insert") {
            prepare_insert(input)?
        } else if input == "select" {
            Statement::Select
        } else {
            return Err(PrepareError::UnrecognizedStatement(input.to_string()));
        };
        debug!(?statement, "prepared statement");
        Ok(statement)
    }

    /// Runs the statement. Selected rows are written to `out`, one per line.
    pub fn execute<W: Write>(&self, table: &mut Table, out: &mut W) -> Result<(), ExecuteError> {
        match self {
            Statement::Insert(row) => table.push(row),
            Statement::Select => {
                for row in table.rows() {
                    writeln!(out, "{row}")?;
                }
                Ok(())
            }
        }
    }
}

fn prepare_insert(input: &str) -> Result<Statement, PrepareError> {
    // The first token is the keyword itself; anything after the email is ignored.
    let mut tokens = input.split_whitespace().skip(1);
    let (Some(id), Some(username), Some(email)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(PrepareError::SyntaxError);
    };

    // A stored text column ends at its first zero byte, so none may appear inside one.
    if username.contains('\0') || email.contains('\0') {
        return Err(PrepareError::SyntaxError);
    }

    if username.len() > COLUMN_USERNAME_SIZE || email.len() > COLUMN_EMAIL_SIZE {
        return Err(PrepareError::StringTooLong);
    }

    Ok(Statement::Insert(Row::new(parse_id(id)?, username, email)))
}

fn parse_id(token: &str) -> Result<u32, PrepareError> {
    if let Ok(id) = token.parse::<u32>() {
        return Ok(id);
    }
    match token.strip_prefix('-') {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            Err(PrepareError::NegativeId)
        }
        _ => Err(PrepareError::SyntaxError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{EMAIL_SIZE, USERNAME_SIZE};
    use crate::table::TABLE_MAX_ROWS;

    fn select_output(table: &mut Table) -> String {
        let mut out = Vec::new();
        Statement::Select.execute(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_prepare_insert() {
        assert_eq!(
            Statement::prepare("insert 1 alice alice@example.com"),
            Ok(Statement::Insert(Row::new(1, "alice", "alice@example.com")))
        );
    }

    #[test]
    fn test_prepare_insert_extra_whitespace_and_tokens() {
        assert_eq!(
            Statement::prepare("insert  2\talice  a@b.c trailing"),
            Ok(Statement::Insert(Row::new(2, "alice", "a@b.c")))
        );
    }

    #[test]
    fn test_prepare_select() {
        assert_eq!(Statement::prepare("select"), Ok(Statement::Select));
    }

    #[test]
    fn test_select_must_match_exactly() {
        assert_eq!(
            Statement::prepare("select *"),
            Err(PrepareError::UnrecognizedStatement("select *".to_string()))
        );
        assert_eq!(
            Statement::prepare("SELECT"),
            Err(PrepareError::UnrecognizedStatement("SELECT".to_string()))
        );
    }

    #[test]
    fn test_missing_tokens() {
        assert_eq!(Statement::prepare("insert"), Err(PrepareError::SyntaxError));
        assert_eq!(Statement::prepare("insert 1 alice"), Err(PrepareError::SyntaxError));
    }

    #[test]
    fn test_bad_id() {
        assert_eq!(
            Statement::prepare("insert abc alice a@b.c"),
            Err(PrepareError::SyntaxError)
        );
        assert_eq!(
            Statement::prepare("insert 4294967296 alice a@b.c"),
            Err(PrepareError::SyntaxError)
        );
        assert_eq!(
            Statement::prepare("insert -1 alice a@b.c"),
            Err(PrepareError::NegativeId)
        );
        assert_eq!(
            Statement::prepare("insert -99999999999999999999 alice a@b.c"),
            Err(PrepareError::NegativeId)
        );
        assert_eq!(
            Statement::prepare("insert - alice a@b.c"),
            Err(PrepareError::SyntaxError)
        );
        assert_eq!(
            Statement::prepare("insert -1x alice a@b.c"),
            Err(PrepareError::SyntaxError)
        );
    }

    #[test]
    fn test_zero_byte_in_text_column() {
        assert_eq!(
            Statement::prepare("insert 1 a\0b e@x"),
            Err(PrepareError::SyntaxError)
        );
        assert_eq!(
            Statement::prepare("insert 1 alice e@x\0"),
            Err(PrepareError::SyntaxError)
        );
    }

    #[test]
    fn test_rejections_leave_table_untouched() {
        let mut table = Table::new();
        let mut out = Vec::new();
        Statement::prepare("insert 1 alice alice@example.com")
            .unwrap()
            .execute(&mut table, &mut out)
            .unwrap();

        let long_username = "u".repeat(USERNAME_SIZE + 1);
        for line in [
            "insert 2 bob".to_string(),
            format!("insert 2 {long_username} bob@example.com"),
            "insert two bob bob@example.com".to_string(),
            "insert -2 bob bob@example.com".to_string(),
            "insert 2 b\0b bob@example.com".to_string(),
            "delete 1".to_string(),
        ] {
            assert!(Statement::prepare(&line).is_err(), "{line}");
        }

        assert_eq!(table.num_rows(), 1);
        assert_eq!(select_output(&mut table), "(1, alice, alice@example.com)\n");
    }

    #[test]
    fn test_string_limits() {
        let username = "u".repeat(USERNAME_SIZE);
        let email = "e".repeat(EMAIL_SIZE);
        assert!(Statement::prepare(&format!("insert 1 {username} {email}")).is_ok());

        assert_eq!(
            Statement::prepare(&format!("insert 1 {username}u {email}")),
            Err(PrepareError::StringTooLong)
        );
        assert_eq!(
            Statement::prepare(&format!("insert 1 {username} {email}e")),
            Err(PrepareError::StringTooLong)
        );
    }

    #[test]
    fn test_unrecognized_keyword() {
        assert_eq!(
            Statement::prepare("foo"),
            Err(PrepareError::UnrecognizedStatement("foo".to_string()))
        );
    }

    #[test]
    fn test_insert_then_select() {
        let mut table = Table::new();
        let mut out = Vec::new();
        for line in ["insert 1 alice alice@example.com", "insert 1 alice alice@example.com"] {
            Statement::prepare(line)
                .unwrap()
                .execute(&mut table, &mut out)
                .unwrap();
        }
        assert!(out.is_empty());
        assert_eq!(table.num_rows(), 2);
        assert_eq!(
            select_output(&mut table),
            "(1, alice, alice@example.com)\n(1, alice, alice@example.com)\n"
        );
    }

    #[test]
    fn test_select_empty_table() {
        let mut table = Table::new();
        assert_eq!(select_output(&mut table), "");
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn test_insert_into_full_table() {
        let mut table = Table::new();
        let mut out = Vec::new();
        for i in 0..TABLE_MAX_ROWS {
            Statement::Insert(Row::new(i as u32, "u", "e"))
                .execute(&mut table, &mut out)
                .unwrap();
        }

        let err = Statement::Insert(Row::new(0, "late", "late@example.com"))
            .execute(&mut table, &mut out)
            .unwrap_err();
        assert!(matches!(err, ExecuteError::TableFull));
        assert_eq!(table.num_rows(), TABLE_MAX_ROWS);
    }
}
