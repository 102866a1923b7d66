//! A tiny in-memory record store.
//!
//! Rows of a fixed schema are serialized into fixed-size pages, addressed by
//! their logical row number. Input lines are classified into meta-commands
//! and statements, prepared, then executed against a single [`Table`].

pub mod command;
pub mod error;
pub mod input;
pub mod row;
pub mod statement;
pub mod table;

pub use command::{InputType, MetaCommand};
pub use error::{ExecuteError, InputError, PrepareError};
pub use input::InputBuffer;
pub use row::{EMAIL_SIZE, ROW_SIZE, Row, USERNAME_SIZE};
pub use statement::Statement;
pub use table::{PAGE_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS, Table};
