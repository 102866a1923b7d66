//! Page store.
//!
//! The table is an array of `TABLE_MAX_PAGES` fixed-size pages, allocated on
//! first touch. Logical row `n` lives in page `n / ROWS_PER_PAGE` at byte
//! offset `(n % ROWS_PER_PAGE) * ROW_SIZE`; any tail bytes of a page that
//! cannot hold a whole row are never addressed.

use tracing::trace;

use crate::error::ExecuteError;
use crate::row::{ROW_SIZE, Row};

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
pub const TABLE_MAX_ROWS: usize = ROWS_PER_PAGE * TABLE_MAX_PAGES;

const _: () = assert!(ROWS_PER_PAGE > 0, "a row must fit in a page");

type Page = [u8; PAGE_SIZE];

/// Maps a row number to its page number and byte offset within that page.
pub fn locate(row_num: usize) -> (usize, usize) {
    let page_num = row_num / ROWS_PER_PAGE;
    let byte_offset = (row_num % ROWS_PER_PAGE) * ROW_SIZE;
    (page_num, byte_offset)
}

#[derive(Debug)]
pub struct Table {
    num_rows: usize,
    pages: Vec<Option<Box<Page>>>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            num_rows: 0,
            pages: std::iter::repeat_with(|| None)
                .take(TABLE_MAX_PAGES)
                .collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= TABLE_MAX_ROWS
    }

    /// Number of pages that have been allocated so far.
    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    /// Returns the byte window of `row_num`, allocating its page if needed.
    ///
    /// Returns `None` when `row_num` is past the table's capacity.
    pub fn slot_for(&mut self, row_num: usize) -> Option<&mut [u8; ROW_SIZE]> {
        if row_num >= TABLE_MAX_ROWS {
            return None;
        }
        let (page_num, byte_offset) = locate(row_num);
        let page = self.pages.get_mut(page_num)?.get_or_insert_with(|| {
            trace!(page_num, "allocating page");
            Box::new([0u8; PAGE_SIZE])
        });
        page[byte_offset..].first_chunk_mut::<ROW_SIZE>()
    }

    /// Read-only lookup. Returns `None` if the page was never allocated.
    pub fn slot(&self, row_num: usize) -> Option<&[u8; ROW_SIZE]> {
        if row_num >= TABLE_MAX_ROWS {
            return None;
        }
        let (page_num, byte_offset) = locate(row_num);
        let page = self.pages.get(page_num)?.as_deref()?;
        page[byte_offset..].first_chunk::<ROW_SIZE>()
    }

    /// Appends `row` at the end of the table.
    pub fn push(&mut self, row: &Row) -> Result<(), ExecuteError> {
        if self.is_full() {
            return Err(ExecuteError::TableFull);
        }
        let row_num = self.num_rows;
        let slot = self.slot_for(row_num).ok_or(ExecuteError::TableFull)?;
        row.serialize(slot);
        self.num_rows += 1;
        trace!(row_num, "row stored");
        Ok(())
    }

    /// Iterates over stored rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.num_rows)
            .filter_map(|row_num| self.slot(row_num))
            .map(Row::deserialize)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
