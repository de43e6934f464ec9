use crate::error::DbResult;
use crate::storage::btree::{leaf_cell_count, leaf_find, leaf_insert, leaf_key, leaf_value};
use crate::storage::row::Row;
use crate::storage::table::Table;

/// A position inside the table: a cell of a page, or one past the last cell.
///
/// The cursor holds the table mutably for its whole life, so no two cursors
/// (or a cursor and a direct table call) can be interleaved.
pub struct Cursor<'a> {
    table: &'a mut Table,
    page_num: u32,
    cell_num: u32,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Position at the first cell of the root page.
    pub fn start(table: &'a mut Table) -> DbResult<Cursor<'a>> {
        let page_num = table.root_page_num();
        let num_cells = leaf_cell_count(&table.pager.get_page(page_num)?.data);
        Ok(Cursor {
            table,
            page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    /// Position one past the last cell.
    pub fn end(table: &'a mut Table) -> DbResult<Cursor<'a>> {
        let page_num = table.root_page_num();
        let num_cells = leaf_cell_count(&table.pager.get_page(page_num)?.data);
        Ok(Cursor {
            table,
            page_num,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    /// Position at the cell holding `key`, or where `key` would be inserted.
    /// The position may equal the cell count ("append").
    pub fn find(table: &'a mut Table, key: u32) -> DbResult<Cursor<'a>> {
        let page_num = table.root_page_num();
        let cell_num = leaf_find(&table.pager.get_page(page_num)?.data, key);
        Ok(Cursor {
            table,
            page_num,
            cell_num,
            end_of_table: false,
        })
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn cell_num(&self) -> u32 {
        self.cell_num
    }

    pub fn is_end(&self) -> bool {
        self.end_of_table
    }

    pub fn advance(&mut self) -> DbResult<()> {
        let num_cells = leaf_cell_count(&self.table.pager.get_page(self.page_num)?.data);
        self.cell_num += 1;
        if self.cell_num >= num_cells {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Key of the current cell, `None` at or past the end.
    pub fn key(&mut self) -> DbResult<Option<u32>> {
        let page = self.table.pager.get_page(self.page_num)?;
        if self.end_of_table || self.cell_num >= leaf_cell_count(&page.data) {
            return Ok(None);
        }
        Ok(Some(leaf_key(&page.data, self.cell_num)))
    }

    /// Row of the current cell, `None` at or past the end.
    pub fn value(&mut self) -> DbResult<Option<Row>> {
        let page = self.table.pager.get_page(self.page_num)?;
        if self.end_of_table || self.cell_num >= leaf_cell_count(&page.data) {
            return Ok(None);
        }
        Ok(Some(Row::deserialize(leaf_value(&page.data, self.cell_num))))
    }

    /// Insert `(key, row)` at the cursor position.
    pub fn insert(&mut self, key: u32, row: &Row) -> DbResult<()> {
        let page = self.table.pager.get_page(self.page_num)?;
        leaf_insert(&mut page.data, self.cell_num, key, row)
    }
}

/// Lazy in-order scan over every row of a table.
///
/// Yields `Err` at most once; after an error or the last row it is exhausted.
/// A fresh `Table::scan` is needed to read the rows again.
pub struct Rows<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Rows<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Rows { cursor }
    }

    fn step(&mut self) -> DbResult<Option<Row>> {
        if self.cursor.is_end() {
            return Ok(None);
        }
        let row = self.cursor.value()?;
        self.cursor.advance()?;
        Ok(row)
    }
}

impl Iterator for Rows<'_> {
    type Item = DbResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.step();
        if item.is_err() {
            self.cursor.end_of_table = true;
        }
        item.transpose()
    }
}
