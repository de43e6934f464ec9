use std::path::Path;

use log::{debug, info};

use crate::error::{DbError, DbResult};
use crate::storage::btree::{
    describe_leaf, initialize_leaf, leaf_cell_count, LEAF_NODE_MAX_CELLS,
};
use crate::storage::cursor::{Cursor, Rows};
use crate::storage::pager::Pager;
use crate::storage::row::Row;

/// An open database: the pager plus the page number of the root leaf.
///
/// `close` consumes the table; rows inserted since `open` only reach the
/// file when it is called.
pub struct Table {
    pub(crate) pager: Pager,
    root_page_num: u32,
}

impl Table {
    /// Open or create a table. If the file is empty, initialize page 0 as an
    /// empty leaf root. Otherwise page 0 is the existing root.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Table> {
        let mut pager = Pager::open(path)?;
        let root_page_num = 0;

        if pager.num_pages() == 0 {
            info!("Initializing new database: page 0 as empty leaf root.");
            let root = pager.get_page(root_page_num)?;
            initialize_leaf(&mut root.data);
        } else {
            debug!("Opening existing database: using page 0 as root.");
            let root = pager.get_page(root_page_num)?;
            let num_cells = leaf_cell_count(&root.data);
            if num_cells as usize > LEAF_NODE_MAX_CELLS {
                return Err(DbError::CorruptFile(format!(
                    "root leaf claims {} cells, at most {} fit",
                    num_cells, LEAF_NODE_MAX_CELLS
                )));
            }
        }

        Ok(Table {
            pager,
            root_page_num,
        })
    }

    /// Flush every resident page and release the file.
    pub fn close(self) -> DbResult<()> {
        self.pager.close()
    }

    pub fn root_page_num(&self) -> u32 {
        self.root_page_num
    }

    /// Insert `row` keyed by its id, keeping cells sorted.
    ///
    /// Fails with `TableFull` or `DuplicateKey`; in both cases the table is
    /// unchanged.
    pub fn insert(&mut self, row: &Row) -> DbResult<()> {
        let key = row.id();
        let num_cells = leaf_cell_count(&self.pager.get_page(self.root_page_num)?.data);
        if num_cells as usize >= LEAF_NODE_MAX_CELLS {
            debug!("Rejecting key {}: root leaf is full.", key);
            return Err(DbError::TableFull);
        }

        let mut cursor = Cursor::find(self, key)?;
        if cursor.key()? == Some(key) {
            debug!("Rejecting key {}: already present.", key);
            return Err(DbError::DuplicateKey(key));
        }
        debug!("Inserting key {} at cell {}.", key, cursor.cell_num());
        cursor.insert(key, row)
    }

    /// Scan every row in key order.
    pub fn scan(&mut self) -> DbResult<Rows<'_>> {
        Ok(Rows::new(Cursor::start(self)?))
    }

    pub fn select_all(&mut self) -> DbResult<Vec<Row>> {
        self.scan()?.collect()
    }

    /// Number of rows currently stored.
    pub fn len(&mut self) -> DbResult<u32> {
        Ok(leaf_cell_count(&self.pager.get_page(self.root_page_num)?.data))
    }

    pub fn is_empty(&mut self) -> DbResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Human-readable dump of the root leaf.
    pub fn describe(&mut self) -> DbResult<String> {
        Ok(describe_leaf(&self.pager.get_page(self.root_page_num)?.data))
    }
}
