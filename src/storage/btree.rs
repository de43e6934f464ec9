use std::fmt::Write;

use crate::error::{DbError, DbResult};
use crate::storage::page::{
    get_cell_count, read_u32, set_cell_count, set_node_type, write_u32, NodeType, HEADER_SIZE,
    PAGE_SIZE,
};
use crate::storage::row::{Row, ROW_SIZE};

// ┌──────────────────────────────────────────────────────────────────────────────┐
// │ Offset │ Length │ Description                                                │
// │────────┼────────┼────────────────────────────────────────────────────────────│
// │   0    │   1    │ NODE_TYPE (1=leaf)                                         │
// │   1    │   4    │ CELL_COUNT (u32) – how many cells are in this node         │
// │────────┼────────┼────────────────────────────────────────────────────────────│
// │   5    │ (PAGE_SIZE − 5) │ Cells: [key,u32][row, ROW_SIZE bytes]…            │
// └──────────────────────────────────────────────────────────────────────────────┘

pub const LEAF_NODE_KEY_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

// A leaf is a single page holding a sorted, gap-free run of fixed-width
// cells. Cells `0..cell_count` are live; bytes past the last live cell are
// never interpreted. There is no split path: the store has exactly one leaf,
// and a full leaf rejects further inserts with `TableFull`.

/// Turn `page` into an empty leaf.
pub fn initialize_leaf(page: &mut [u8; PAGE_SIZE]) {
    set_node_type(page, NodeType::Leaf);
    set_cell_count(page, 0);
}

pub fn leaf_cell_count(page: &[u8; PAGE_SIZE]) -> u32 {
    get_cell_count(page)
}

pub fn set_leaf_cell_count(page: &mut [u8; PAGE_SIZE], count: u32) {
    set_cell_count(page, count);
}

/// Byte offset of cell `cell_num` from the start of the page.
pub fn leaf_cell_offset(cell_num: u32) -> usize {
    HEADER_SIZE + cell_num as usize * LEAF_NODE_CELL_SIZE
}

pub fn leaf_key(page: &[u8; PAGE_SIZE], cell_num: u32) -> u32 {
    read_u32(page, leaf_cell_offset(cell_num) + LEAF_NODE_KEY_OFFSET)
}

fn set_leaf_key(page: &mut [u8; PAGE_SIZE], cell_num: u32, key: u32) {
    write_u32(page, leaf_cell_offset(cell_num) + LEAF_NODE_KEY_OFFSET, key);
}

/// The serialized row of cell `cell_num`.
pub fn leaf_value(page: &[u8; PAGE_SIZE], cell_num: u32) -> &[u8] {
    let start = leaf_cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
    &page[start..start + LEAF_NODE_VALUE_SIZE]
}

pub fn leaf_value_mut(page: &mut [u8; PAGE_SIZE], cell_num: u32) -> &mut [u8] {
    let start = leaf_cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
    &mut page[start..start + LEAF_NODE_VALUE_SIZE]
}

/// Binary search for the smallest cell index whose key is `>= key`.
///
/// If `key` is present the result addresses it; otherwise it is the slot the
/// key would be inserted at (possibly `cell_count`).
pub fn leaf_find(page: &[u8; PAGE_SIZE], key: u32) -> u32 {
    let mut lo = 0;
    let mut hi = leaf_cell_count(page);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if leaf_key(page, mid) >= key {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Insert `(key, row)` at `cell_num`, shifting later cells one slot right.
///
/// Either the whole insert happens or the page is untouched. Duplicate
/// detection is the caller's job; see `Table::insert`.
pub fn leaf_insert(
    page: &mut [u8; PAGE_SIZE],
    cell_num: u32,
    key: u32,
    row: &Row,
) -> DbResult<()> {
    let num_cells = leaf_cell_count(page);
    if num_cells as usize >= LEAF_NODE_MAX_CELLS {
        return Err(DbError::TableFull);
    }
    if cell_num > num_cells {
        return Err(DbError::InvalidCellIndex {
            index: cell_num,
            max: num_cells,
        });
    }

    if cell_num < num_cells {
        let start = leaf_cell_offset(cell_num);
        let end = leaf_cell_offset(num_cells);
        page.copy_within(start..end, start + LEAF_NODE_CELL_SIZE);
    }

    set_leaf_key(page, cell_num, key);
    row.serialize(leaf_value_mut(page, cell_num));
    set_leaf_cell_count(page, num_cells + 1);
    Ok(())
}

/// Render the keys of a leaf, one per line, for the `.btree` command.
pub fn describe_leaf(page: &[u8; PAGE_SIZE]) -> String {
    let num_cells = leaf_cell_count(page);
    let mut out = format!("leaf (size {})\n", num_cells);
    for i in 0..num_cells {
        let _ = writeln!(out, "  - {} : {}", i, leaf_key(page, i));
    }
    out
}
