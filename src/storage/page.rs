// ┌─────────────────────────────────────────────────────────────────────────┐
// │ Offset │ Length │ Description                                           │
// │────────┼────────┼───────────────────────────────────────────────────────│
// │   0    │   1    │ NODE_TYPE (0 = internal, 1 = leaf)                    │
// │   1    │   4    │ CELL_COUNT: number of cells in this node (u32, LE)    │
// │────────┼────────┼───────────────────────────────────────────────────────│
// │   5    │  (PAGE_SIZE - 5)  ┆ Cells                                      │
// └─────────────────────────────────────────────────────────────────────────┘

pub const PAGE_SIZE: usize = 4096;

/// Hard upper bound on the number of pages a single database file may hold.
pub const TABLE_MAX_PAGES: u32 = 100;

pub const NODE_TYPE_OFFSET: usize = 0;          // 1 byte
pub const CELL_COUNT_OFFSET: usize = 1;         // 4 bytes (u32)
pub const CELL_COUNT_SIZE: usize = 4;
pub const HEADER_SIZE: usize = CELL_COUNT_OFFSET + CELL_COUNT_SIZE;

/// The one-byte tag stored at the start of every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Reserved for multi-level trees; never written by this engine.
    Internal,
    Leaf,
}

impl NodeType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(NodeType::Internal),
            1 => Some(NodeType::Leaf),
            _ => None,
        }
    }

    pub fn to_code(self) -> u8 {
        match self {
            NodeType::Internal => 0,
            NodeType::Leaf => 1,
        }
    }
}

/// Given a raw page buffer, read its node type. `None` for an unknown tag.
pub fn get_node_type(page: &[u8; PAGE_SIZE]) -> Option<NodeType> {
    NodeType::from_code(page[NODE_TYPE_OFFSET])
}

pub fn set_node_type(page: &mut [u8; PAGE_SIZE], node_type: NodeType) {
    page[NODE_TYPE_OFFSET] = node_type.to_code();
}

/// Read the number of cells in this node.
pub fn get_cell_count(page: &[u8; PAGE_SIZE]) -> u32 {
    read_u32(page, CELL_COUNT_OFFSET)
}

pub fn set_cell_count(page: &mut [u8; PAGE_SIZE], count: u32) {
    write_u32(page, CELL_COUNT_OFFSET, count);
}

/// Little-endian u32 at `offset`.
pub fn read_u32(buf: &[u8], offset: usize) -> u32 {
    let b = &buf[offset..offset + 4];
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

pub fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
