use leafdb::storage::cursor::Cursor;
use leafdb::storage::row::Row;
use leafdb::storage::table::Table;
use tempfile::{tempdir, TempDir};

fn row(id: u32) -> Row {
    Row::new(id, format!("user{}", id), format!("person{}@example.com", id)).unwrap()
}

fn table_with(ids: &[u32]) -> (TempDir, Table) {
    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("cursor.db")).unwrap();
    for id in ids {
        table.insert(&row(*id)).unwrap();
    }
    (dir, table)
}

#[test]
fn start_on_empty_table_is_at_end() {
    let (_dir, mut table) = table_with(&[]);
    let mut cursor = Cursor::start(&mut table).unwrap();
    assert!(cursor.is_end());
    assert_eq!(cursor.value().unwrap(), None);
}

#[test]
fn start_then_advance_walks_every_cell() {
    let (_dir, mut table) = table_with(&[20, 10, 30]);
    let mut cursor = Cursor::start(&mut table).unwrap();
    let mut seen = Vec::new();
    while !cursor.is_end() {
        seen.push(cursor.value().unwrap().unwrap().id());
        cursor.advance().unwrap();
    }
    assert_eq!(seen, vec![10, 20, 30]);
    assert_eq!(cursor.cell_num(), 3);
    assert_eq!(cursor.page_num(), 0);
}

#[test]
fn end_points_one_past_last_cell() {
    let (_dir, mut table) = table_with(&[1, 2]);
    let mut cursor = Cursor::end(&mut table).unwrap();
    assert!(cursor.is_end());
    assert_eq!(cursor.cell_num(), 2);
    assert_eq!(cursor.key().unwrap(), None);
}

#[test]
fn find_existing_and_missing_keys() {
    let (_dir, mut table) = table_with(&[10, 20, 30]);
    {
        let mut cursor = Cursor::find(&mut table, 20).unwrap();
        assert!(!cursor.is_end());
        assert_eq!(cursor.cell_num(), 1);
        assert_eq!(cursor.key().unwrap(), Some(20));
        assert_eq!(cursor.value().unwrap(), Some(row(20)));
    }
    {
        let mut cursor = Cursor::find(&mut table, 25).unwrap();
        assert_eq!(cursor.cell_num(), 2);
        assert_eq!(cursor.key().unwrap(), Some(30));
    }
    let mut cursor = Cursor::find(&mut table, 99).unwrap();
    assert!(!cursor.is_end());
    assert_eq!(cursor.cell_num(), 3);
    assert_eq!(cursor.key().unwrap(), None);
}

#[test]
fn insert_at_find_position() {
    let (_dir, mut table) = table_with(&[10, 30]);
    {
        let mut cursor = Cursor::find(&mut table, 20).unwrap();
        cursor.insert(20, &row(20)).unwrap();
    }
    let ids: Vec<u32> = table.select_all().unwrap().iter().map(Row::id).collect();
    assert_eq!(ids, vec![10, 20, 30]);
}
