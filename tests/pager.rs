use leafdb::error::DbError;
use leafdb::storage::page::{PAGE_SIZE, TABLE_MAX_PAGES};
use leafdb::storage::pager::Pager;
use std::fs;
use tempfile::tempdir;

#[test]
fn open_creates_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fresh.db");
    let pager = Pager::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(pager.file_length(), 0);
    assert_eq!(pager.num_pages(), 0);
}

#[test]
fn open_rejects_unaligned_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.db");
    fs::write(&path, vec![0u8; 100]).unwrap();
    assert!(matches!(Pager::open(&path), Err(DbError::CorruptFile(_))));
}

#[test]
fn open_in_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("x.db");
    assert!(matches!(Pager::open(&path), Err(DbError::Io(_))));
}

#[test]
fn pages_past_end_are_zeroed_and_not_written_until_flush() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("alloc.db");
    let mut pager = Pager::open(&path).unwrap();

    let page = pager.get_page(2).unwrap();
    assert!(page.data.iter().all(|&b| b == 0));
    assert_eq!(pager.num_pages(), 3);
    assert!(pager.is_resident(2));
    assert!(!pager.is_resident(0));
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn page_out_of_range() {
    let dir = tempdir().unwrap();
    let mut pager = Pager::open(dir.path().join("range.db")).unwrap();
    assert!(pager.get_page(TABLE_MAX_PAGES - 1).is_ok());
    match pager.get_page(TABLE_MAX_PAGES) {
        Err(DbError::PageOutOfRange { page_num, max }) => {
            assert_eq!(page_num, TABLE_MAX_PAGES);
            assert_eq!(max, TABLE_MAX_PAGES);
        }
        _ => panic!("expected PageOutOfRange"),
    }
}

#[test]
fn flush_writes_page_at_its_offset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flush.db");
    let mut pager = Pager::open(&path).unwrap();
    pager.get_page(1).unwrap().data[0] = 0xAB;
    pager.flush(1).unwrap();

    assert_eq!(pager.file_length(), 2 * PAGE_SIZE as u64);
    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 2 * PAGE_SIZE);
    assert_eq!(bytes[PAGE_SIZE], 0xAB);
    assert!(bytes[..PAGE_SIZE].iter().all(|&b| b == 0));
}

#[test]
fn flush_of_untouched_page_is_noop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noop.db");
    let mut pager = Pager::open(&path).unwrap();
    pager.flush(5).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn close_then_reopen_reads_pages_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reopen.db");
    {
        let mut pager = Pager::open(&path).unwrap();
        pager.get_page(0).unwrap().data[10] = 7;
        pager.get_page(3).unwrap().data[PAGE_SIZE - 1] = 9;
        pager.close().unwrap();
    }
    assert_eq!(fs::metadata(&path).unwrap().len(), 4 * PAGE_SIZE as u64);

    let mut pager = Pager::open(&path).unwrap();
    assert_eq!(pager.num_pages(), 4);
    assert_eq!(pager.get_page(0).unwrap().data[10], 7);
    assert_eq!(pager.get_page(3).unwrap().data[PAGE_SIZE - 1], 9);
}

#[test]
fn resident_page_keeps_in_memory_changes() {
    let dir = tempdir().unwrap();
    let mut pager = Pager::open(dir.path().join("resident.db")).unwrap();
    pager.get_page(0).unwrap().data[0] = 42;
    assert_eq!(pager.get_page(0).unwrap().data[0], 42);
}
