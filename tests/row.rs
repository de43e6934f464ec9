use leafdb::error::DbError;
use leafdb::storage::row::{Row, EMAIL_OFFSET, EMAIL_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE};

#[test]
fn layout_constants() {
    assert_eq!(USERNAME_OFFSET, 4);
    assert_eq!(EMAIL_OFFSET, 36);
    assert_eq!(ROW_SIZE, 291);
}

#[test]
fn serialize_round_trip() {
    let row = Row::new(42, "alice", "alice@example.com").unwrap();
    let mut buf = [0xFFu8; ROW_SIZE];
    row.serialize(&mut buf);
    assert_eq!(&buf[..4], &42u32.to_le_bytes());
    assert_eq!(Row::deserialize(&buf), row);
}

#[test]
fn fields_at_full_capacity_round_trip() {
    let username = "u".repeat(USERNAME_SIZE);
    let email = "e".repeat(EMAIL_SIZE);
    let row = Row::new(u32::MAX, username.clone(), email.clone()).unwrap();
    let mut buf = [0u8; ROW_SIZE];
    row.serialize(&mut buf);
    let back = Row::deserialize(&buf);
    assert_eq!(back.id(), u32::MAX);
    assert_eq!(back.username(), username);
    assert_eq!(back.email(), email);
}

#[test]
fn serialize_pads_over_stale_bytes() {
    let mut buf = [0u8; ROW_SIZE];
    Row::new(1, "a-much-longer-name", "long@example.com").unwrap().serialize(&mut buf);
    let short = Row::new(2, "bo", "b@x").unwrap();
    short.serialize(&mut buf);
    assert_eq!(Row::deserialize(&buf), short);
}

#[test]
fn over_long_text_is_rejected() {
    assert!(matches!(
        Row::new(1, "u".repeat(USERNAME_SIZE + 1), "a@b"),
        Err(DbError::StringTooLong)
    ));
    assert!(matches!(
        Row::new(1, "user", "e".repeat(EMAIL_SIZE + 1)),
        Err(DbError::StringTooLong)
    ));
}

#[test]
fn nul_bytes_in_text_are_rejected() {
    assert!(matches!(Row::new(1, "ab\0cd", "x@y"), Err(DbError::NulInString)));
    assert!(matches!(Row::new(1, "abcd", "x\0@y"), Err(DbError::NulInString)));
}

#[test]
fn display_matches_select_output() {
    let row = Row::new(1, "user1", "person1@example.com").unwrap();
    assert_eq!(row.to_string(), "(1, user1, person1@example.com)");
}
