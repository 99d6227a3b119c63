//! Batch Edit Integration Tests
//!
//! Tests for edit sessions:
//! - Buffered writes are invisible until the session ends
//! - A session yields the same state as the equivalent individual writes
//! - Implicit commit on drop, discard

mod common;

use common::*;
use num_bigint::BigInt;
use typed_prefs::SettingsStore;

#[test]
fn test_begin_end() {
    let mut f = TestFixture::new();

    let mut session = f.prefs.begin();
    session
        .put_int(PREFKEY_INT, 100)
        .unwrap()
        .put_string(PREFKEY_STRING, "abc")
        .unwrap()
        .put_big_integer(PREFKEY_BIG_INTEGER, BigInt::from(1000))
        .unwrap();

    // reads through the session see committed state only
    assert!(!session.contains(PREFKEY_INT).unwrap());
    assert_eq!(session.pending(), 3);
    session.end().unwrap();

    assert_eq!(f.prefs.get_int(PREFKEY_INT).unwrap(), 100);
    assert_eq!(f.prefs.get_string(PREFKEY_STRING).unwrap(), "abc");
    assert_eq!(
        f.prefs.get_big_integer(PREFKEY_BIG_INTEGER).unwrap(),
        BigInt::from(1000)
    );
}

#[test]
fn test_session_matches_individual_writes() {
    let mut batched = TestFixture::new();
    let mut direct = TestFixture::new();

    direct.prefs.put_long("a", 1).unwrap();
    direct.prefs.put_bin("b", vec![1, 2]).unwrap();
    direct.prefs.remove("a").unwrap();
    direct.prefs.put_double("c", 0.25).unwrap();

    let mut session = batched.prefs.begin();
    session.put_long("a", 1).unwrap();
    session.put_bin("b", vec![1, 2]).unwrap();
    session.remove("a").unwrap();
    session.put_double("c", 0.25).unwrap();
    session.end().unwrap();

    assert_eq!(batched.store.all().unwrap(), direct.store.all().unwrap());
}

#[test]
fn test_clear_inside_session() {
    let mut f = TestFixture::new();
    f.prefs.put_int("old", 1).unwrap();

    let mut session = f.prefs.begin();
    session.clear().unwrap().put_int("new", 2).unwrap();
    session.end().unwrap();

    assert_eq!(f.prefs.keys().unwrap(), vec!["new"]);
}

#[test]
fn test_drop_commits() {
    let mut f = TestFixture::new();
    {
        let mut session = f.prefs.begin();
        session.put_char(PREFKEY_CHAR, 'd').unwrap();
    }
    assert_eq!(f.prefs.get_char(PREFKEY_CHAR).unwrap(), 'd');
}

#[test]
fn test_discard() {
    let mut f = TestFixture::new();

    let mut session = f.prefs.begin();
    session.put_char(PREFKEY_CHAR, 'd').unwrap();
    session.discard();

    assert!(f.store.is_empty());
}

#[test]
fn test_empty_session_is_noop() {
    let mut f = TestFixture::new();
    f.prefs.begin().end().unwrap();
    assert!(f.store.is_empty());
}
