//! Tests for pagination module

use super::*;
use crate::config::FetchConfig;
use pretty_assertions::assert_eq;

#[test]
fn test_page_cursor_starts_at_zero() {
    let cursor = PageCursor::new(25, 200);
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.page_size(), 25);
    assert_eq!(cursor.requests_started(), 0);
    assert_eq!(cursor.max_requests(), 200);
    assert!(cursor.has_budget());
}

#[test]
fn test_page_cursor_from_default_config() {
    let cursor = PageCursor::from_config(&FetchConfig::default());
    assert_eq!(cursor.page_size(), 25);
    assert_eq!(cursor.max_requests(), 200);
}

#[test]
fn test_offsets_are_multiples_of_page_size() {
    let mut cursor = PageCursor::new(25, 200);
    let mut offsets = Vec::new();

    while let Some(offset) = cursor.start_request() {
        offsets.push(offset);
        cursor.advance();
    }

    assert_eq!(offsets.len(), 200);
    for (i, offset) in offsets.iter().enumerate() {
        assert_eq!(*offset, i as u64 * 25);
    }
    assert_eq!(offsets.last(), Some(&4975));
}

#[test]
fn test_budget_is_enforced() {
    let mut cursor = PageCursor::new(25, 2);
    assert_eq!(cursor.start_request(), Some(0));
    cursor.advance();
    assert_eq!(cursor.start_request(), Some(25));
    cursor.advance();
    assert_eq!(cursor.start_request(), None);
    assert!(!cursor.has_budget());
    assert_eq!(cursor.requests_started(), 2);
    assert_eq!(cursor.offset(), 50);
}

#[test]
fn test_zero_budget_issues_nothing() {
    let mut cursor = PageCursor::from_config(&FetchConfig::new().with_max_reports(10));
    assert_eq!(cursor.start_request(), None);
}

#[test]
fn test_offset_only_moves_on_advance() {
    let mut cursor = PageCursor::new(10, 5);
    assert_eq!(cursor.start_request(), Some(0));
    assert_eq!(cursor.offset(), 0);
    cursor.advance();
    assert_eq!(cursor.offset(), 10);
}
