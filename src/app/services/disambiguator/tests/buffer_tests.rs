//! Tests for the fix buffer

use crate::app::models::{TimeOfDay, UndatedFix};
use crate::app::services::disambiguator::Buffer;

fn fix(second: u8) -> UndatedFix {
    UndatedFix::at(TimeOfDay::from_hms(0, 0, second).unwrap())
}

#[test]
fn test_buffer_fills_at_capacity() {
    let mut buffer = Buffer::new(2);
    assert!(buffer.is_empty());

    buffer.push(fix(1));
    assert!(!buffer.is_full());
    buffer.push(fix(2));
    assert!(buffer.is_full());
    assert_eq!(buffer.len(), 2);
}

#[test]
fn test_flush_drains_in_order() {
    let mut buffer = Buffer::new(10);
    for second in [3, 1, 2] {
        buffer.push(fix(second));
    }

    let drained = buffer.flush();

    let seconds: Vec<u8> = drained.iter().map(|f| f.time.second()).collect();
    assert_eq!(seconds, vec![3, 1, 2]);
    assert!(buffer.is_empty());
}

#[test]
fn test_zero_capacity_is_one() {
    let buffer = Buffer::new(0);
    assert_eq!(buffer.capacity(), 1);
}
