use super::*;
use std::thread;

#[test]
fn test_search_limits_depth_only() {
    let limits = SearchLimits::depth(5);
    assert_eq!(limits.depth, 5);
    assert!(limits.move_time.is_none());
    assert!(!limits.start().expired());
}

#[test]
fn test_search_limits_with_time() {
    let limits = SearchLimits::depth_and_time(4, Duration::from_millis(100));
    assert_eq!(limits.depth, 4);
    assert_eq!(limits.move_time, Some(Duration::from_millis(100)));
}

#[test]
fn test_depth_is_clamped() {
    assert_eq!(SearchLimits::depth(0).depth, 1);
    assert_eq!(SearchLimits::depth(200).depth, MAX_SEARCH_DEPTH);
    assert_eq!(SearchLimits::time(Duration::from_secs(1)).depth, MAX_SEARCH_DEPTH);
}

#[test]
fn test_budget_expiry() {
    let budget = TimeBudget::new(Some(Duration::from_millis(10)));
    assert!(!budget.expired());
    thread::sleep(Duration::from_millis(20));
    assert!(budget.expired());
    assert_eq!(budget.remaining(), Some(Duration::ZERO));
}

#[test]
fn test_budget_no_limit() {
    let budget = TimeBudget::new(None);
    thread::sleep(Duration::from_millis(5));
    assert!(!budget.expired());
    assert!(budget.remaining().is_none());
    assert!(budget.elapsed() >= Duration::from_millis(5));
}
