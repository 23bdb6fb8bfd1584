use crate::{CoreError, PostStatus};

use std::str::FromStr;

#[test]
fn test_post_status_as_str() {
    assert_eq!(PostStatus::Draft.as_str(), "draft");
    assert_eq!(PostStatus::Published.as_str(), "published");
}

#[test]
fn test_post_status_from_str() {
    assert_eq!(PostStatus::from_str("draft").unwrap(), PostStatus::Draft);
    assert_eq!(
        PostStatus::from_str("published").unwrap(),
        PostStatus::Published
    );
}

#[test]
fn test_post_status_from_str_rejects_unknown() {
    let result = PostStatus::from_str("archived");
    assert!(matches!(
        result,
        Err(CoreError::InvalidPostStatus { value, .. }) if value == "archived"
    ));
}
