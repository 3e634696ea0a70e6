// Copyright 2025 Cowboy AI, LLC.

//! Scheduled post list service

use super::entity_service::EntityService;
use crate::entities::{ScheduledPostList, SCHEDULED_POST_LIST_SCHEMA};
use crate::persistence::Repository;

/// Entity service for scheduled post lists
pub type ScheduledPostsService<R> = EntityService<ScheduledPostList, R>;

/// Scheduled posts service over `repository`, validating every post in a list
pub fn scheduled_posts_service<R: Repository<ScheduledPostList>>(
    repository: R,
) -> ScheduledPostsService<R> {
    EntityService::with_schema(repository, &SCHEDULED_POST_LIST_SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::StoreEntityCommand;
    use crate::entities::ScheduledPost;
    use crate::persistence::repository::MockRepository;
    use crate::results::OperationResult;
    use chrono::Utc;

    fn post(title: &str) -> ScheduledPost {
        ScheduledPost {
            id: "0b7e7c0a-4c1e-4d55-9d0a-6f3a1c2b9e11".to_string(),
            title: title.to_string(),
            body: "body".to_string(),
            media_list: Vec::new(),
            account_id: "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d".to_string(),
            status: "scheduled".to_string(),
            hashtags: vec!["news".to_string()],
            target_platforms: vec!["x".to_string()],
            scheduled_time: Utc::now(),
        }
    }

    fn list(posts: Vec<ScheduledPost>) -> ScheduledPostList {
        ScheduledPostList::new("123e4567-e89b-12d3-a456-426614174000", "u1").with_posts(posts)
    }

    #[tokio::test]
    async fn test_invalid_post_rejects_whole_list() {
        let mut repo = MockRepository::<ScheduledPostList>::new();
        repo.expect_record_exists().times(0);
        let service = scheduled_posts_service(repo);

        let result = service
            .store_record(StoreEntityCommand::new(list(vec![post("ok"), post("")]), "u1"))
            .await;

        assert!(!result.success);
        assert_eq!(
            result.errors,
            vec!["posts.1.title: String must contain at least 1 character(s)"]
        );
    }

    #[tokio::test]
    async fn test_valid_list_is_created() {
        let mut repo = MockRepository::<ScheduledPostList>::new();
        repo.expect_record_exists().times(1).returning(|_| false);
        repo.expect_create()
            .times(1)
            .returning(|_| OperationResult::ok("created"));
        let service = scheduled_posts_service(repo);

        let result = service
            .store_record(StoreEntityCommand::new(list(vec![post("Launch")]), "u9"))
            .await;
        assert!(result.success);
    }
}
