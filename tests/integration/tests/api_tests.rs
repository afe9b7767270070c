//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Setup helpers
// ============================================================================

async fn register(server: &TestServer) -> RegisterResponse {
    let response = server
        .post("/api/auth/register", &RegisterRequest { password: None })
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_category(server: &TestServer) -> CategoryResponse {
    let response = server
        .post("/api/categories/admin/create", &CreateCategoryRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_confession(server: &TestServer) -> (RegisterResponse, ConfessionResponse) {
    let user = register(server).await;
    let category = create_category(server).await;
    let request = CreateConfessionRequest::at(&category.id, &user.user_id, 126.978, 37.566);
    let response = server.post("/api/confessions/create", &request).await.unwrap();
    let confession = assert_json(response, StatusCode::CREATED).await.unwrap();
    (user, confession)
}

async fn add_comment(
    server: &TestServer,
    confession_id: &str,
    author: &RegisterResponse,
    text: &str,
) -> CommentResponse {
    let request = CreateCommentRequest {
        confession_id: confession_id.to_string(),
        text: text.to_string(),
        username: author.username.clone(),
        author_id: Some(author.user_id.clone()),
        quoted_comment_id: None,
    };
    let response = server.post("/api/comments/add", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn get_confession(server: &TestServer, id: &str) -> ConfessionResponse {
    let response = server.get(&format!("/api/confessions/{id}")).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn get_comment_reactions(
    server: &TestServer,
    confession_id: &str,
    comment_id: &str,
) -> std::collections::BTreeMap<String, i64> {
    let response = server
        .get(&format!("/api/comments/confession/{confession_id}?size=100"))
        .await
        .unwrap();
    let page: Paginated<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    page.items
        .into_iter()
        .find(|c| c.id == comment_id)
        .expect("comment present")
        .reactions
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_register_issues_pseudonym() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = register(&server).await;
    let second = register(&server).await;

    assert!(!first.username.is_empty());
    assert_ne!(first.user_id, second.user_id);
    assert_ne!(first.username, second.username);
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_duplicate_category_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateCategoryRequest::unique();

    let response = server.post("/api/categories/admin/create", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/categories/admin/create", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Confessions
// ============================================================================

#[tokio::test]
async fn test_confession_create_and_get() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, confession) = create_confession(&server).await;

    assert_eq!(confession.author_id, user.user_id);
    assert_eq!(confession.comments_count, 0);
    assert!(confession.reactions.is_empty());

    let fetched = get_confession(&server, &confession.id).await;
    assert_eq!(fetched.id, confession.id);
    assert_eq!(fetched.text, confession.text);
}

#[tokio::test]
async fn test_confession_text_too_long_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server).await;
    let category = create_category(&server).await;

    let mut request = CreateConfessionRequest::at(&category.id, &user.user_id, 0.0, 0.0);
    request.text = "a".repeat(281);

    let response = server.post("/api/confessions/create", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_nearby_confessions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server).await;
    let category = create_category(&server).await;

    // A point in the middle of the Pacific keeps this test isolated from
    // whatever other rows the database holds
    let request = CreateConfessionRequest::at(&category.id, &user.user_id, -150.1234, -40.5678);
    let response = server.post("/api/confessions/create", &request).await.unwrap();
    let confession: ConfessionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get("/api/confessions/nearby?longitude=-150.1230&latitude=-40.5678&max_distance=1000")
        .await
        .unwrap();
    let nearby: Vec<ConfessionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(nearby.iter().any(|c| c.id == confession.id));

    let response = server
        .get("/api/confessions/nearby?longitude=-150.5000&latitude=-40.5678&max_distance=1000")
        .await
        .unwrap();
    let far: Vec<ConfessionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!far.iter().any(|c| c.id == confession.id));
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comment_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, confession) = create_confession(&server).await;

    for i in 0..25 {
        add_comment(&server, &confession.id, &user, &format!("comment {i}")).await;
    }

    let response = server
        .get(&format!(
            "/api/comments/confession/{}?page=2&size=10",
            confession.id
        ))
        .await
        .unwrap();
    let page: Paginated<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.page, 2);
    assert_eq!(page.items.len(), 10);

    let response = server
        .get(&format!(
            "/api/comments/confession/{}?page=3&size=10",
            confession.id
        ))
        .await
        .unwrap();
    let page: Paginated<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.items.len(), 5);

    // The counter tracked every insert
    let fetched = get_confession(&server, &confession.id).await;
    assert_eq!(fetched.comments_count, 25);
}

#[tokio::test]
async fn test_comment_edit_author_gated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, confession) = create_confession(&server).await;
    let stranger = register(&server).await;
    let comment = add_comment(&server, &confession.id, &user, "original").await;

    // Wrong author: 403, distinct from 404
    let response = server
        .put(
            &format!("/api/comments/{}", comment.id),
            &UpdateCommentRequest {
                text: "hijacked".to_string(),
                author_id: stranger.user_id.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Right author: edit goes through
    let response = server
        .put(
            &format!("/api/comments/{}", comment.id),
            &UpdateCommentRequest {
                text: "edited".to_string(),
                author_id: user.user_id.clone(),
            },
        )
        .await
        .unwrap();
    let updated: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.text, "edited");

    // Missing comment: 404
    let response = server
        .put(
            "/api/comments/1",
            &UpdateCommentRequest {
                text: "x".to_string(),
                author_id: user.user_id.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_comment_delete_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, confession) = create_confession(&server).await;
    let comment = add_comment(&server, &confession.id, &user, "delete me").await;

    assert_eq!(get_confession(&server, &confession.id).await.comments_count, 1);

    let body = DeleteRequest {
        author_id: user.user_id.clone(),
    };

    let response = server
        .delete(&format!("/api/comments/{}", comment.id), &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Second delete: NotFound, and the counter is not decremented again
    let response = server
        .delete(&format!("/api/comments/{}", comment.id), &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(get_confession(&server, &confession.id).await.comments_count, 0);
}

#[tokio::test]
async fn test_dangling_quote_is_omitted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, confession) = create_confession(&server).await;
    let quoted = add_comment(&server, &confession.id, &user, "soon gone").await;

    let request = CreateCommentRequest {
        confession_id: confession.id.clone(),
        text: "quoting".to_string(),
        username: user.username.clone(),
        author_id: Some(user.user_id.clone()),
        quoted_comment_id: Some(quoted.id.clone()),
    };
    let response = server.post("/api/comments/add", &request).await.unwrap();
    let quoting: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Quote resolves while the target exists
    let response = server
        .get(&format!("/api/comments/confession/{}?size=100", confession.id))
        .await
        .unwrap();
    let page: Paginated<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = page.items.iter().find(|c| c.id == quoting.id).unwrap();
    assert_eq!(
        entry.quoted_comment.as_ref().map(|q| q.id.as_str()),
        Some(quoted.id.as_str())
    );

    // Delete the quoted comment; the reference dangles and is omitted
    server
        .delete(
            &format!("/api/comments/{}", quoted.id),
            &DeleteRequest {
                author_id: user.user_id.clone(),
            },
        )
        .await
        .unwrap();

    let response = server
        .get(&format!("/api/comments/confession/{}?size=100", confession.id))
        .await
        .unwrap();
    let page: Paginated<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = page.items.iter().find(|c| c.id == quoting.id).unwrap();
    assert!(entry.quoted_comment.is_none());
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_comment_reaction_scenario() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, confession) = create_confession(&server).await;
    let user_a = register(&server).await;
    let user_b = register(&server).await;
    let comment = add_comment(&server, &confession.id, &author, "react to me").await;

    let react = |user_id: String, emoji: Option<&str>| CommentReactRequest {
        comment_id: comment.id.clone(),
        user_id,
        emoji: emoji.map(String::from),
    };

    // A reacts 👍 -> {👍: 1}
    let response = server
        .post("/api/comments/react", &react(user_a.user_id.clone(), Some("👍")))
        .await
        .unwrap();
    let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.action, "added");

    let counts = get_comment_reactions(&server, &confession.id, &comment.id).await;
    assert_eq!(counts.get("👍"), Some(&1));

    // B reacts 👍 -> {👍: 2}
    server
        .post("/api/comments/react", &react(user_b.user_id.clone(), Some("👍")))
        .await
        .unwrap();
    let counts = get_comment_reactions(&server, &confession.id, &comment.id).await;
    assert_eq!(counts.get("👍"), Some(&2));

    // A repeats 👍 -> unchanged, count unaffected
    let response = server
        .post("/api/comments/react", &react(user_a.user_id.clone(), Some("👍")))
        .await
        .unwrap();
    let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.action, "unchanged");
    let counts = get_comment_reactions(&server, &confession.id, &comment.id).await;
    assert_eq!(counts.get("👍"), Some(&2));

    // A switches to ❤️ -> {👍: 1, ❤️: 1}
    let response = server
        .post("/api/comments/react", &react(user_a.user_id.clone(), Some("❤️")))
        .await
        .unwrap();
    let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.action, "updated");
    assert_eq!(result.old_emoji.as_deref(), Some("👍"));
    let counts = get_comment_reactions(&server, &confession.id, &comment.id).await;
    assert_eq!(counts.get("👍"), Some(&1));
    assert_eq!(counts.get("❤️"), Some(&1));

    // B removes -> {❤️: 1}, 👍 key gone entirely
    let response = server
        .post("/api/comments/react", &react(user_b.user_id.clone(), None))
        .await
        .unwrap();
    let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.action, "removed");
    let counts = get_comment_reactions(&server, &confession.id, &comment.id).await;
    assert_eq!(counts.get("👍"), None);
    assert_eq!(counts.get("❤️"), Some(&1));

    // A removes too -> empty map, no zero-count keys retained
    server
        .post("/api/comments/react", &react(user_a.user_id.clone(), None))
        .await
        .unwrap();
    let counts = get_comment_reactions(&server, &confession.id, &comment.id).await;
    assert!(counts.is_empty());
}

#[tokio::test]
async fn test_confession_reaction_and_viewer_enrichment() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, confession) = create_confession(&server).await;
    let user = register(&server).await;

    let response = server
        .post(
            "/api/confessions/react",
            &ConfessionReactRequest {
                confession_id: confession.id.clone(),
                user_id: user.user_id.clone(),
                emoji: Some("😂".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let fetched = get_confession(&server, &confession.id).await;
    assert_eq!(fetched.reactions.get("😂"), Some(&1));

    // Viewer enrichment reports the caller's own reaction
    let response = server
        .get(&format!(
            "/api/confessions/{}?user_id={}",
            confession.id, user.user_id
        ))
        .await
        .unwrap();
    let enriched: ConfessionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(enriched.my_reaction.as_deref(), Some("😂"));
}

#[tokio::test]
async fn test_first_reaction_without_emoji_uses_default() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, confession) = create_confession(&server).await;
    let user = register(&server).await;

    let response = server
        .post(
            "/api/confessions/react",
            &ConfessionReactRequest {
                confession_id: confession.id.clone(),
                user_id: user.user_id.clone(),
                emoji: None,
            },
        )
        .await
        .unwrap();
    let result: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.action, "added");
    assert_eq!(result.emoji.as_deref(), Some("👍"));
}

#[tokio::test]
async fn test_react_to_missing_comment_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server).await;

    let response = server
        .post(
            "/api/comments/react",
            &CommentReactRequest {
                comment_id: "1".to_string(),
                user_id: user.user_id,
                emoji: Some("👍".to_string()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
