//! Author and book resource flows over the full router.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use serde_json::{json, Value};

use stacks_app::modules::authors::models::AuthorData;
use stacks_app::modules::authors::repository::AuthorRepo;
use stacks_app::modules::books::models::BookData;
use stacks_app::modules::books::repository::BookRepo;

use common::{spawn_app, TestApp};

struct Harness {
    app: TestApp,
    token: String,
}

impl Harness {
    async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.app.request("GET", path, Some(&self.token), None).await
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.app
            .request("POST", path, Some(&self.token), Some(body))
            .await
    }

    async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.app
            .request("PUT", path, Some(&self.token), Some(body))
            .await
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.app
            .request("DELETE", path, Some(&self.token), None)
            .await
    }
}

/// Two authors and two books, one book per author.
async fn seeded() -> Harness {
    let app = spawn_app().await;

    let authors = AuthorRepo::new(app.db.clone());
    let books = BookRepo::new(app.db.clone());

    for n in 1..=2 {
        let author = authors
            .insert(&AuthorData {
                first_name: format!("Author{n}"),
                last_name: format!("Surname{n}"),
                birth_date: NaiveDate::from_ymd_opt(1960 + n, 1, 1),
                biography: Some(format!("About {n}")),
            })
            .await
            .expect("seed author");

        books
            .insert(&BookData {
                title: format!("Book {n}"),
                isbn: "a1a1a1a1a1a".to_string(),
                publication_date: NaiveDate::from_ymd_opt(2020, 3, 3).expect("date"),
                author_id: author.id,
            })
            .await
            .expect("seed book");
    }

    let token = app.tokens.issue("user1").expect("token");
    Harness { app, token }
}

#[tokio::test]
async fn list_authors_returns_full_shape() {
    let h = seeded().await;

    let (status, body) = h.get("/api/authors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "id": 1,
                "first_name": "Author1",
                "last_name": "Surname1",
                "birth_date": "1961-01-01",
                "biography": "About 1"
            },
            {
                "id": 2,
                "first_name": "Author2",
                "last_name": "Surname2",
                "birth_date": "1962-01-01",
                "biography": "About 2"
            }
        ])
    );
}

#[tokio::test]
async fn list_authors_honors_pagination() {
    let h = seeded().await;

    let (status, body) = h.get("/api/authors?per_page=1&page=2").await;

    assert_eq!(status, StatusCode::OK);
    let page = body.as_array().expect("array");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["first_name"], "Author2");
}

#[tokio::test]
async fn list_authors_accepts_search_param() {
    let h = seeded().await;

    let (status, body) = h.get("/api/authors?q=Author").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn get_author_by_id() {
    let h = seeded().await;

    let (status, body) = h.get("/api/authors/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["first_name"], "Author1");
    assert_eq!(body["birth_date"], "1961-01-01");
}

#[tokio::test]
async fn missing_author_returns_not_found() {
    let h = seeded().await;

    let (status, body) = h.get("/api/authors/444").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Entity 444 doesn't exist" }));
}

#[tokio::test]
async fn author_create_update_delete_flow() {
    let h = seeded().await;

    let (status, created) = h
        .post(
            "/api/authors",
            json!({ "first_name": "Author3", "last_name": "Surname3" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 3);
    assert_eq!(created["birth_date"], Value::Null);

    let (_, listed) = h.get("/api/authors").await;
    assert_eq!(listed.as_array().expect("array").len(), 3);

    let (status, updated) = h
        .put(
            "/api/authors/3",
            json!({
                "first_name": "Author3",
                "last_name": "Renamed",
                "biography": "About 3"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(updated["last_name"], "Renamed");
    assert_eq!(updated["biography"], "About 3");

    let (status, body) = h.delete("/api/authors/3").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = h.get("/api/authors/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_author_reports_every_violation() {
    let h = seeded().await;

    let (status, body) = h.post("/api/authors", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(
        body["errors"]["first_name"],
        json!(["Missing data for required field."])
    );
    assert_eq!(
        body["errors"]["last_name"],
        json!(["Missing data for required field."])
    );
}

#[tokio::test]
async fn create_author_rejects_unknown_fields_and_bad_types() {
    let h = seeded().await;

    let (status, body) = h
        .post(
            "/api/authors",
            json!({
                "first_name": 7,
                "last_name": "Surname",
                "nickname": "x"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["first_name"], json!(["Not a valid string."]));
    assert_eq!(body["errors"]["nickname"], json!(["Unknown field."]));
}

#[tokio::test]
async fn update_missing_author_returns_not_found_before_validation() {
    let h = seeded().await;

    let (status, body) = h.put("/api/authors/444", json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Entity 444 doesn't exist" }));
}

#[tokio::test]
async fn update_author_keeps_omitted_optional_fields() {
    let h = seeded().await;

    let (status, body) = h
        .put(
            "/api/authors/1",
            json!({ "first_name": "Renamed", "last_name": "Surname1" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["first_name"], "Renamed");
    assert_eq!(body["birth_date"], "1961-01-01");
    assert_eq!(body["biography"], "About 1");
}

#[tokio::test]
async fn list_books_embeds_author_projection() {
    let h = seeded().await;

    let (status, body) = h.get("/api/books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "id": 1,
                "title": "Book 1",
                "isbn": "a1a1a1a1a1a",
                "publication_date": "2020-03-03",
                "author": { "id": 1, "first_name": "Author1", "last_name": "Surname1" }
            },
            {
                "id": 2,
                "title": "Book 2",
                "isbn": "a1a1a1a1a1a",
                "publication_date": "2020-03-03",
                "author": { "id": 2, "first_name": "Author2", "last_name": "Surname2" }
            }
        ])
    );
}

#[tokio::test]
async fn missing_book_returns_not_found() {
    let h = seeded().await;

    let (status, body) = h.get("/api/books/444").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Entity 444 doesn't exist" }));
}

#[tokio::test]
async fn create_book_reports_every_violation() {
    let h = seeded().await;

    let (status, body) = h.post("/api/books", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["title", "isbn", "publication_date", "author_id"] {
        assert_eq!(
            body["errors"][field],
            json!(["Missing data for required field."]),
            "field {field}"
        );
    }
}

#[tokio::test]
async fn create_book_rejects_unknown_author() {
    let h = seeded().await;

    let (status, body) = h
        .post(
            "/api/books",
            json!({
                "title": "Book 3",
                "isbn": "c3c3c3c3c3c",
                "publication_date": "2022-05-05",
                "author_id": 444
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["author_id"],
        json!(["Author id 444 does not exist."])
    );
}

#[tokio::test]
async fn create_book_rejects_out_of_bounds_isbn() {
    let h = seeded().await;

    let (status, body) = h
        .post(
            "/api/books",
            json!({
                "title": "Book 3",
                "isbn": "short",
                "publication_date": "2022-05-05",
                "author_id": 1
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["isbn"],
        json!(["Length must be between 10 and 13."])
    );
}

#[tokio::test]
async fn book_create_update_delete_flow() {
    let h = seeded().await;

    let (status, created) = h
        .post(
            "/api/books",
            json!({
                "title": "Book 3",
                "isbn": "c3c3c3c3c3c",
                "publication_date": "2022-05-05",
                "author_id": 2
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 3);
    assert_eq!(created["author"]["first_name"], "Author2");

    let (status, updated) = h
        .put(
            "/api/books/3",
            json!({
                "title": "Book 3 Revised",
                "isbn": "c3c3c3c3c3c",
                "publication_date": "2022-05-05",
                "author_id": 1
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(updated["title"], "Book 3 Revised");
    assert_eq!(updated["author"]["id"], 1);

    let (status, _) = h.delete("/api/books/3").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = h.get("/api/books/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn author_books_listing_omits_author_key() {
    let h = seeded().await;

    let (status, body) = h.get("/api/authors/1/books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {
                "id": 1,
                "title": "Book 1",
                "isbn": "a1a1a1a1a1a",
                "publication_date": "2020-03-03"
            }
        ])
    );
}

#[tokio::test]
async fn author_books_for_missing_author_returns_not_found() {
    let h = seeded().await;

    let (status, body) = h.get("/api/authors/444/books").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Entity 444 doesn't exist" }));
}

#[tokio::test]
async fn deleting_author_orphans_their_books() {
    let h = seeded().await;

    let (status, _) = h.delete("/api/authors/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = h.get("/api/books/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"], Value::Null);
}

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let h = seeded().await;

    let (status, body) = h.app.request("GET", "/api/authors", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Missing Authorization Header" }));

    let (status, body) = h
        .app
        .request("GET", "/api/books", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid token" }));
}
