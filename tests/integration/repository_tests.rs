//! Repository tests against a live PostgreSQL reachable through `DATABASE_URL`

use std::collections::HashSet;

use cbs_catalog::{
    models::{Author, Book, Level, Page, Tag, TagSet},
    repository::{BookRepository, CrudRepository, Repository, TagRepository},
};
use sqlx::postgres::PgPoolOptions;

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn author(repo: &Repository) -> Author {
    repo.authors
        .save(&Author {
            id: 0,
            name: unique("author"),
            biography: String::new(),
        })
        .await
        .expect("Failed to save author")
}

async fn tags(repo: &Repository, count: usize) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(count);
    for i in 0..count {
        let tag = repo
            .tags
            .save(&Tag::new(0, unique(&format!("tag{}", i))))
            .await
            .expect("Failed to save tag");
        tags.push(tag);
    }
    tags
}

fn book(author_id: i32, tags: &[Tag]) -> Book {
    Book {
        id: 0,
        title: unique("title"),
        author_id,
        publication_year: 2021,
        isbn: "978-1-7185-0044-0".to_string(),
        level: Level::Intermediate,
        description: String::new(),
        available: true,
        tags: tags.iter().cloned().collect(),
    }
}

fn ids(tags: &[Tag]) -> HashSet<i32> {
    tags.iter().map(|t| t.id).collect()
}

/// `(tag_id, xmin)` of every association row of a book. `xmin` changes
/// whenever a row is rewritten, so equal pairs mean the row was left alone.
async fn association_versions(repo: &Repository, book_id: i32) -> Vec<(i32, String)> {
    sqlx::query_as("SELECT tag_id, xmin::text FROM book_tags WHERE book_id = $1 ORDER BY tag_id")
        .bind(book_id)
        .fetch_all(&repo.pool)
        .await
        .expect("Failed to read book_tags")
}

async fn book_ids(repo: &Repository) -> Vec<i32> {
    sqlx::query_scalar("SELECT id FROM book ORDER BY id")
        .fetch_all(&repo.pool)
        .await
        .expect("Failed to read book ids")
}

#[tokio::test]
#[ignore]
async fn test_save_then_find_keeps_tag_set() {
    let repo = repository().await;
    let author = author(&repo).await;
    let tags = tags(&repo, 3).await;

    let saved = repo.books.save(&book(author.id, &tags)).await.unwrap();
    let found = repo.books.find_by_id(saved.id).await.unwrap().unwrap();

    assert_eq!(found.tags.ids(), ids(&tags));
    assert_eq!(found.level, Level::Intermediate);
    for tag in &tags {
        assert_eq!(found.tags.get(tag.id).map(|t| t.name.as_str()), Some(tag.name.as_str()));
    }

    let by_book = repo.tags.find_by_book_id(saved.id).await.unwrap();
    assert_eq!(ids(&by_book), ids(&tags));
}

#[tokio::test]
#[ignore]
async fn test_book_without_tags_is_listed() {
    let repo = repository().await;
    let author = author(&repo).await;

    let saved = repo.books.save(&book(author.id, &[])).await.unwrap();

    let found = repo.books.find_by_id(saved.id).await.unwrap().unwrap();
    assert!(found.tags.is_empty());

    let by_author = repo.books.find_by_author_id(author.id).await.unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].id, saved.id);

    // A page wide enough to reach the new id
    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book WHERE id < $1")
        .bind(saved.id)
        .fetch_one(&repo.pool)
        .await
        .unwrap();
    let listed = repo.books.find_all(Page::new(0, before + 16)).await.unwrap();
    let listed = listed.iter().find(|b| b.id == saved.id).expect("book missing from find_all");
    assert!(listed.tags.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_find_all_pages_by_id() {
    let repo = repository().await;
    let author = author(&repo).await;
    let tags = tags(&repo, 1).await;

    for i in 0..30 {
        let tagged: &[Tag] = if i % 2 == 0 { &tags } else { &[] };
        repo.books.save(&book(author.id, tagged)).await.unwrap();
    }

    // Other tests write concurrently; retry until the id snapshot is stable around the read
    for _ in 0..5 {
        let snapshot = book_ids(&repo).await;
        let page = repo.books.find_all(Page::new(2, 10)).await.unwrap();
        if book_ids(&repo).await != snapshot {
            continue;
        }

        let expected: Vec<i32> = snapshot.iter().skip(20).take(10).copied().collect();
        let found: Vec<i32> = page.iter().map(|b| b.id).collect();
        assert_eq!(found.len(), 10);
        assert_eq!(found, expected);
        return;
    }
    panic!("book table never settled");
}

#[tokio::test]
#[ignore]
async fn test_update_applies_tag_diff() {
    let repo = repository().await;
    let author = author(&repo).await;
    let tags = tags(&repo, 4).await;

    let saved = repo.books.save(&book(author.id, &tags[0..3])).await.unwrap();
    let original = association_versions(&repo, saved.id).await;

    let desired = Book {
        tags: tags[1..4].iter().cloned().collect(),
        level: Level::Advanced,
        ..saved.clone()
    };
    assert!(repo.books.update(&desired).await.unwrap());

    let found = repo.books.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(found.tags.ids(), ids(&tags[1..4]));
    assert_eq!(found.level, Level::Advanced);

    // Rows kept from the current set are not rewritten
    let updated = association_versions(&repo, saved.id).await;
    let kept: Vec<(i32, String)> = original
        .iter()
        .filter(|(tag_id, _)| *tag_id == tags[1].id || *tag_id == tags[2].id)
        .cloned()
        .collect();
    assert_eq!(kept.len(), 2);
    for row in &kept {
        assert!(updated.contains(row), "row {:?} was rewritten", row);
    }
    assert!(!updated.iter().any(|(tag_id, _)| *tag_id == tags[0].id));

    // Same set again leaves the association untouched
    assert!(repo.books.update(&desired).await.unwrap());
    let again = repo.books.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(again, found);
    assert_eq!(association_versions(&repo, saved.id).await, updated);

    let cleared = Book {
        tags: TagSet::new(),
        ..desired
    };
    assert!(repo.books.update(&cleared).await.unwrap());
    let found = repo.books.find_by_id(saved.id).await.unwrap().unwrap();
    assert!(found.tags.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_missing_book() {
    let repo = repository().await;

    assert!(repo.books.find_by_id(i32::MAX).await.unwrap().is_none());

    let ghost = Book {
        id: i32::MAX,
        ..book(1, &[])
    };
    assert!(!repo.books.update(&ghost).await.unwrap());
    assert!(!repo.books.delete_by_id(i32::MAX).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_books_by_tag_carry_full_tag_set() {
    let repo = repository().await;
    let author = author(&repo).await;
    let tags = tags(&repo, 2).await;

    let first = repo.books.save(&book(author.id, &tags)).await.unwrap();
    let second = repo.books.save(&book(author.id, &tags[0..1])).await.unwrap();

    let found = repo.books.find_by_tag_id(tags[0].id, Page::new(0, 10)).await.unwrap();
    let found_ids: Vec<i32> = found.iter().map(|b| b.id).collect();
    assert_eq!(found_ids, vec![first.id, second.id]);
    assert_eq!(found[0].tags.len(), 2);

    let second_page = repo.books.find_by_tag_id(tags[0].id, Page::new(1, 1)).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].id, second.id);

    let past_end = repo.books.find_by_tag_id(tags[0].id, Page::new(5, 10)).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_delete_removes_associations() {
    let repo = repository().await;
    let author = author(&repo).await;
    let tags = tags(&repo, 2).await;

    let saved = repo.books.save(&book(author.id, &tags)).await.unwrap();
    assert!(repo.books.delete_by_id(saved.id).await.unwrap());

    assert!(repo.books.find_by_id(saved.id).await.unwrap().is_none());
    assert!(repo.tags.find_by_book_id(saved.id).await.unwrap().is_empty());
    // The tags themselves survive
    assert!(repo.tags.find_by_id(tags[0].id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore]
async fn test_unknown_tag_is_rejected_atomically() {
    let repo = repository().await;
    let author = author(&repo).await;

    let mut draft = book(author.id, &[]);
    draft.tags.insert(Tag::new(i32::MAX, "ghost"));

    let err = repo.books.save(&draft).await.unwrap_err();
    assert!(err.is_constraint_violation());

    let by_author = repo.books.find_by_author_id(author.id).await.unwrap();
    assert!(by_author.is_empty());
}
