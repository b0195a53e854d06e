//! HTTP handlers for the books module.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use bookshelf_http::{error::AppError, response::ApiSuccess};
use serde::Serialize;

use super::error::{BookError, ValidationError};
use super::models::{Book, BookFilter, BookPayload, BookQuery, BookSummary};
use super::store::BookStore;

/// Operation a failure message is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    fn failure_prefix(self) -> &'static str {
        match self {
            Action::Create => "Gagal menambahkan buku",
            Action::Read => "Buku tidak ditemukan",
            Action::Update => "Gagal memperbarui buku",
            Action::Delete => "Buku gagal dihapus",
        }
    }

    /// Translate a store failure into the response for this operation.
    fn reject(self, err: BookError) -> AppError {
        match err {
            BookError::Validation(validation) => {
                let reason = match validation {
                    ValidationError::MissingName => "Mohon isi nama buku",
                    ValidationError::ReadPageExceedsPageCount => {
                        "readPage tidak boleh lebih besar dari pageCount"
                    }
                };
                AppError::validation(
                    validation.code(),
                    format!("{}. {}", self.failure_prefix(), reason),
                )
            }
            BookError::NotFound(_) => match self {
                Action::Read | Action::Create => AppError::not_found(Action::Read.failure_prefix()),
                Action::Update | Action::Delete => {
                    AppError::not_found(format!("{}. Id tidak ditemukan", self.failure_prefix()))
                }
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedBook {
    book_id: String,
}

#[derive(Debug, Serialize)]
struct BookList {
    books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
struct BookDetail {
    book: Book,
}

/// Routes of the books module, relative to its mount point.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route(
            "/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

/// POST /books
async fn create_book(
    State(store): State<Arc<BookStore>>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiSuccess<CreatedBook>, AppError> {
    let Json(payload) = payload?;
    let book_id = store
        .create(payload)
        .await
        .map_err(|err| Action::Create.reject(err))?;

    tracing::info!(target: "project.books", %book_id, "book created");
    Ok(ApiSuccess::created(
        "Buku berhasil ditambahkan",
        CreatedBook { book_id },
    ))
}

/// GET /books?name=&reading=&finished=
async fn list_books(
    State(store): State<Arc<BookStore>>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> Result<ApiSuccess<BookList>, AppError> {
    let Query(query) = query?;
    let filter = BookFilter::from_query(&query);
    let books = store.list(&filter).await;

    tracing::debug!(target: "project.books", count = books.len(), ?filter, "books listed");
    Ok(ApiSuccess::ok(BookList { books }))
}

/// GET /books/{bookId}
async fn get_book(
    State(store): State<Arc<BookStore>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiSuccess<BookDetail>, AppError> {
    let Path(book_id) = path?;
    let book = store
        .get(&book_id)
        .await
        .map_err(|err| Action::Read.reject(err))?;

    Ok(ApiSuccess::ok(BookDetail { book }))
}

/// PUT /books/{bookId}
///
/// An unknown id is reported before anything wrong with the body.
async fn update_book(
    State(store): State<Arc<BookStore>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiSuccess<()>, AppError> {
    let Path(book_id) = path?;
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            if !store.contains(&book_id).await {
                tracing::debug!(target: "project.books", %book_id, %rejection, "unknown book with unreadable body");
                return Err(Action::Update.reject(BookError::NotFound(book_id)));
            }
            return Err(rejection.into());
        }
    };

    store
        .update(&book_id, payload)
        .await
        .map_err(|err| Action::Update.reject(err))?;

    tracing::info!(target: "project.books", %book_id, "book updated");
    Ok(ApiSuccess::message("Buku berhasil diperbarui"))
}

/// DELETE /books/{bookId}
async fn delete_book(
    State(store): State<Arc<BookStore>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiSuccess<()>, AppError> {
    let Path(book_id) = path?;
    store
        .delete(&book_id)
        .await
        .map_err(|err| Action::Delete.reject(err))?;

    tracing::info!(target: "project.books", %book_id, "book deleted");
    Ok(ApiSuccess::message("Buku berhasil dihapus"))
}
