//! In-memory implementation of BookRepository.
//!
//! This module provides a HashMap-based repository for tests and dry runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use storyloom_core::{BookId, PersistRequest};
use storyloom_error::PersistenceError;
use storyloom_interface::BookRepository;
use tokio::sync::RwLock;

/// In-memory repository for finished books.
///
/// Stores books in a HashMap protected by an RwLock for thread-safe access.
/// All data is lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    books: Arc<RwLock<HashMap<BookId, PersistRequest>>>,
    next_id: Arc<RwLock<u64>>,
}

impl InMemoryBookRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a stored book.
    pub async fn get(&self, id: &BookId) -> Option<PersistRequest> {
        self.books.read().await.get(id).cloned()
    }

    /// Get the number of stored books.
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    /// Check if the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn persist(&self, request: &PersistRequest) -> Result<BookId, PersistenceError> {
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let id = BookId::from(format!("book-{}", *next_id));
        self.books.write().await.insert(id.clone(), request.clone());
        Ok(id)
    }
}
