use crate::error::{DrillError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub issued: bool,
}

impl Book {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            issued: false,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} : {}", self.id, self.title, self.issued)
    }
}

/// Books keyed by id, listed in the order they were added.
#[derive(Debug, Default)]
pub struct Library {
    books: IndexMap<String, Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, book: Book) -> Result<()> {
        if self.books.contains_key(&book.id) {
            return Err(DrillError::duplicate("book", &book.id));
        }
        self.books.insert(book.id.clone(), book);
        Ok(())
    }

    /// Adds a book under a freshly generated id and returns it.
    pub fn add_title(&mut self, title: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let key = id.to_string();
        self.books.insert(key.clone(), Book::new(key, title));
        id
    }

    pub fn issue(&mut self, id: &str) -> Result<()> {
        let book = self.book_mut(id)?;
        if book.issued {
            return Err(DrillError::AlreadyIssued(id.to_string()));
        }
        book.issued = true;
        info!(book = id, "issued");
        Ok(())
    }

    pub fn return_book(&mut self, id: &str) -> Result<()> {
        let book = self.book_mut(id)?;
        if !book.issued {
            return Err(DrillError::NotIssued(id.to_string()));
        }
        book.issued = false;
        info!(book = id, "returned");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn available(&self) -> Vec<&Book> {
        self.books.values().filter(|b| !b.issued).collect()
    }

    pub fn issued(&self) -> Vec<&Book> {
        self.books.values().filter(|b| b.issued).collect()
    }

    /// One `id : title : issued` line per book.
    pub fn list(&self) -> Vec<String> {
        self.books.values().map(Book::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn book_mut(&mut self, id: &str) -> Result<&mut Book> {
        self.books
            .get_mut(id)
            .ok_or_else(|| DrillError::not_found("book", id))
    }
}
