//! Result type aliases for docstore operations.

use crate::DocstoreError;

/// A specialized `Result` type for docstore persistence operations.
pub type DocstoreResult<T> = Result<T, DocstoreError>;

/// A boxed future returning a `DocstoreResult`.
pub type BoxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = DocstoreResult<T>> + Send + 'a>>;
