//! Blob storage capability: upload bytes under a path, resolve a public URL.

use std::future::Future;

use crate::error::Result;

/// Reference to an uploaded blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobHandle {
    pub path: String,
}

pub trait BlobStore {
    fn upload(&self, path: &str, bytes: Vec<u8>) -> impl Future<Output = Result<BlobHandle>>;

    fn public_url(&self, handle: &BlobHandle) -> impl Future<Output = Result<String>>;
}
