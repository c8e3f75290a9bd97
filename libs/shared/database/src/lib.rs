pub mod store;

pub use store::{BlobStore, FileBlobStore, MemoryBlobStore, StoreError};
