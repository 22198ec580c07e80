//! Wiki collaborators: page existence and wiki word syntax.

/// Page stores
mod page_store;
/// `WikiWord` detection
mod wiki_word;

pub use page_store::{
    CachedPageStore,
    DirectoryPageStore,
    MemoryPageStore,
    PageStore,
    PageStoreError,
};
pub use wiki_word::is_wiki_word;
