//! Storage adapters: in-memory repositories (test doubles) and the
//! Supabase object-storage client.

mod in_memory;
mod supabase;

pub use in_memory::{InMemoryApplicantRepository, InMemoryDocumentRepository, InMemoryFileStorage};
pub use supabase::SupabaseFileStorage;
