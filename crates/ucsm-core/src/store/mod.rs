// ── Local object cache ──
//
// Per-controller memo of class queries, cleared after a successful commit.

mod cache;

pub use cache::ObjectCache;
