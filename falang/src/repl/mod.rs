//! Interactive session support: a persistent typed environment that lives
//! across evaluations, so variables defined on one line are visible on the
//! next.

mod session;

pub use session::ReplSession;
