//! Asset readiness bookkeeping (the loading itself is the host's job).

pub mod preload;
