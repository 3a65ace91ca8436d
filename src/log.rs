//! Conditional logging macros.
//!
//! Modules log through `crate::log::{debug, trace, warn}`. With the `tracing`
//! feature those are the `tracing` macros; without it they swallow their
//! arguments.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};

#[cfg(test)]
mod tests {
    use super::{debug, trace, warn};

    // Compiled in every feature configuration, so a default build that
    // cannot resolve the shims fails here.
    #[test]
    fn shims_accept_structured_fields() {
        let league = "nhl";
        debug!(league = %league, count = 3, "debug");
        trace!(depth = 2_usize, "trace");
        warn!(dropped = 1, "warn");
    }
}
