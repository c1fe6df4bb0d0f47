//! Testing utilities for mongoward.

use std::time::Duration;

use crate::replset::DialParams;

/// Builds dial parameters for a single local endpoint, for testing
/// purposes.
pub fn local_dial(port: u16) -> DialParams {
    DialParams::new(
        vec![format!("127.0.0.1:{}", port)],
        Duration::from_secs(5),
    )
}
