use std::thread;
use std::time::Duration;

use log::debug;

const REQUEST_PAUSE_SECS: u64 = 2;

/// Fixed pause between search requests. Reddit paces clients per-request,
/// so this runs after every call, empty result pages included.
pub fn courtesy_pause() {
    debug!("Pausing {}s before next request...", REQUEST_PAUSE_SECS);
    thread::sleep(Duration::from_secs(REQUEST_PAUSE_SECS));
}
