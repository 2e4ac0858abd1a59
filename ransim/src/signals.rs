use nix::sys::signal::{SigSet, Signal};
use ransim_core::CancelToken;
use std::thread;

const WATCHED: [Signal; 3] = [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP];

/// Mask the watched signals in the calling thread and hand delivery to a
/// dedicated watcher, which trips the token. Must run before any other
/// thread spawns so the mask is inherited everywhere and `sigwait` is the
/// only consumer.
pub fn spawn_watcher(token: CancelToken) -> std::io::Result<()> {
    let mut mask = SigSet::empty();
    for sig in WATCHED {
        mask.add(sig);
    }
    mask.thread_block().map_err(std::io::Error::from)?;

    thread::Builder::new()
        .name("signal-watcher".into())
        .spawn(move || {
            loop {
                match mask.wait() {
                    Ok(sig) => {
                        tracing::debug!(signal = %sig, "signal received");
                        token.trip(sig as i32);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "signal wait failed");
                        break;
                    }
                }
            }
        })?;

    Ok(())
}
