use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

/// Cooperative cancellation shared between the signal watcher and the
/// mutation loop. Tripping is terminal; the first signal recorded wins.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    // 0 = armed, nonzero = the signal number that tripped us.
    signo: Arc<AtomicI32>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self, signo: i32) {
        if signo == 0 {
            return;
        }
        let _ = self
            .signo
            .compare_exchange(0, signo, Ordering::SeqCst, Ordering::SeqCst);
    }

    pub fn is_tripped(&self) -> bool {
        self.signo.load(Ordering::SeqCst) != 0
    }

    pub fn signal(&self) -> Option<i32> {
        match self.signo.load(Ordering::SeqCst) {
            0 => None,
            n => Some(n),
        }
    }
}

pub fn describe_signal(signo: i32) -> String {
    match signo {
        1 => "SIGHUP".to_string(),
        2 => "SIGINT".to_string(),
        15 => "SIGTERM".to_string(),
        n => format!("signal {n}"),
    }
}
