use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// A countdown latch. Waiters block until the count reaches zero; once
/// there it stays there.
///
/// With a count of one it is a start gate that releases every waiter at
/// once. With a count of N it is a completion signal for N workers.
#[derive(Debug)]
pub struct Latch {
    count: Mutex<usize>,
    condvar: Condvar,
}

impl Latch {
    pub fn new(count: usize) -> Self {
        Self { count: Mutex::new(count), condvar: Condvar::new() }
    }

    // The counter is a plain integer updated in one step, so a poisoned
    // lock still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, usize> {
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn count(&self) -> usize {
        *self.lock()
    }

    /// Decrements the count, waking all waiters when it hits zero. A no-op
    /// once the latch is open.
    pub fn count_down(&self) {
        let mut count = self.lock();
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            self.condvar.notify_all();
        }
    }

    /// Blocks until the count is zero. Spurious wake-ups are absorbed.
    pub fn wait(&self) {
        let guard = self.lock();
        let _guard = self
            .condvar
            .wait_while(guard, |count| *count > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Returns a guard that counts down once when dropped, including
    /// during unwinding.
    pub fn guard(&self) -> CountDown<'_> {
        CountDown { latch: self }
    }
}

#[must_use = "the latch counts down when the guard is dropped"]
pub struct CountDown<'a> {
    latch: &'a Latch,
}

impl Drop for CountDown<'_> {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_zero_count_never_blocks() {
        let latch = Latch::new(0);
        latch.wait();
        latch.count_down();
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn test_gate_releases_all_waiters() {
        let gate = Arc::new(Latch::new(1));
        let released = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let released = Arc::clone(&released);
                thread::spawn(move || {
                    gate.wait();
                    released.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        assert_eq!(released.load(Ordering::SeqCst), 0);

        gate.count_down();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(released.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_waits_for_every_count_down() {
        let done = Latch::new(3);
        let finished = AtomicUsize::new(0);
        thread::scope(|s| {
            for _ in 0..3 {
                s.spawn(|| {
                    thread::sleep(Duration::from_millis(5));
                    finished.fetch_add(1, Ordering::SeqCst);
                    done.count_down();
                });
            }
            done.wait();
            assert_eq!(finished.load(Ordering::SeqCst), 3);
        });
    }

    #[test]
    fn test_guard_counts_down_on_panic() {
        let done = Arc::new(Latch::new(1));
        let worker = {
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let _countdown = done.guard();
                panic!("worker failed");
            })
        };
        assert!(worker.join().is_err());
        done.wait();
        assert_eq!(done.count(), 0);
    }
}
