// src/progress.rs
// =============================================================================
// Progress reporting.
//
// A crawl reports (completed, total) after every page or repository entry.
// Callers pass anything implementing Progress; plain closures work:
//
//   let mut seen = Vec::new();
//   crawler.crawl(url, &mut |done, total| seen.push((done, total))).await;
//
// The callback runs on the crawling task, between requests. A panic inside it
// is caught and logged so the crawl keeps going.
// =============================================================================

use std::panic::{self, AssertUnwindSafe};

pub trait Progress {
    fn report(&mut self, completed: usize, total: usize);
}

impl<F> Progress for F
where
    F: FnMut(usize, usize),
{
    fn report(&mut self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// A Progress that ignores every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _completed: usize, _total: usize) {}
}

// Calls the callback, swallowing any panic it raises
pub(crate) fn report_guarded(progress: &mut dyn Progress, completed: usize, total: usize) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| progress.report(completed, total)));
    if outcome.is_err() {
        ::log::warn!(
            "Progress callback panicked at {}/{}; continuing crawl",
            completed,
            total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_receives_reports() {
        let mut seen = Vec::new();
        {
            let mut callback = |done: usize, total: usize| seen.push((done, total));
            report_guarded(&mut callback, 1, 3);
            report_guarded(&mut callback, 2, 3);
        }
        assert_eq!(seen, vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn test_panicking_callback_is_contained() {
        let mut calls = 0;
        {
            let mut callback = |_: usize, _: usize| {
                calls += 1;
                panic!("ui went away");
            };
            report_guarded(&mut callback, 1, 1);
            report_guarded(&mut callback, 2, 2);
        }
        assert_eq!(calls, 2);
    }
}
