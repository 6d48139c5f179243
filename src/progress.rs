/// Progress checkpoint before either page is fetched
pub const FETCH_STARTED: u8 = 10;

/// Progress checkpoint once both pages are fetched
pub const FETCH_COMPLETE: u8 = 50;

/// Progress checkpoint once the result is assembled
pub const COMPARISON_COMPLETE: u8 = 100;

/// Receives coarse progress updates from a comparison run
pub trait ProgressSink {
    fn on_progress(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8),
{
    fn on_progress(&self, percent: u8) {
        self(percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closures_receive_progress() {
        let seen = RefCell::new(Vec::new());
        let sink = |percent: u8| seen.borrow_mut().push(percent);
        sink.on_progress(FETCH_STARTED);
        sink.on_progress(COMPARISON_COMPLETE);
        assert_eq!(*seen.borrow(), vec![10, 100]);
    }
}
