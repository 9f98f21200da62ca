// Ctrl+C handling. The handler only raises a shared flag; the dispatcher
// and the readiness waiter check it after every blocking step and the menu
// loop then takes its normal goodbye path. Children in the same process
// group still receive the signal and exit on their own.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    raised: Arc<AtomicBool>,
}

impl Interrupt {
    /// Install the process-wide Ctrl+C handler. Call once from `main`.
    pub fn install() -> Result<Self> {
        let interrupt = Interrupt::default();
        let handle = interrupt.clone();
        ctrlc::set_handler(move || handle.raise()).context("Failed to install Ctrl+C handler")?;
        Ok(interrupt)
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let interrupt = Interrupt::default();
        let other = interrupt.clone();
        assert!(!interrupt.is_raised());
        other.raise();
        assert!(interrupt.is_raised());
    }
}
