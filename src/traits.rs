//! The seam between binding generation and the window manager that executes
//! the bindings.
//!
//! Window movement, hotkey capture and the binding registry all belong to
//! the host.  slategrid only needs to hand it `(hotkey, operation)` pairs, so
//! that is the whole trait.  Concrete hosts live in [`host`](crate::host).

use crate::operation::{Hotkey, Operation};

/// Abstraction over a window manager's binding registry.
///
/// An implementation might emit a config script for the real host, keep the
/// bindings in memory, or be a test double.
///
/// # Contract
///
/// * Registering a hotkey that is already bound replaces the earlier
///   binding.
/// * [`Move`](Operation::Move) rectangles are deferred: a host that executes
///   them must evaluate against the screen size current at invocation time.
pub trait Host {
    /// The error type produced by this host.
    type Error: std::error::Error + Send + 'static;

    /// Register `operation` under `hotkey`.
    fn bind(&mut self, hotkey: &Hotkey, operation: &Operation) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{BindingDriver, SingletonKeys};
    use crate::grid::Grid;
    use crate::layout::{GridLayout, ScreenMargins};

    //  Mock Host

    /// A test double that records every call and fails after `budget` binds.
    #[derive(Debug, Default)]
    struct MockHost {
        log: Vec<String>,
        budget: Option<usize>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock host full")]
    struct MockError;

    impl Host for MockHost {
        type Error = MockError;

        fn bind(&mut self, hotkey: &Hotkey, operation: &Operation) -> Result<(), MockError> {
            if self.budget == Some(self.log.len()) {
                return Err(MockError);
            }
            self.log.push(format!("{} {}", hotkey, operation.kind()));
            Ok(())
        }
    }

    fn tiny_layout() -> GridLayout {
        let grid = Grid::from_rows(&["ab", "cd"]).unwrap();
        GridLayout::new(grid, ScreenMargins::default(), 0.0).unwrap()
    }

    #[test]
    fn mock_host_records_bindings_in_order() {
        let layout = tiny_layout();
        let keys = SingletonKeys::default();
        let mut host = MockHost::default();
        let n = BindingDriver::new(&layout, &keys, &[])
            .install(&mut host)
            .unwrap();
        // 4 escapes, 4 self-pairs, 6 distinct pairs both ways, 6 singletons.
        assert_eq!(n, 4 + 4 + 12 + 6);
        assert_eq!(host.log.len(), n);
        assert_eq!(host.log[0], "esc:a,alt,shift noop");
        assert_eq!(host.log[1], "a:a,alt,shift move");
        assert_eq!(host.log[2], "b:a,alt,shift move");
        assert_eq!(host.log[3], "a:b,alt,shift move");
    }

    #[test]
    fn host_failure_names_the_hotkey() {
        let layout = tiny_layout();
        let keys = SingletonKeys::default();
        let mut host = MockHost {
            budget: Some(2),
            ..Default::default()
        };
        let err = BindingDriver::new(&layout, &keys, &[])
            .install(&mut host)
            .unwrap_err();
        assert_eq!(err.hotkey, "b:a,alt,shift");
        assert_eq!(err.to_string(), "host rejected binding b:a,alt,shift: mock host full");
        assert_eq!(host.log.len(), 2);
    }
}
