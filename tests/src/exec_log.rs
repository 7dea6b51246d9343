use crate::logging_driver::DriverOp;
use cascade_core::driver::{Operation, Rows};
use std::sync::{Arc, Mutex};

/// A wrapper around the operations log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged operations
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Count operations matching the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DriverOp) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(*op))
            .count()
    }

    /// Number of operations issued against `model`
    pub fn ops_on(&self, model: &str) -> usize {
        self.count(|op| op.model == model)
    }

    /// Number of delete operations issued against `model`
    pub fn deletes_on(&self, model: &str) -> usize {
        self.count(|op| op.model == model && op.operation.is_delete())
    }

    pub fn filter_deletes_on(&self, model: &str) -> usize {
        self.count(|op| op.model == model && matches!(op.operation, Operation::DeleteByFilter(_)))
    }

    pub fn key_deletes_on(&self, model: &str) -> usize {
        self.count(|op| op.model == model && matches!(op.operation, Operation::DeleteByKey(_)))
    }

    /// Row counts reported by the delete operations against `model`, in
    /// order.
    pub fn delete_counts(&self, model: &str) -> Vec<u64> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.model == model && op.operation.is_delete())
            .filter_map(|op| match op.response.rows {
                Rows::Count(count) => Some(count),
                Rows::Records(_) => None,
            })
            .collect()
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Get access to all operations for custom assertions
    pub fn with_ops<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[DriverOp]) -> R,
    {
        let ops = self.ops.lock().unwrap();
        f(&ops)
    }
}
