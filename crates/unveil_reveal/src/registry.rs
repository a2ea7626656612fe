//! Mount-scoped reveal registry
//!
//! Publishes each mounted provider's [`RevealHandle`] under a [`MountId`], so
//! descendants anywhere in the host tree can trigger a reveal without the
//! handle being threaded through every layer. One registry per host tree;
//! nothing here is process-global.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::provider::RevealHandle;

new_key_type! {
    /// Identifies one mounted provider within a registry
    pub struct MountId;
}

/// Shared table of mounted providers. Clones share the same table.
#[derive(Clone, Default)]
pub struct RevealRegistry {
    mounts: Rc<RefCell<SlotMap<MountId, RevealHandle>>>,
}

impl RevealRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, handle: RevealHandle) -> MountId {
        self.mounts.borrow_mut().insert(handle)
    }

    pub(crate) fn unregister(&self, id: MountId) {
        self.mounts.borrow_mut().remove(id);
    }

    /// Reveal trigger of the provider mounted under `id`
    pub fn use_reveal(&self, id: MountId) -> Option<RevealHandle> {
        self.mounts.borrow().get(id).cloned()
    }

    /// Number of mounted providers
    pub fn len(&self) -> usize {
        self.mounts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.borrow().is_empty()
    }
}
