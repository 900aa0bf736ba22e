// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element storage: generational slots, the committed draw order, and the
//! deferred mutation queues.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::element::ElementNode;
use crate::error::{AttachError, DetachError};
use crate::types::{ContainerId, ElementId};

/// One committed element in draw order.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) layer: i32,
    pub(crate) id: ElementId,
}

struct Slot<S: ?Sized> {
    generation: u32,
    node: ElementNode<S>,
}

/// Counts of what a sync point changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Synced {
    pub(crate) attached: usize,
    pub(crate) detached: usize,
}

pub(crate) struct Store<S: ?Sized> {
    owner: ContainerId,
    slots: Vec<Option<Slot<S>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    // Ascending by layer; equal layers in attachment order.
    order: Vec<Entry>,
    additions: VecDeque<ElementId>,
    removals: VecDeque<ElementId>,
}

impl<S: ?Sized> core::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Store")
            .field("owner", &self.owner)
            .field("slots_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("attached", &self.order.len())
            .field("pending_additions", &self.additions.len())
            .field("pending_removals", &self.removals.len())
            .finish_non_exhaustive()
    }
}

impl<S: ?Sized> Store<S> {
    pub(crate) fn new(owner: ContainerId) -> Self {
        Self {
            owner,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
            additions: VecDeque::new(),
            removals: VecDeque::new(),
        }
    }

    pub(crate) fn owner(&self) -> ContainerId {
        self.owner
    }

    /// Register a node as a detached element.
    pub(crate) fn insert(&mut self, mut node: ElementNode<S>) -> ElementId {
        node.parent = None;
        let idx = if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            self.slots.push(None);
            self.generations.push(0);
            self.slots.len() - 1
        };
        let generation = self.generations[idx].saturating_add(1);
        self.generations[idx] = generation;
        self.slots[idx] = Some(Slot { generation, node });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slot count is bounded well below u32::MAX in practice"
        )]
        let slot = idx as u32;
        ElementId::new(self.owner, slot, generation)
    }

    /// Hand a detached element back to its owner and free its slot.
    pub(crate) fn take(&mut self, id: ElementId) -> Option<ElementNode<S>> {
        let node = self.node(id)?;
        if node.is_attached() || self.additions.contains(&id) || node.element.is_none() {
            return None;
        }
        let slot = self.slots[id.idx()].take()?;
        // A slot at the last generation is retired so no id can repeat.
        if slot.generation < u32::MAX {
            self.free_list.push(id.idx());
        }
        Some(slot.node)
    }

    pub(crate) fn node(&self, id: ElementId) -> Option<&ElementNode<S>> {
        if id.owner != self.owner {
            return None;
        }
        match self.slots.get(id.idx()) {
            Some(Some(slot)) if slot.generation == id.generation => Some(&slot.node),
            _ => None,
        }
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> Option<&mut ElementNode<S>> {
        if id.owner != self.owner {
            return None;
        }
        match self.slots.get_mut(id.idx()) {
            Some(Some(slot)) if slot.generation == id.generation => Some(&mut slot.node),
            _ => None,
        }
    }

    /// Queue `id` for attachment at the next sync point.
    pub(crate) fn request_add(&mut self, id: ElementId) -> Result<(), AttachError> {
        self.check_add(id).inspect_err(|err| {
            log::debug!("container {}: add_element({id:?}) rejected: {err}", self.owner);
        })?;
        self.additions.push_back(id);
        Ok(())
    }

    fn check_add(&self, id: ElementId) -> Result<(), AttachError> {
        let node = self.node(id).ok_or(AttachError::Stale)?;
        if node.is_attached() {
            return Err(AttachError::AlreadyAttached);
        }
        if self.additions.contains(&id) {
            return Err(AttachError::AlreadyQueued);
        }
        Ok(())
    }

    /// Queue `id` for detachment at the next sync point.
    ///
    /// Only committed elements qualify; a queued addition does not.
    pub(crate) fn request_remove(&mut self, id: ElementId) -> Result<(), DetachError> {
        self.check_remove(id).inspect_err(|err| {
            log::debug!("container {}: remove_element({id:?}) rejected: {err}", self.owner);
        })?;
        self.removals.push_back(id);
        Ok(())
    }

    fn check_remove(&self, id: ElementId) -> Result<(), DetachError> {
        let node = self.node(id).ok_or(DetachError::Stale)?;
        if !node.is_attached() {
            return Err(DetachError::NotAttached);
        }
        Ok(())
    }

    /// Apply queued additions, then queued removals, each in FIFO order.
    pub(crate) fn sync(&mut self) -> Synced {
        let mut out = Synced::default();
        while let Some(id) = self.additions.pop_front() {
            let owner = self.owner;
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            node.parent = Some(owner);
            let layer = node.layer();
            let at = self.order.partition_point(|e| e.layer <= layer);
            self.order.insert(at, Entry { layer, id });
            out.attached += 1;
        }
        while let Some(id) = self.removals.pop_front() {
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            // A second removal of the same element finds it already detached.
            if node.parent.take().is_none() {
                continue;
            }
            if let Some(pos) = self.order.iter().position(|e| e.id == id) {
                self.order.remove(pos);
            }
            out.detached += 1;
        }
        if out != Synced::default() {
            log::trace!(
                "container {}: sync attached {} detached {} ({} committed)",
                self.owner,
                out.attached,
                out.detached,
                self.order.len()
            );
        }
        out
    }

    pub(crate) fn order(&self) -> &[Entry] {
        &self.order
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.additions.is_empty() || !self.removals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn store() -> Store<()> {
        Store::new(ContainerId::next())
    }

    fn layers(s: &Store<()>) -> Vec<i32> {
        s.order().iter().map(|e| e.layer).collect()
    }

    #[test]
    fn liveness_insert_take_reuse() {
        let mut s = store();
        let a = s.insert(ElementNode::new(0, ()));
        assert!(s.node(a).is_some());
        assert!(s.take(a).is_some());
        assert!(s.node(a).is_none());

        let b = s.insert(ElementNode::new(0, ()));
        assert!(s.node(b).is_some());
        assert!(s.node(a).is_none());
        assert_eq!(a.slot, b.slot, "freed slot should be reused");
        assert!(b.generation > a.generation, "generation must increase on reuse");
    }

    #[test]
    fn exhausted_slot_is_retired() {
        let mut s = store();
        let a = s.insert(ElementNode::new(0, ()));
        assert!(s.take(a).is_some());
        s.generations[a.idx()] = u32::MAX - 1;

        let b = s.insert(ElementNode::new(0, ()));
        assert_eq!(b.slot, a.slot);
        assert_eq!(b.generation, u32::MAX);
        assert!(s.take(b).is_some());

        let c = s.insert(ElementNode::new(0, ()));
        assert_ne!(c.slot, b.slot, "slot at the last generation must not be reused");
        assert!(s.node(b).is_none());
        assert!(s.node(c).is_some());
    }

    #[test]
    fn foreign_ids_are_rejected() {
        let mut s1 = store();
        let mut s2 = store();
        let a = s1.insert(ElementNode::new(0, ()));
        let _ = s2.insert(ElementNode::new(0, ()));
        assert!(s2.node(a).is_none());
        assert_eq!(s2.request_add(a), Err(AttachError::Stale));
        assert_eq!(s2.request_remove(a), Err(DetachError::Stale));
    }

    #[test]
    fn additions_apply_only_at_sync() {
        let mut s = store();
        let a = s.insert(ElementNode::new(1, ()));
        s.request_add(a).unwrap();
        assert!(s.order().is_empty());
        assert!(s.node(a).unwrap().parent().is_none());
        assert!(s.has_pending());

        let synced = s.sync();
        assert_eq!(synced, Synced { attached: 1, detached: 0 });
        assert_eq!(s.node(a).unwrap().parent(), Some(s.owner()));
        assert_eq!(s.order().len(), 1);
        assert!(!s.has_pending());
    }

    #[test]
    fn order_is_ascending_and_stable() {
        let mut s = store();
        let ids: Vec<_> = [5, 1, 5, 3, 1]
            .into_iter()
            .map(|l| s.insert(ElementNode::new(l, ())))
            .collect();
        for &id in &ids {
            s.request_add(id).unwrap();
        }
        let _ = s.sync();
        assert_eq!(layers(&s), vec![1, 1, 3, 5, 5]);
        let order: Vec<_> = s.order().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![ids[1], ids[4], ids[3], ids[0], ids[2]]);
    }

    #[test]
    fn add_twice_is_rejected() {
        let mut s = store();
        let a = s.insert(ElementNode::new(0, ()));
        assert_eq!(s.request_add(a), Ok(()));
        assert_eq!(s.request_add(a), Err(AttachError::AlreadyQueued));
        let _ = s.sync();
        assert_eq!(s.request_add(a), Err(AttachError::AlreadyAttached));
        assert_eq!(s.order().len(), 1);
    }

    #[test]
    fn remove_requires_committed_element() {
        let mut s = store();
        let a = s.insert(ElementNode::new(0, ()));
        assert_eq!(s.request_remove(a), Err(DetachError::NotAttached));
        s.request_add(a).unwrap();
        // Still only queued.
        assert_eq!(s.request_remove(a), Err(DetachError::NotAttached));
        let _ = s.sync();
        assert_eq!(s.request_remove(a), Ok(()));
    }

    #[test]
    fn double_remove_detaches_once() {
        let mut s = store();
        let a = s.insert(ElementNode::new(0, ()));
        let b = s.insert(ElementNode::new(0, ()));
        s.request_add(a).unwrap();
        s.request_add(b).unwrap();
        let _ = s.sync();

        s.request_remove(a).unwrap();
        s.request_remove(a).unwrap();
        let synced = s.sync();
        assert_eq!(synced, Synced { attached: 0, detached: 1 });
        assert!(!s.node(a).unwrap().is_attached());
        let order: Vec<_> = s.order().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![b]);
    }

    #[test]
    fn additions_flush_before_removals() {
        let mut s = store();
        let a = s.insert(ElementNode::new(0, ()));
        s.request_add(a).unwrap();
        let _ = s.sync();
        s.request_remove(a).unwrap();
        let b = s.insert(ElementNode::new(0, ()));
        s.request_add(b).unwrap();
        let synced = s.sync();
        assert_eq!(synced, Synced { attached: 1, detached: 1 });
        let order: Vec<_> = s.order().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![b]);
    }

    #[test]
    fn take_refuses_attached_or_queued() {
        let mut s = store();
        let a = s.insert(ElementNode::new(0, ()));
        s.request_add(a).unwrap();
        assert!(s.take(a).is_none());
        let _ = s.sync();
        assert!(s.take(a).is_none());
        s.request_remove(a).unwrap();
        let _ = s.sync();
        let node = s.take(a).expect("detached element can be taken");
        assert!(!node.is_attached());
    }
}
