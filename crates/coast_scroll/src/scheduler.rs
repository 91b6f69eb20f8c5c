//! Scroll scheduler
//!
//! Keeps every scroll container of a window and ticks the animating ones once
//! per frame.

use coast_core::ScrollGeometry;
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::container::ScrollContainer;
use crate::effects::ScrollUpdate;

new_key_type! {
    pub struct ScrollId;
}

/// All scroll containers of one host
#[derive(Debug, Default)]
pub struct ScrollScheduler {
    containers: SlotMap<ScrollId, ScrollContainer>,
}

impl ScrollScheduler {
    pub fn new() -> Self {
        Self {
            containers: SlotMap::with_key(),
        }
    }

    pub fn add_container(&mut self, container: ScrollContainer) -> ScrollId {
        self.containers.insert(container)
    }

    pub fn get_container(&self, id: ScrollId) -> Option<&ScrollContainer> {
        self.containers.get(id)
    }

    pub fn get_container_mut(&mut self, id: ScrollId) -> Option<&mut ScrollContainer> {
        self.containers.get_mut(id)
    }

    pub fn remove_container(&mut self, id: ScrollId) -> Option<ScrollContainer> {
        self.containers.remove(id)
    }

    /// Tick every animating container
    ///
    /// `geometry` supplies each container's current extents; containers it
    /// returns `None` for are skipped this frame. Returns the update of every
    /// container that was ticked.
    pub fn tick<G>(&mut self, now_ms: i64, mut geometry: G) -> Vec<(ScrollId, ScrollUpdate)>
    where
        G: FnMut(ScrollId) -> Option<ScrollGeometry>,
    {
        let mut updates = Vec::new();
        for (id, container) in self.containers.iter_mut() {
            if !container.is_animating() {
                continue;
            }
            let Some(extents) = geometry(id) else {
                trace!("no geometry for {:?}, skipping tick", id);
                continue;
            };
            updates.push((id, container.tick(now_ms, &extents)));
        }
        updates
    }

    /// Check if any container is still animating
    pub fn has_active_animations(&self) -> bool {
        self.containers.iter().any(|(_, c)| c.is_animating())
    }

    /// Iterate over all containers (immutable)
    pub fn containers_iter(&self) -> impl Iterator<Item = (ScrollId, &ScrollContainer)> {
        self.containers.iter()
    }

    /// Iterate over all containers (mutable)
    pub fn containers_iter_mut(&mut self) -> impl Iterator<Item = (ScrollId, &mut ScrollContainer)> {
        self.containers.iter_mut()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coast_core::{ContentExtent, ViewportExtent};

    fn geometry() -> ScrollGeometry {
        ScrollGeometry::new(ViewportExtent::new(300, 300), ContentExtent::new(300, 3000))
    }

    #[test]
    fn test_ticks_only_animating_containers() {
        let mut scheduler = ScrollScheduler::new();
        let idle = scheduler.add_container(ScrollContainer::default());
        let moving = scheduler.add_container(ScrollContainer::default());
        assert!(!scheduler.has_active_animations());

        let g = geometry();
        if let Some(container) = scheduler.get_container_mut(moving) {
            container.fling(0.0, 2500.0, 0, &g);
        }
        assert!(scheduler.has_active_animations());

        let updates = scheduler.tick(16, |_| Some(g));
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, moving);
        assert!(updates[0].1.offset.y > 0);
        assert_eq!(scheduler.get_container(idle).map(|c| c.offset().y), Some(0));
    }

    #[test]
    fn test_runs_until_settled() {
        let mut scheduler = ScrollScheduler::new();
        let id = scheduler.add_container(ScrollContainer::default());
        let g = geometry();
        if let Some(container) = scheduler.get_container_mut(id) {
            container.fling(0.0, 2500.0, 0, &g);
        }

        let mut now = 0;
        while scheduler.has_active_animations() {
            now += 16;
            scheduler.tick(now, |_| Some(g));
            assert!(now < 20_000, "fling did not settle");
        }
        let offset = scheduler.get_container(id).map(|c| c.offset().y).unwrap_or(-1);
        assert!(offset > 0 && offset <= 2700);
    }

    #[test]
    fn test_missing_geometry_skips_container() {
        let mut scheduler = ScrollScheduler::new();
        let id = scheduler.add_container(ScrollContainer::default());
        let g = geometry();
        if let Some(container) = scheduler.get_container_mut(id) {
            container.fling(0.0, 2500.0, 0, &g);
        }
        assert!(scheduler.tick(16, |_| None).is_empty());
        assert!(scheduler.remove_container(id).is_some());
        assert_eq!(scheduler.container_count(), 0);
    }
}
