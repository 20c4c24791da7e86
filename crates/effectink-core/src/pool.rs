//! Reusable pool of effect instances.
//!
//! Instances are matched to effects by index. When the effect list shrinks
//! the surplus instances are hidden and kept, so a list that grows again
//! (live editing, toggling presets) reuses them instead of allocating.

use crate::effect::TextEffect;
use crate::node::{NodeFactory, RenderNode};

/// Position-indexed object pool with an active count.
///
/// `instances[i]` renders `effects[i]` for `i < active`; everything past
/// `active` is hidden.
#[derive(Debug)]
pub struct EffectPool<N> {
    instances: Vec<N>,
    active: usize,
}

impl<N> Default for EffectPool<N> {
    fn default() -> Self {
        Self {
            instances: Vec::new(),
            active: 0,
        }
    }
}

impl<N: RenderNode> EffectPool<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `effects` onto the pool, reusing, creating or hiding instances.
    pub fn reconcile<F>(&mut self, effects: &[TextEffect], factory: &F)
    where
        F: NodeFactory<Node = N>,
    {
        let mut created = 0;
        for (index, effect) in effects.iter().enumerate() {
            let props = effect.props();
            match self.instances.get_mut(index) {
                Some(instance) => instance.set(&props),
                None => {
                    self.instances.push(factory.create(&props));
                    created += 1;
                }
            }
        }

        for instance in self.instances.iter_mut().skip(effects.len()) {
            instance.set_visible(false);
        }
        self.active = effects.len();

        log::debug!(
            "Reconciled {} effects: {} created, {} pooled",
            effects.len(),
            created,
            self.instances.len()
        );
    }

    /// Hide every instance and empty the active group. Nothing is destroyed.
    pub fn hide_all(&mut self) {
        for instance in &mut self.instances {
            instance.set_visible(false);
        }
        self.active = 0;
    }

    /// Destroy every instance and empty the pool.
    pub fn release_all(&mut self) {
        for instance in &mut self.instances {
            instance.destroy();
        }
        log::debug!("Released {} effect instances", self.instances.len());
        self.instances.clear();
        self.active = 0;
    }

    /// Instances rendering the current effects, in effect order.
    pub fn group(&self) -> &[N] {
        &self.instances[..self.active]
    }

    pub fn group_mut(&mut self) -> &mut [N] {
        &mut self.instances[..self.active]
    }

    /// Every pooled instance, including hidden spares.
    pub fn instances(&self) -> &[N] {
        &self.instances
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Total pooled instances.
    pub fn capacity(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Visibility;
    use crate::node::{TextNode, TextNodeFactory};

    fn effects(count: usize) -> Vec<TextEffect> {
        (0..count)
            .map(|i| TextEffect::new().with_offset(i as f64, i as f64))
            .collect()
    }

    #[test]
    fn test_creates_instances() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.reconcile(&effects(3), &TextNodeFactory);
        assert_eq!(pool.active(), 3);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.group()[2].position(), (2.0, 2.0));
    }

    #[test]
    fn test_shrink_hides_surplus() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.reconcile(&effects(3), &TextNodeFactory);
        let ids: Vec<_> = pool.instances().iter().map(|n| n.id()).collect();

        pool.reconcile(&effects(1), &TextNodeFactory);
        assert_eq!(pool.active(), 1);
        assert_eq!(pool.capacity(), 3);
        assert!(pool.instances()[0].is_visible());
        assert!(!pool.instances()[1].is_visible());
        assert!(!pool.instances()[2].is_visible());
        assert!(!pool.instances()[1].is_destroyed());

        // Same objects, reused in place
        let after: Vec<_> = pool.instances().iter().map(|n| n.id()).collect();
        assert_eq!(ids, after);
    }

    #[test]
    fn test_regrow_reuses_hidden() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.reconcile(&effects(3), &TextNodeFactory);
        let third = pool.instances()[2].id();
        pool.reconcile(&effects(1), &TextNodeFactory);
        pool.reconcile(&effects(4), &TextNodeFactory);

        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.instances()[2].id(), third);
        assert!(pool.group().iter().all(|n| n.is_visible()));
    }

    #[test]
    fn test_hidden_effect_hides_instance() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        let list = vec![TextEffect::new().with_visibility(Visibility::Hidden)];
        pool.reconcile(&list, &TextNodeFactory);
        assert!(!pool.group()[0].is_visible());
    }

    #[test]
    fn test_hide_all_keeps_instances() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.reconcile(&effects(2), &TextNodeFactory);
        pool.hide_all();
        assert!(pool.group().is_empty());
        assert_eq!(pool.capacity(), 2);
        assert!(pool.instances().iter().all(|n| !n.is_visible() && !n.is_destroyed()));
    }

    #[test]
    fn test_release_all() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.reconcile(&effects(2), &TextNodeFactory);
        pool.release_all();
        assert_eq!(pool.capacity(), 0);
        assert!(pool.is_empty());
    }
}
