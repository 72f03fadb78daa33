//! Engine-instance registry keyed by container identity.
//!
//! A container gets at most one live carousel. Hosts look up before creating,
//! and must `destroy` an instance (which tears down its timers and listeners)
//! before another can be registered for the same container. An instance torn
//! down in place with `Carousel::destroy` counts as vacant and is replaced on
//! the next create.

use hashbrown::HashMap;

use crate::engine::Carousel;
use crate::error::{CarouselError, RegistryError};
use crate::geometry::SlideLayout;
use crate::ids::{ContainerId, IdAllocator};
use crate::outputs::Outputs;

#[derive(Debug, Default)]
pub struct CarouselRegistry {
    instances: HashMap<ContainerId, Carousel>,
    ids: IdAllocator,
}

impl CarouselRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live carousel for `id`, creating it with `init` when absent.
    pub fn get_or_create<F>(&mut self, id: ContainerId, init: F) -> &mut Carousel
    where
        F: FnOnce() -> Carousel,
    {
        self.evict_destroyed(&id);
        self.instances.entry(id).or_insert_with_key(|id| {
            log::debug!("creating carousel for container '{id}'");
            init()
        })
    }

    /// Register `carousel` for `id`. Fails if a live instance already exists.
    pub fn insert(&mut self, id: ContainerId, carousel: Carousel) -> Result<(), RegistryError> {
        self.evict_destroyed(&id);
        if self.instances.contains_key(&id) {
            log::warn!("refusing to replace live carousel for container '{id}'");
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.instances.insert(id, carousel);
        Ok(())
    }

    /// Parse `settings_json`, build a carousel over `layout` and register it for `id`.
    pub fn create(
        &mut self,
        id: ContainerId,
        settings_json: &str,
        layout: impl SlideLayout + 'static,
    ) -> Result<&mut Carousel, CarouselError> {
        self.evict_destroyed(&id);
        if self.instances.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id).into());
        }
        let carousel = Carousel::from_settings_json(settings_json, layout)?;
        log::debug!("creating carousel for container '{id}'");
        Ok(self.instances.entry(id).or_insert(carousel))
    }

    /// Register `carousel` under a freshly generated id.
    pub fn insert_anonymous(&mut self, carousel: Carousel) -> ContainerId {
        let mut id = self.ids.alloc();
        while self.instances.contains_key(&id) {
            id = self.ids.alloc();
        }
        self.instances.insert(id.clone(), carousel);
        id
    }

    pub fn get(&self, id: &ContainerId) -> Option<&Carousel> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: &ContainerId) -> Option<&mut Carousel> {
        self.instances.get_mut(id)
    }

    /// Whether a live (not yet destroyed) carousel is registered for `id`.
    pub fn contains(&self, id: &ContainerId) -> bool {
        self.instances.get(id).is_some_and(|c| !c.is_destroyed())
    }

    /// Tear down and remove the carousel for `id`, returning its teardown outputs.
    pub fn destroy(&mut self, id: &ContainerId) -> Option<Outputs> {
        let mut carousel = self.instances.remove(id)?;
        log::debug!("destroying carousel for container '{id}'");
        Some(carousel.destroy().clone())
    }

    /// Tear down every registered carousel.
    pub fn destroy_all(&mut self) -> Vec<(ContainerId, Outputs)> {
        self.instances
            .drain()
            .map(|(id, mut carousel)| {
                let out = carousel.destroy().clone();
                (id, out)
            })
            .collect()
    }

    fn evict_destroyed(&mut self, id: &ContainerId) {
        if self.instances.get(id).is_some_and(Carousel::is_destroyed) {
            log::debug!("evicting destroyed carousel for container '{id}'");
            self.instances.remove(id);
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &ContainerId> {
        self.instances.keys()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::geometry::FixedLayout;

    fn mk() -> Carousel {
        Carousel::new(
            Settings::default(),
            FixedLayout::new(300.0, vec![200.0; 3], 0.0),
        )
    }

    #[test]
    fn get_or_create_only_creates_once() {
        let mut reg = CarouselRegistry::new();
        let mut created = 0;
        for _ in 0..3 {
            reg.get_or_create(ContainerId::from("a"), || {
                created += 1;
                mk()
            });
        }
        assert_eq!(created, 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn insert_requires_destroy_first() {
        let mut reg = CarouselRegistry::new();
        let id = ContainerId::from("hero");
        reg.insert(id.clone(), mk()).unwrap();
        assert_eq!(
            reg.insert(id.clone(), mk()),
            Err(RegistryError::AlreadyRegistered(id.clone()))
        );
        assert!(reg.destroy(&id).is_some());
        assert!(reg.destroy(&id).is_none());
        assert!(reg.insert(id, mk()).is_ok());
    }

    #[test]
    fn create_parses_settings_and_rejects_duplicates() {
        let mut reg = CarouselRegistry::new();
        let id = ContainerId::from("gallery");
        let layout = || FixedLayout::new(300.0, vec![200.0; 3], 0.0);
        let c = reg
            .create(id.clone(), r#"{"loop":true,"transitionSpeed":250}"#, layout())
            .unwrap();
        assert!(c.settings().r#loop);
        assert!(matches!(
            reg.create(id, "{}", layout()),
            Err(CarouselError::Registry(RegistryError::AlreadyRegistered(_)))
        ));
        assert!(matches!(
            reg.create(ContainerId::from("bad"), "{", layout()),
            Err(CarouselError::Settings(_))
        ));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn destroyed_in_place_is_recreated() {
        let mut reg = CarouselRegistry::new();
        let id = ContainerId::from("hero");
        reg.get_or_create(id.clone(), mk).mount();
        reg.get_mut(&id).unwrap().destroy();
        assert!(!reg.contains(&id));

        let mut created = false;
        let c = reg.get_or_create(id.clone(), || {
            created = true;
            mk()
        });
        assert!(!c.is_destroyed());
        assert!(!c.next().is_empty());
        assert!(created);

        reg.get_mut(&id).unwrap().destroy();
        assert!(reg.insert(id.clone(), mk()).is_ok());
        reg.get_mut(&id).unwrap().destroy();
        let c = reg.create(id.clone(), "{}", FixedLayout::new(300.0, vec![200.0; 3], 0.0));
        assert!(!c.unwrap().is_destroyed());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn anonymous_ids_skip_taken_names() {
        let mut reg = CarouselRegistry::new();
        reg.insert(ContainerId::from("carousel-0"), mk()).unwrap();
        let id = reg.insert_anonymous(mk());
        assert_eq!(id, ContainerId::from("carousel-1"));
        assert_eq!(reg.len(), 2);
    }
}
