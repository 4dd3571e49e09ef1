//! An explicit, passable alternative to process-wide singletons.
//!
//! An [`InstanceRegistry`] holds at most one instance per type. Components
//! that receive the registry share those instances, while a test can build a
//! fresh registry and get fresh instances.

use std::{
    any::{TypeId, type_name},
    collections::HashMap,
    convert::Infallible,
    sync::Arc,
};

use downcast_rs::DowncastSync;
use parking_lot::RwLock;

use crate::global_instance::{GlobalInstance, InstanceError};

trait ErasedSlot: DowncastSync {
    fn is_initialized(&self) -> bool;
}

downcast_rs::impl_downcast!(sync ErasedSlot);

impl<T: Send + Sync + 'static> ErasedSlot for GlobalInstance<T> {
    fn is_initialized(&self) -> bool {
        GlobalInstance::is_initialized(self)
    }
}

#[derive(Default)]
pub struct InstanceRegistry {
    slots: RwLock<HashMap<TypeId, Arc<dyn ErasedSlot>>>,
}

impl std::fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("instances", &self.len())
            .finish()
    }
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn typed_slot<T: Send + Sync + 'static>(slot: Arc<dyn ErasedSlot>) -> Arc<GlobalInstance<T>> {
        match slot.downcast_arc::<GlobalInstance<T>>() {
            Ok(slot) => slot,
            Err(_) => unreachable!("Registry slot for {} has a mismatched type", type_name::<T>()),
        }
    }

    fn existing_slot<T: Send + Sync + 'static>(&self) -> Option<Arc<GlobalInstance<T>>> {
        self.slots
            .read()
            .get(&TypeId::of::<T>())
            .cloned()
            .map(Self::typed_slot)
    }

    fn slot<T: Send + Sync + 'static>(&self) -> Arc<GlobalInstance<T>> {
        if let Some(slot) = self.existing_slot::<T>() {
            return slot;
        }

        let slot = self
            .slots
            .write()
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(GlobalInstance::<T>::new()) as Arc<dyn ErasedSlot>)
            .clone();
        Self::typed_slot(slot)
    }

    /// Returns the registry's instance of `T`, building it with `f` if absent.
    ///
    /// The registry lock is released while `f` runs, so `f` may resolve other
    /// types from this registry. Errors leave `T` absent.
    pub fn get_or_try_init<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
    {
        let slot = self.slot::<T>();
        let instance = slot.arc_or_try_init(f)?.clone();
        Ok(instance)
    }

    pub fn get_or_init<T>(&self, f: impl FnOnce() -> T) -> Arc<T>
    where
        T: Send + Sync + 'static,
    {
        match self.get_or_try_init(|| Ok::<T, Infallible>(f())) {
            Ok(instance) => instance,
            Err(never) => match never {},
        }
    }

    pub fn get_or_default<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        self.get_or_init(T::default)
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.existing_slot::<T>()
            .and_then(|slot| slot.try_clone_arc().ok())
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.existing_slot::<T>()
            .is_some_and(|slot| slot.is_initialized())
    }

    /// Installs `value` as the instance of `T`.
    pub fn insert<T: Send + Sync + 'static>(&self, value: T) -> Result<(), InstanceError> {
        self.slot::<T>().try_init(value)
    }

    /// Swaps in `value` as the instance of `T`, returning the previous one.
    ///
    /// `Arc`s handed out before the swap keep pointing at the old instance.
    pub fn replace<T: Send + Sync + 'static>(&self, value: T) -> Option<Arc<T>> {
        let slot = Arc::new(GlobalInstance::<T>::new());
        slot.init(value);
        log::debug!("Replacing registry instance of {}", type_name::<T>());
        self.slots
            .write()
            .insert(TypeId::of::<T>(), slot)
            .and_then(|old| Self::typed_slot::<T>(old).try_clone_arc().ok())
    }

    pub fn remove<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.slots
            .write()
            .remove(&TypeId::of::<T>())
            .and_then(|old| Self::typed_slot::<T>(old).try_clone_arc().ok())
    }

    pub fn clear(&self) {
        self.slots.write().clear();
    }

    /// Number of types with a constructed instance.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.is_initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
