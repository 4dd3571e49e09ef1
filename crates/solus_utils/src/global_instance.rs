use std::{
    any::type_name,
    convert::Infallible,
    ops::Deref,
    sync::{Arc, OnceLock},
};

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InstanceError {
    #[error("GlobalInstance {0} is already initialized")]
    AlreadyInitialized(&'static str),
    #[error("GlobalInstance {0} is not initialized")]
    NotInitialized(&'static str),
}

/// A slot holding at most one shared instance of `T`.
///
/// The instance is either installed eagerly with [`GlobalInstance::init`] or
/// built on first access by one of the `get_or_*` methods. Once published it
/// is never replaced, and reads no longer touch the lock.
#[derive(Debug)]
pub struct GlobalInstance<T> {
    value: OnceLock<Arc<T>>,
    init_lock: Mutex<()>,
}

impl<T> Default for GlobalInstance<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for GlobalInstance<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match self.try_get() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> GlobalInstance<T> {
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
            init_lock: parking_lot::const_mutex(()),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.get().map(Arc::as_ref)
    }

    pub fn try_get(&self) -> Result<&T, InstanceError> {
        self.get()
            .ok_or(InstanceError::NotInitialized(type_name::<T>()))
    }

    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn try_init(&self, value: T) -> Result<(), InstanceError> {
        let _guard = self.init_lock.lock();
        self.value
            .set(Arc::new(value))
            .map_err(|_| InstanceError::AlreadyInitialized(type_name::<T>()))
    }

    /// Installs `value` eagerly.
    ///
    /// Panics if the slot already holds an instance, use
    /// [`GlobalInstance::try_init`] to handle that case.
    pub fn init(&self, value: T) {
        if let Err(e) = self.try_init(value) {
            panic!("{e}");
        }
    }

    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        match self.get_or_try_init(|| Ok::<T, Infallible>(f())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    pub fn get_or_default(&self) -> &T
    where
        T: Default,
    {
        self.get_or_init(T::default)
    }

    /// Returns the instance, running `f` to build it if the slot is empty.
    ///
    /// An error from `f` is handed back untouched and leaves the slot empty,
    /// so the next call runs a factory again. `f` must not access this same
    /// slot, that deadlocks.
    pub fn get_or_try_init<E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        self.arc_or_try_init(f).map(Arc::as_ref)
    }

    pub(crate) fn arc_or_try_init<E>(
        &self,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<&Arc<T>, E> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.init_lock.lock();
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        log::debug!("Constructing GlobalInstance {}", type_name::<T>());
        match f() {
            Ok(value) => Ok(self.value.get_or_init(|| Arc::new(value))),
            Err(e) => {
                log::debug!(
                    "Construction of GlobalInstance {} failed, slot left empty",
                    type_name::<T>()
                );
                Err(e)
            }
        }
    }

    pub fn try_clone_arc(&self) -> Result<Arc<T>, InstanceError> {
        self.value
            .get()
            .cloned()
            .ok_or(InstanceError::NotInitialized(type_name::<T>()))
    }

    pub fn clone_arc(&self) -> Arc<T> {
        match self.try_clone_arc() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}
