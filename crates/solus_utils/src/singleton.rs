use std::{convert::Infallible, sync::Arc};

use crate::global_instance::GlobalInstance;

/// A type with exactly one process-wide instance, reached through
/// [`Singleton::instance`].
///
/// Normally implemented with `#[derive(Singleton)]`, which declares the
/// static slot and binds [`Singleton::construct`] to [`Default::default`], or
/// to the function named by `#[singleton(constructor = ..)]`:
///
/// ```
/// use solus_utils::Singleton;
///
/// #[derive(Default, Singleton)]
/// struct Config {
///     verbose: bool,
/// }
///
/// assert!(!Config::instance().verbose);
/// assert!(std::ptr::eq(Config::instance(), Config::instance()));
/// ```
pub trait Singleton: Sized + Send + Sync + 'static {
    type Error;

    fn slot() -> &'static GlobalInstance<Self>;

    fn construct() -> Result<Self, Self::Error>;

    /// A failed construction is returned to the caller and retried on the
    /// next access.
    fn try_instance() -> Result<&'static Self, Self::Error> {
        Self::slot().get_or_try_init(Self::construct)
    }

    fn instance() -> &'static Self
    where
        Self::Error: Into<Infallible>,
    {
        match Self::try_instance() {
            Ok(instance) => instance,
            Err(e) => match e.into() {},
        }
    }

    fn instance_arc() -> Result<Arc<Self>, Self::Error> {
        Self::slot().arc_or_try_init(Self::construct).cloned()
    }
}
