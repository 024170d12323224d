//! Lifecycle hooks supplied per pooled type

/// Error type hooks may fail with; wrapped into [`PoolError::CreationFailed`]
/// by the pool.
///
/// [`PoolError::CreationFailed`]: crate::PoolError::CreationFailed
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Per-type policy the pool is parameterized with: how to manufacture an
/// instance from the seed, how to decide a candidate is still usable, and
/// how to release one that is being retired.
///
/// The pool invokes all three while holding its exclusive lock, so hooks
/// should be cheap; a slow `create` serializes every caller behind it.
///
/// # Examples
///
/// ```
/// use leasepool::{HookError, Lifecycle};
///
/// struct Conn { open: bool }
///
/// struct ConnLifecycle;
///
/// impl Lifecycle<Conn> for ConnLifecycle {
///     fn create(&self, _seed: &Conn) -> Result<Conn, HookError> {
///         Ok(Conn { open: true })
///     }
///
///     fn validate(&self, candidate: &Conn) -> bool {
///         candidate.open
///     }
/// }
/// ```
pub trait Lifecycle<T>: Send + Sync {
    /// Produce a new, ready-to-use instance from the pool's seed value.
    ///
    /// Must not mutate the seed (the `&T` receiver enforces it). A failure
    /// here surfaces to the checkout caller as `CreationFailed`.
    fn create(&self, seed: &T) -> Result<T, HookError>;

    /// Decide whether a candidate is still safe to hand out. Returning
    /// `false` retires it. Defaults to accepting everything.
    fn validate(&self, candidate: &T) -> bool {
        let _ = candidate;
        true
    }

    /// Release any resources held by a retired instance. Called exactly
    /// once per retirement; defaults to dropping the value.
    fn expire(&self, retired: T) {
        drop(retired);
    }
}

/// Hook set built from closures, for callers that don't want a dedicated
/// policy type.
///
/// `create` is required; `validate` defaults to always-true and `expire`
/// to a plain drop.
///
/// # Examples
///
/// ```
/// use leasepool::{LifecycleFns, Pool, PoolConfiguration};
///
/// let hooks = LifecycleFns::new(|seed: &u32| Ok(*seed))
///     .with_validate(|v| *v < 100)
///     .with_expire(|v| println!("retiring {v}"));
///
/// let pool = Pool::new(7, hooks, PoolConfiguration::default());
/// assert_eq!(*pool.check_out().unwrap(), 7);
/// ```
pub struct LifecycleFns<T> {
    create: Box<dyn Fn(&T) -> Result<T, HookError> + Send + Sync>,
    validate: Option<Box<dyn Fn(&T) -> bool + Send + Sync>>,
    expire: Option<Box<dyn Fn(T) + Send + Sync>>,
}

impl<T> LifecycleFns<T> {
    pub fn new<F>(create: F) -> Self
    where
        F: Fn(&T) -> Result<T, HookError> + Send + Sync + 'static,
    {
        Self {
            create: Box::new(create),
            validate: None,
            expire: None,
        }
    }

    pub fn with_validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Box::new(validate));
        self
    }

    pub fn with_expire<F>(mut self, expire: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.expire = Some(Box::new(expire));
        self
    }
}

impl<T> Lifecycle<T> for LifecycleFns<T> {
    fn create(&self, seed: &T) -> Result<T, HookError> {
        (self.create)(seed)
    }

    fn validate(&self, candidate: &T) -> bool {
        match &self.validate {
            Some(f) => f(candidate),
            None => true,
        }
    }

    fn expire(&self, retired: T) {
        match &self.expire {
            Some(f) => f(retired),
            None => drop(retired),
        }
    }
}

/// Lifecycle for types where a new instance is simply a clone of the seed
/// and retirement is a plain drop.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneFromSeed;

impl<T: Clone> Lifecycle<T> for CloneFromSeed {
    fn create(&self, seed: &T) -> Result<T, HookError> {
        Ok(seed.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn clone_from_seed_clones() {
        let seed = vec![1, 2, 3];
        let created = CloneFromSeed.create(&seed).unwrap();
        assert_eq!(created, seed);
        assert!(CloneFromSeed.validate(&created));
    }

    #[test]
    fn closure_hooks_are_invoked() {
        let expired = Arc::new(AtomicUsize::new(0));
        let expired_in_hook = Arc::clone(&expired);

        let hooks = LifecycleFns::new(|seed: &u32| Ok(seed + 1))
            .with_validate(|v| *v % 2 == 0)
            .with_expire(move |_| {
                expired_in_hook.fetch_add(1, Ordering::Relaxed);
            });

        assert_eq!(hooks.create(&1).unwrap(), 2);
        assert!(hooks.validate(&2));
        assert!(!hooks.validate(&3));
        hooks.expire(2);
        assert_eq!(expired.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn validate_and_expire_default_when_not_supplied() {
        let hooks = LifecycleFns::new(|seed: &String| Ok(seed.clone()));
        assert!(hooks.validate(&"anything".to_string()));
        hooks.expire("dropped".to_string());
    }

    #[test]
    fn create_failure_carries_the_hook_error() {
        let hooks = LifecycleFns::new(|_: &u32| Err::<u32, _>("backend down".into()));
        let err = hooks.create(&0).unwrap_err();
        assert_eq!(err.to_string(), "backend down");
    }
}
