//! Resolved descriptors, kept per client.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use accord_core::{Descriptor, DescriptorError, Endpoint};

type Resolved = Arc<dyn Any + Send + Sync>;

/// Resolves each endpoint type at most once.
///
/// Failed resolutions are not stored; a malformed declaration reports its
/// error on every call.
#[derive(Default)]
pub(crate) struct DescriptorCache {
    resolved: RwLock<HashMap<TypeId, Resolved>>,
}

impl DescriptorCache {
    pub(crate) fn get<E: Endpoint>(&self) -> Result<Arc<Descriptor<E>>, DescriptorError> {
        let key = TypeId::of::<E>();
        let cached = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(descriptor) = cached.and_then(|any| any.downcast::<Descriptor<E>>().ok()) {
            return Ok(descriptor);
        }

        let descriptor = Arc::new(Descriptor::<E>::resolve()?);
        tracing::trace!(endpoint = descriptor.name(), "descriptor resolved");
        let stored = self
            .resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert_with(|| Arc::clone(&descriptor) as Resolved)
            .clone();
        // A concurrent caller may have won the insert; hand out its copy.
        Ok(stored.downcast::<Descriptor<E>>().unwrap_or(descriptor))
    }

    fn len(&self) -> usize {
        self.resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("resolved", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_core::fixtures::{DeleteUser, GetUser};

    #[test]
    fn test_same_type_shares_one_descriptor() {
        let cache = DescriptorCache::default();
        let first = cache.get::<GetUser>().unwrap();
        let second = cache.get::<GetUser>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        cache.get::<DeleteUser>().unwrap();
        assert_eq!(cache.len(), 2);
    }
}
