use std::any::type_name;
use std::ops::Deref;
use std::sync::{Arc, Weak};

/// Strong owner of a GPU object. Dropping it destroys the object and invalidates every
/// [`ResourceHandle`] taken from it, unless a dependent object still holds an upgraded reference:
/// the object is then destroyed right after that dependent.
pub struct Resource<T> {
    data: Option<Arc<T>>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

impl<T> Resource<T> {
    pub fn new(data: T) -> Self {
        Self { data: Some(Arc::new(data)) }
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    pub fn handle(&self) -> ResourceHandle<T> {
        let data = self.data.as_ref().unwrap_or_else(|| panic!("Cannot get handle of a null Resource<{}>", type_name::<T>()));
        ResourceHandle {
            ptr: Arc::downgrade(data),
        }
    }
}

impl<T> Deref for Resource<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.data.as_deref().unwrap_or_else(|| panic!("Resource<{}> is null", type_name::<T>()))
    }
}

/// Non-owning handle on a [`Resource`].
pub struct ResourceHandle<T> {
    ptr: Weak<T>,
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self { ptr: self.ptr.clone() }
    }
}

impl<T> Default for ResourceHandle<T> {
    fn default() -> Self {
        Self { ptr: Weak::new() }
    }
}

impl<T> ResourceHandle<T> {
    pub fn is_valid(&self) -> bool {
        self.ptr.strong_count() > 0
    }

    /// Strong reference on the object, `None` once it was destroyed.
    pub fn upgrade(&self) -> Option<Arc<T>> {
        self.ptr.upgrade()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use super::*;

    #[test]
    fn handle_follows_owner_lifetime() {
        let resource = Resource::new(5u32);
        let handle = resource.handle();
        let copy = handle.clone();
        assert!(handle.is_valid());
        assert_eq!(*handle.upgrade().unwrap(), 5);

        drop(resource);
        assert!(!handle.is_valid());
        assert!(!copy.is_valid());
        assert!(handle.upgrade().is_none());
    }

    #[test]
    fn upgraded_parent_is_destroyed_after_its_dependent() {
        struct Logged(&'static str, Arc<Mutex<Vec<&'static str>>>);
        impl Drop for Logged {
            fn drop(&mut self) {
                self.1.lock().unwrap().push(self.0);
            }
        }
        // Fields drop in declaration order.
        struct Dependent {
            _self: Logged,
            _parent: Arc<Logged>,
        }

        let order = Arc::new(Mutex::new(Vec::new()));
        let parent = Resource::new(Logged("parent", order.clone()));
        let dependent = Resource::new(Dependent {
            _self: Logged("dependent", order.clone()),
            _parent: parent.handle().upgrade().unwrap(),
        });

        drop(parent);
        assert!(order.lock().unwrap().is_empty());
        drop(dependent);
        assert_eq!(*order.lock().unwrap(), vec!["dependent", "parent"]);
    }

    #[test]
    fn default_handle_is_invalid() {
        let handle = ResourceHandle::<u32>::default();
        assert!(!handle.is_valid());
        assert!(!Resource::<u32>::default().is_valid());
    }

    #[test]
    #[should_panic(expected = "is null")]
    fn deref_null_resource_panics() {
        let resource = Resource::<u32>::default();
        let value: u32 = *resource;
        assert_eq!(value, 0);
    }
}
