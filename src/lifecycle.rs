// src/lifecycle.rs
use std::cell::RefCell;
use std::rc::Rc;

/// A token shared by several subscriptions; only the first `take` gets the payload.
///
/// The payload is typically the listeners themselves, so the first event to
/// fire disposes of every sibling subscription.
pub struct OneShot<T> {
    slot: Rc<RefCell<Option<T>>>,
}

impl<T> Clone for OneShot<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T> OneShot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the token. Replaces any payload not yet taken.
    pub fn arm(&self, payload: T) {
        *self.slot.borrow_mut() = Some(payload);
    }

    pub fn take(&self) -> Option<T> {
        self.slot.borrow_mut().take()
    }
}

/// Get-or-create holder for a page resource that must exist at most once.
pub struct Singleton<T> {
    slot: RefCell<Option<Rc<T>>>,
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }
}

impl<T> Singleton<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached instance, creating it with `init` on first success.
    pub fn get_or_try_init<F>(&self, init: F) -> Result<Rc<T>, String>
    where
        F: FnOnce() -> Result<T, String>,
    {
        if let Some(existing) = self.slot.borrow().as_ref() {
            return Ok(existing.clone());
        }
        let created = Rc::new(init()?);
        *self.slot.borrow_mut() = Some(created.clone());
        Ok(created)
    }

    pub fn get(&self) -> Option<Rc<T>> {
        self.slot.borrow().clone()
    }
}
