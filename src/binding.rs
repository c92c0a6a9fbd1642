use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Errors raised when accessing a [`Binding`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The value is borrowed elsewhere, typically because a mutation was attempted from inside an
    /// item ui closure while the view was iterating the collection.
    #[error("binding is already borrowed")]
    AlreadyBorrowed,
}

/// A two-way binding: shared, single threaded, mutable state.
///
/// Cloning a binding clones the handle, not the value. The caller keeps one handle and hands
/// another to the view; both see every write.
pub struct Binding<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Binding<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Borrow the current value. Panics if it is mutably borrowed, like [`RefCell::borrow`].
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, BindingError> {
        let value = self
            .inner
            .try_borrow()
            .map_err(|_| BindingError::AlreadyBorrowed)?;
        Ok(f(&value))
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, BindingError> {
        let mut value = self
            .inner
            .try_borrow_mut()
            .map_err(|_| BindingError::AlreadyBorrowed)?;
        Ok(f(&mut value))
    }

    pub fn set(&self, value: T) -> Result<(), BindingError> {
        self.with_mut(|current| *current = value)
    }
}

impl<T: Clone> Binding<T> {
    pub fn get(&self) -> Result<T, BindingError> {
        self.with(T::clone)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Binding<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(value) => f.debug_tuple("Binding").field(&*value).finish(),
            Err(_) => f.write_str("Binding(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let caller = Binding::new(vec![1, 2, 3]);
        let view = caller.clone();

        view.with_mut(|items| items.push(4)).unwrap();

        assert_eq!(caller.get().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn reentrant_mutation_is_an_error() {
        let flag = Binding::new(true);
        let other = flag.clone();

        let result = flag.with(|_| other.set(false)).unwrap();

        assert_eq!(result, Err(BindingError::AlreadyBorrowed));
        assert_eq!(flag.get(), Ok(true));
    }

    #[test]
    fn debug_does_not_panic_while_borrowed() {
        let binding = Binding::new(5);
        let text = binding
            .with_mut(|_| format!("{:?}", binding.clone()))
            .unwrap();
        assert_eq!(text, "Binding(<borrowed>)");
    }
}
