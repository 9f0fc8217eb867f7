use std::cell::RefCell;
use std::rc::Rc;

/// A cheap, cloneable handle to a value shared between the embedding
/// application and a field instance. Reads and writes go through `RefCell`,
/// so a binding must stay on the thread that created it.
#[derive(Debug, Default)]
pub struct Binding<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Binding<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.inner.borrow())
    }
}

impl<T: Clone> Binding<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_value() {
        let first = Binding::new(String::from("one"));
        let second = first.clone();
        second.set(String::from("two"));
        assert_eq!(first.get(), "two");
    }

    #[test]
    fn with_reads_without_cloning() {
        let binding = Binding::new(String::from("hello"));
        let len = binding.with(|value| value.len());
        assert_eq!(len, 5);
    }
}
