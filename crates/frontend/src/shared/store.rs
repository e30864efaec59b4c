//! Простое хранилище состояния с подписчиками

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_id: u64,
}

/// Изменяемое значение со списком слушателей
///
/// Слушатели вызываются синхронно после каждого `set`/`update`.
/// Клоны `Store` разделяют одно и то же значение.
pub struct Store<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.borrow_mut().value);
        self.notify();
    }

    /// Подписка; слушатель не вызывается сразу
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self) {
        // Снимок, чтобы слушатель мог читать store или отписываться
        let (value, listeners) = {
            let inner = self.inner.borrow();
            let listeners: Vec<Listener<T>> =
                inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (inner.value.clone(), listeners)
        };
        for listener in listeners {
            listener(&value);
        }
    }
}

/// Подписка на [`Store`]; снимается только явным `unsubscribe`
#[must_use = "a subscription stays registered until unsubscribe() is called"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}
