use core::any::Any;
use core::marker::PhantomData;

use vc_os::sync::{PoisonError, RwLock};

use crate::AnyValue;
use crate::any::{unerase_mut, unerase_ref};
use crate::registry::ErasedData;

// -----------------------------------------------------------------------------
// DataAccess

/// Reads and writes one data member of `T`.
///
/// The accessor type decides whether the member is readonly or shared, see
/// [`field`], [`field_ref`], [`global_ref`] and [`global_mut`].
pub trait DataAccess<T>: Send + Sync + 'static {
    type Value: Clone + Any + Send + Sync;

    /// The value cannot be written.
    const READONLY: bool;

    /// The value is not bound to an instance of `T`.
    const SHARED: bool;

    /// Reads the value. `instance` is `None` for shared access.
    fn get(&self, instance: Option<&T>) -> Option<Self::Value>;

    /// Writes the value, returning `false` if it was not written.
    fn set(&self, instance: Option<&mut T>, value: Self::Value) -> bool;
}

// -----------------------------------------------------------------------------
// Accessors

/// A writable instance member, see [`field`].
pub struct Field<T, V, G, M> {
    get: G,
    get_mut: M,
    marker: PhantomData<fn(&T) -> V>,
}

/// A readonly instance member, see [`field_ref`].
pub struct FieldRef<T, V, G> {
    get: G,
    marker: PhantomData<fn(&T) -> V>,
}

/// A readonly shared variable, see [`global_ref`].
pub struct GlobalRef<V: 'static>(&'static V);

/// A writable shared variable, see [`global_mut`].
pub struct GlobalMut<V: 'static>(&'static RwLock<V>);

/// A writable member reached through a pair of projections.
///
/// ```
/// use vc_meta::field;
///
/// struct Point {
///     x: f32,
/// }
///
/// let _ = field(|p: &Point| &p.x, |p: &mut Point| &mut p.x);
/// ```
#[inline]
pub fn field<T, V, G, M>(get: G, get_mut: M) -> Field<T, V, G, M>
where
    G: Fn(&T) -> &V,
    M: Fn(&mut T) -> &mut V,
{
    Field {
        get,
        get_mut,
        marker: PhantomData,
    }
}

/// A readonly member reached through a projection.
#[inline]
pub fn field_ref<T, V, G>(get: G) -> FieldRef<T, V, G>
where
    G: Fn(&T) -> &V,
{
    FieldRef {
        get,
        marker: PhantomData,
    }
}

/// A readonly shared variable.
#[inline]
pub const fn global_ref<V>(value: &'static V) -> GlobalRef<V> {
    GlobalRef(value)
}

/// A writable shared variable behind a lock.
#[inline]
pub const fn global_mut<V>(value: &'static RwLock<V>) -> GlobalMut<V> {
    GlobalMut(value)
}

impl<T, V, G, M> DataAccess<T> for Field<T, V, G, M>
where
    T: 'static,
    V: Clone + Any + Send + Sync,
    G: Fn(&T) -> &V + Send + Sync + 'static,
    M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
{
    type Value = V;
    const READONLY: bool = false;
    const SHARED: bool = false;

    fn get(&self, instance: Option<&T>) -> Option<V> {
        instance.map(|instance| (self.get)(instance).clone())
    }

    fn set(&self, instance: Option<&mut T>, value: V) -> bool {
        match instance {
            Some(instance) => {
                *(self.get_mut)(instance) = value;
                true
            }
            None => false,
        }
    }
}

impl<T, V, G> DataAccess<T> for FieldRef<T, V, G>
where
    T: 'static,
    V: Clone + Any + Send + Sync,
    G: Fn(&T) -> &V + Send + Sync + 'static,
{
    type Value = V;
    const READONLY: bool = true;
    const SHARED: bool = false;

    fn get(&self, instance: Option<&T>) -> Option<V> {
        instance.map(|instance| (self.get)(instance).clone())
    }

    fn set(&self, _: Option<&mut T>, _: V) -> bool {
        false
    }
}

impl<T, V> DataAccess<T> for GlobalRef<V>
where
    V: Clone + Any + Send + Sync,
{
    type Value = V;
    const READONLY: bool = true;
    const SHARED: bool = true;

    fn get(&self, _: Option<&T>) -> Option<V> {
        Some(self.0.clone())
    }

    fn set(&self, _: Option<&mut T>, _: V) -> bool {
        false
    }
}

impl<T, V> DataAccess<T> for GlobalMut<V>
where
    V: Clone + Any + Send + Sync,
{
    type Value = V;
    const READONLY: bool = false;
    const SHARED: bool = true;

    fn get(&self, _: Option<&T>) -> Option<V> {
        Some(self.0.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn set(&self, _: Option<&mut T>, value: V) -> bool {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value;
        true
    }
}

// -----------------------------------------------------------------------------
// Erasure

/// Adapts a [`DataAccess`] to the object-safe form stored in the registry.
pub(crate) struct Erased<T, A> {
    access: A,
    marker: PhantomData<fn(&T)>,
}

impl<T, A> Erased<T, A> {
    #[inline]
    pub fn new(access: A) -> Self {
        Self {
            access,
            marker: PhantomData,
        }
    }
}

impl<T: Any, A: DataAccess<T>> ErasedData for Erased<T, A> {
    fn get(&self, instance: Option<&dyn Any>) -> AnyValue {
        let value = if A::SHARED {
            self.access.get(None)
        } else {
            match instance.and_then(unerase_ref::<T>) {
                Some(instance) => self.access.get(Some(instance)),
                None => None,
            }
        };
        value.map_or_else(AnyValue::invalid, AnyValue::new)
    }

    fn set(&self, instance: Option<&mut dyn Any>, value: &mut AnyValue) -> bool {
        if A::READONLY || !value.is::<A::Value>() {
            return false;
        }
        let instance = if A::SHARED {
            None
        } else {
            match instance.and_then(unerase_mut::<T>) {
                Some(instance) => Some(instance),
                None => return false,
            }
        };
        match value.take_arg::<A::Value>() {
            Some(value) => self.access.set(instance, value),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataAccess, Erased, field, field_ref, global_mut, global_ref};
    use crate::AnyValue;
    use crate::registry::ErasedData;
    use core::any::Any;
    use vc_os::sync::RwLock;

    struct Point {
        x: i32,
        y: i32,
    }

    static ORIGIN: i32 = 0;
    static SCALE: RwLock<i32> = RwLock::new(1);

    #[test]
    fn flags_follow_accessor() {
        fn flags<T, A: DataAccess<T>>(_: &A) -> (bool, bool) {
            (A::READONLY, A::SHARED)
        }

        let x = field(|p: &Point| &p.x, |p: &mut Point| &mut p.x);
        let y = field_ref(|p: &Point| &p.y);
        assert_eq!(flags::<Point, _>(&x), (false, false));
        assert_eq!(flags::<Point, _>(&y), (true, false));
        assert_eq!(flags::<Point, _>(&global_ref(&ORIGIN)), (true, true));
        assert_eq!(flags::<Point, _>(&global_mut(&SCALE)), (false, true));
    }

    #[test]
    fn erased_instance_access() {
        let x = Erased::<Point, _>::new(field(|p: &Point| &p.x, |p: &mut Point| &mut p.x));
        let mut point = Point { x: 1, y: 2 };

        assert_eq!(*x.get(Some(&point as &dyn Any)).read::<i32>(), 1);
        assert!(!x.get(None).is_valid());
        assert!(!x.get(Some(&5_u8 as &dyn Any)).is_valid());

        let mut value = AnyValue::new(7_i64);
        assert!(!x.set(Some(&mut point as &mut dyn Any), &mut value));
        assert!(value.is_valid());

        let mut value = AnyValue::new(7_i32);
        assert!(x.set(Some(&mut point as &mut dyn Any), &mut value));
        assert!(!value.is_valid());
        assert_eq!(point.x, 7);
        assert_eq!(point.y, 2);
    }

    #[test]
    fn erased_shared_access() {
        let scale = Erased::<Point, _>::new(global_mut(&SCALE));
        assert!(scale.set(None, &mut AnyValue::new(3_i32)));
        assert_eq!(*scale.get(None).read::<i32>(), 3);

        let origin = Erased::<Point, _>::new(global_ref(&ORIGIN));
        assert!(!origin.set(None, &mut AnyValue::new(3_i32)));
        assert_eq!(*origin.get(Some(&1_u8 as &dyn Any)).read::<i32>(), 0);
    }
}
