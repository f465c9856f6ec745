use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;

// -----------------------------------------------------------------------------
// Holder

pub(crate) type EqFn = fn(&dyn Any, &dyn Any) -> bool;

struct Holder {
    value: Box<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
    eq: Option<EqFn>,
}

pub(crate) fn eq_impl<T: PartialEq + Any>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn type_mismatch<T>(found: Option<&'static str>) -> ! {
    match found {
        Some(found) => panic!("AnyValue holds `{found}`, not `{}`", type_name::<T>()),
        None => panic!("AnyValue is invalid, expected `{}`", type_name::<T>()),
    }
}

// -----------------------------------------------------------------------------
// AnyValue

/// A move-only container for one value of any `'static` type.
///
/// An `AnyValue` is either *invalid* (holds nothing) or owns a value together
/// with its [`TypeId`]. Invocations through the metadata layer report failure
/// by returning an invalid value, so callers check [`is_valid`] first.
///
/// Equality is opt-in: values created with [`comparable`] carry an equality
/// function. Two values compare equal when they hold the same type and either
/// side can compare it; otherwise they are never equal. Values produced by
/// the registry are comparable when their type was registered with
/// [`MetaFactory::comparable`](crate::MetaFactory::comparable).
///
/// # Examples
///
/// ```
/// use vc_meta::AnyValue;
///
/// let mut value = AnyValue::comparable(42_i32);
/// assert!(value.is::<i32>());
/// *value.write::<i32>() += 1;
/// assert_eq!(*value.read::<i32>(), 43);
///
/// assert_eq!(value, AnyValue::comparable(43_i32));
/// assert_ne!(value, AnyValue::comparable(43_i64));
/// assert!(!AnyValue::invalid().is_valid());
/// ```
///
/// [`is_valid`]: AnyValue::is_valid
/// [`comparable`]: AnyValue::comparable
#[derive(Default)]
pub struct AnyValue(Option<Holder>);

impl AnyValue {
    /// Creates an invalid value.
    #[inline]
    pub const fn invalid() -> Self {
        Self(None)
    }

    /// Wraps `value` without an equality capability.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Holder {
            value: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            eq: None,
        }))
    }

    /// Wraps `value` and captures its [`PartialEq`] implementation.
    pub fn comparable<T: Any + Send + Sync + PartialEq>(value: T) -> Self {
        Self(Some(Holder {
            value: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            eq: Some(eq_impl::<T>),
        }))
    }

    /// Attaches `eq` unless the value already carries an equality function.
    pub(crate) fn with_eq(mut self, eq: Option<EqFn>) -> Self {
        if let Some(holder) = &mut self.0 {
            holder.eq = holder.eq.or(eq);
        }
        self
    }

    /// Returns `true` if a value is held.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Returns `true` if the held value can be compared.
    #[inline]
    pub fn is_comparable(&self) -> bool {
        self.0.as_ref().is_some_and(|h| h.eq.is_some())
    }

    /// The [`TypeId`] of the held value.
    #[inline]
    pub fn ty_id(&self) -> Option<TypeId> {
        self.0.as_ref().map(|h| h.type_id)
    }

    /// The type name of the held value, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.0.as_ref().map(|h| h.type_name)
    }

    /// Returns `true` if the held value is exactly a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == Some(TypeId::of::<T>())
    }

    /// Borrows the held value if it is exactly a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref()?.value.downcast_ref()
    }

    /// Mutably borrows the held value if it is exactly a `T`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.as_mut()?.value.downcast_mut()
    }

    /// Typed read access.
    ///
    /// # Panics
    ///
    /// The caller must have checked [`is`](Self::is) first. Panics if the
    /// value is invalid or holds another type.
    #[inline]
    #[track_caller]
    pub fn read<T: Any>(&self) -> &T {
        match self.downcast_ref() {
            Some(value) => value,
            None => type_mismatch::<T>(self.type_name()),
        }
    }

    /// Typed write access.
    ///
    /// # Panics
    ///
    /// Same precondition as [`read`](Self::read).
    #[inline]
    #[track_caller]
    pub fn write<T: Any>(&mut self) -> &mut T {
        let found = self.type_name();
        match self.downcast_mut() {
            Some(value) => value,
            None => type_mismatch::<T>(found),
        }
    }

    /// Moves the held value out, or returns `self` unchanged on a mismatch.
    pub fn take<T: Any>(self) -> Result<T, Self> {
        let Some(Holder {
            value,
            type_id,
            type_name,
            eq,
        }) = self.0
        else {
            return Err(Self(None));
        };

        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self(Some(Holder {
                value,
                type_id,
                type_name,
                eq,
            }))),
        }
    }

    /// Takes the value out if it is a `T`, leaving `self` invalid.
    pub(crate) fn take_arg<T: Any>(&mut self) -> Option<T> {
        match core::mem::take(self).take::<T>() {
            Ok(value) => Some(value),
            Err(back) => {
                *self = back;
                None
            }
        }
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) if a.type_id == b.type_id => match a.eq.or(b.eq) {
                Some(eq) => eq(&*a.value, &*b.value),
                None => false,
            },
            _ => false,
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(holder) => write!(f, "AnyValue({})", holder.type_name),
            None => f.write_str("AnyValue(<invalid>)"),
        }
    }
}

// -----------------------------------------------------------------------------
// Receivers

/// Borrows an instance as `T`, looking through an [`AnyValue`] wrapper.
pub(crate) fn unerase_ref<T: Any>(instance: &dyn Any) -> Option<&T> {
    match instance.downcast_ref::<T>() {
        Some(value) => Some(value),
        None => instance.downcast_ref::<AnyValue>()?.downcast_ref::<T>(),
    }
}

/// Mutable counterpart of [`unerase_ref`].
pub(crate) fn unerase_mut<T: Any>(instance: &mut dyn Any) -> Option<&mut T> {
    if instance.is::<T>() {
        return instance.downcast_mut::<T>();
    }
    instance.downcast_mut::<AnyValue>()?.downcast_mut::<T>()
}
