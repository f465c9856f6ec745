use alloc::boxed::Box;
use core::any::Any;

use crate::AnyValue;
use crate::any::{ArgTypes, take};
use crate::registry::{CtorFn, FuncFn, Receiver};

// -----------------------------------------------------------------------------
// Thunks

/// A type-erased constructor produced by [`IntoCtor`].
pub struct CtorThunk(pub(crate) CtorFn);

/// A type-erased function produced by [`IntoFunc`], [`IntoMethod`] or
/// [`IntoMethodMut`].
pub struct FuncThunk(pub(crate) FuncFn);

// -----------------------------------------------------------------------------
// Traits

/// A callable building a `T` from up to twelve arguments.
///
/// `Marker` only exists to tell the arity impls apart.
pub trait IntoCtor<T, Marker>: Send + Sync + 'static {
    type Args: ArgTypes;

    #[doc(hidden)]
    fn into_thunk(self) -> CtorThunk;
}

/// A callable without a receiver, registered as a shared function.
pub trait IntoFunc<Marker>: Send + Sync + 'static {
    type Args: ArgTypes;
    type Output: Any + Send + Sync;

    #[doc(hidden)]
    fn into_thunk(self) -> FuncThunk;
}

/// A callable taking `&T` first, registered as a constant function.
pub trait IntoMethod<T, Marker>: Send + Sync + 'static {
    type Args: ArgTypes;
    type Output: Any + Send + Sync;

    #[doc(hidden)]
    fn into_thunk(self) -> FuncThunk;
}

/// A callable taking `&mut T` first.
pub trait IntoMethodMut<T, Marker>: Send + Sync + 'static {
    type Args: ArgTypes;
    type Output: Any + Send + Sync;

    #[doc(hidden)]
    fn into_thunk(self) -> FuncThunk;
}

// -----------------------------------------------------------------------------
// Implementations

macro_rules! impl_callables {
    ([$($i:tt: $p:ident),*]) => {
        impl<T, F, $($p),*> IntoCtor<T, fn($($p),*) -> T> for F
        where
            T: Any + Send + Sync,
            F: Fn($($p),*) -> T + Send + Sync + 'static,
            $($p: Any + Send + Sync,)*
        {
            type Args = ($($p,)*);

            #[allow(non_snake_case, unused_variables, reason = "macro implementation.")]
            fn into_thunk(self) -> CtorThunk {
                CtorThunk(Box::new(move |args: &mut [AnyValue]| {
                    $(let Some($p) = take::<$p>(args, $i) else {
                        return AnyValue::invalid();
                    };)*
                    AnyValue::new((self)($($p),*))
                }))
            }
        }

        impl<F, R, $($p),*> IntoFunc<fn($($p),*) -> R> for F
        where
            F: Fn($($p),*) -> R + Send + Sync + 'static,
            R: Any + Send + Sync,
            $($p: Any + Send + Sync,)*
        {
            type Args = ($($p,)*);
            type Output = R;

            #[allow(non_snake_case, unused_variables, reason = "macro implementation.")]
            fn into_thunk(self) -> FuncThunk {
                FuncThunk(Box::new(move |_: Receiver<'_>, args: &mut [AnyValue]| {
                    $(let Some($p) = take::<$p>(args, $i) else {
                        return AnyValue::invalid();
                    };)*
                    AnyValue::new((self)($($p),*))
                }))
            }
        }

        impl<T, F, R, $($p),*> IntoMethod<T, fn(&T, $($p),*) -> R> for F
        where
            T: Any,
            F: Fn(&T, $($p),*) -> R + Send + Sync + 'static,
            R: Any + Send + Sync,
            $($p: Any + Send + Sync,)*
        {
            type Args = ($($p,)*);
            type Output = R;

            #[allow(non_snake_case, unused_variables, reason = "macro implementation.")]
            fn into_thunk(self) -> FuncThunk {
                FuncThunk(Box::new(move |receiver: Receiver<'_>, args: &mut [AnyValue]| {
                    let Some(instance) = receiver.get_ref::<T>() else {
                        return AnyValue::invalid();
                    };
                    $(let Some($p) = take::<$p>(args, $i) else {
                        return AnyValue::invalid();
                    };)*
                    AnyValue::new((self)(instance, $($p),*))
                }))
            }
        }

        impl<T, F, R, $($p),*> IntoMethodMut<T, fn(&mut T, $($p),*) -> R> for F
        where
            T: Any,
            F: Fn(&mut T, $($p),*) -> R + Send + Sync + 'static,
            R: Any + Send + Sync,
            $($p: Any + Send + Sync,)*
        {
            type Args = ($($p,)*);
            type Output = R;

            #[allow(non_snake_case, unused_variables, reason = "macro implementation.")]
            fn into_thunk(self) -> FuncThunk {
                FuncThunk(Box::new(move |receiver: Receiver<'_>, args: &mut [AnyValue]| {
                    let Some(instance) = receiver.get_mut::<T>() else {
                        return AnyValue::invalid();
                    };
                    $(let Some($p) = take::<$p>(args, $i) else {
                        return AnyValue::invalid();
                    };)*
                    AnyValue::new((self)(instance, $($p),*))
                }))
            }
        }
    };
}

vc_utils::range_invoke_12!(impl_callables);
