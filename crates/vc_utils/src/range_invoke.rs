/// Calls the target macro once for every prefix of an indexed parameter list.
///
/// Each call receives `[index: Ident, ...]`, starting with the empty list.
/// Leading attributes are forwarded to every call.
///
/// # Example
///
/// ```ignore
/// range_invoke!(my_macro: [0: P0, 1: P1, 2: P2]);
/// // eq to ↓
/// my_macro!([]);
/// my_macro!([0: P0]);
/// my_macro!([0: P0, 1: P1]);
/// my_macro!([0: P0, 1: P1, 2: P2]);
/// ```
#[macro_export]
macro_rules! range_invoke {
    ($(#[$meta:meta])* $macro:ident: [$($idx:tt: $p:ident),* $(,)?]) => {
        $crate::range_invoke!(@step [$(#[$meta])*] $macro; []; $($idx: $p),*);
    };
    (@step [$(#[$meta:meta])*] $macro:ident; [$($di:tt: $dp:ident),*];) => {
        $(#[$meta])* $macro!([$($di: $dp),*]);
    };
    (
        @step [$(#[$meta:meta])*] $macro:ident; [$($di:tt: $dp:ident),*];
        $i:tt: $p:ident $(, $ri:tt: $rp:ident)*
    ) => {
        $(#[$meta])* $macro!([$($di: $dp),*]);
        $crate::range_invoke!(
            @step [$(#[$meta])*] $macro; [$($di: $dp,)* $i: $p]; $($ri: $rp),*
        );
    };
}

/// Expands to the twelve-parameter list used by the arity-generic impls.
#[macro_export]
macro_rules! range_invoke_12 {
    ($(#[$meta:meta])* $macro:ident) => {
        $crate::range_invoke!(
            $(#[$meta])* $macro: [
                0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5,
                6: P6, 7: P7, 8: P8, 9: P9, 10: P10, 11: P11
            ]
        );
    };
}

#[cfg(test)]
mod tests {
    trait Arity {
        const N: usize;
    }

    macro_rules! impl_arity {
        ([$($i:tt: $p:ident),*]) => {
            impl<$($p),*> Arity for ($($p,)*) {
                const N: usize = <[usize]>::len(&[$($i),*]);
            }
        };
    }

    crate::range_invoke!(impl_arity: [0: A, 1: B, 2: C]);

    #[test]
    fn every_prefix() {
        assert_eq!(<() as Arity>::N, 0);
        assert_eq!(<(u8,) as Arity>::N, 1);
        assert_eq!(<(u8, u8) as Arity>::N, 2);
        assert_eq!(<(u8, u8, u8) as Arity>::N, 3);
    }
}
