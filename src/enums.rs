//! Enum conversions.
//!
//! Two registrations are available for fieldless enums:
//!
//! - [`ini_enum!`](crate::ini_enum) registers a name table. Scalars must match
//!   a name exactly (case-sensitive). Names default to the variant identifier
//!   and can be overridden with `Variant = "name"`.
//! - [`ini_ordinal_enum!`](crate::ini_ordinal_enum) maps variants by their
//!   discriminant, written as a plain integer.
//!
//! ```ignore
//! #[derive(Default)]
//! enum Level { #[default] Low, High }
//! ini_enum!(Level { Low = "low", High = "high" });
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __ini_variant_name {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $name:literal) => {
        $name
    };
}

/// Implement [`FromIni`](crate::FromIni) and [`ToIni`](crate::ToIni) for a
/// fieldless enum through a name table.
#[macro_export]
macro_rules! ini_enum {
    ($ty:ident { $($variant:ident $(= $name:literal)?),+ $(,)? }) => {
        impl $crate::FromIni for $ty {
            fn from_ini(&mut self, node: &$crate::Node) -> $crate::Result<()> {
                let text = node.as_scalar().ok_or_else(|| {
                    $crate::IniError::conversion(stringify!($ty), "a section")
                })?;
                $(
                    if text == $crate::__ini_variant_name!($variant $(, $name)?) {
                        *self = $ty::$variant;
                        return Ok(());
                    }
                )+
                Err($crate::IniError::conversion(stringify!($ty), format!("'{text}'")))
            }
        }

        impl $crate::ToIni for $ty {
            fn to_ini(&self) -> $crate::Node {
                match self {
                    $($ty::$variant => $crate::Node::scalar(
                        $crate::__ini_variant_name!($variant $(, $name)?)
                    ),)+
                }
            }
        }
    };
}

/// Implement [`FromIni`](crate::FromIni) and [`ToIni`](crate::ToIni) for a
/// fieldless enum through its integer discriminants.
#[macro_export]
macro_rules! ini_ordinal_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::FromIni for $ty {
            fn from_ini(&mut self, node: &$crate::Node) -> $crate::Result<()> {
                let mut ordinal: i64 = 0;
                $crate::FromIni::from_ini(&mut ordinal, node)?;
                $(
                    if ordinal == $ty::$variant as i64 {
                        *self = $ty::$variant;
                        return Ok(());
                    }
                )+
                Err($crate::IniError::conversion(
                    stringify!($ty),
                    format!("ordinal {ordinal}"),
                ))
            }
        }

        impl $crate::ToIni for $ty {
            fn to_ini(&self) -> $crate::Node {
                match self {
                    $($ty::$variant => $crate::ToIni::to_ini(&($ty::$variant as i64)),)+
                }
            }
        }
    };
}
