//! Helper macro for generating driven-port error enums.

/// Generate a `thiserror` enum plus snake_case constructor helpers.
///
/// Each variant takes the form `Name { field: Ty, .. } => "message"`; the
/// braces are optional for unit variants. Fields carry their own doc
/// comments. Constructors accept `impl Into<Ty>` so adapters can pass
/// `&str` for `String` fields.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $(
                    $(#[$field_meta:meta])*
                    $field:ident : $ty:ty
                ),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $(
                    $(#[$field_meta])*
                    $field : $ty
                ),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!(
                        "Build [`", stringify!($name), "::", stringify!($variant), "`]."
                    )]
                    pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
