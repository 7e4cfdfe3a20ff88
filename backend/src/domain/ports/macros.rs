//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum LookupError {
            Unreachable { host: String } => "directory {host} unreachable",
            Rejected { status: u16 } => "directory rejected request with {status}",
            Partial { attribute: String, returned: usize } =>
                "directory returned {returned} rows for {attribute}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = LookupError::unreachable("ldap.example.com");
        assert_eq!(err.to_string(), "directory ldap.example.com unreachable");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = LookupError::rejected(503_u16);
        assert_eq!(err, LookupError::Rejected { status: 503 });
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = LookupError::partial("full_name", 3_usize);
        assert_eq!(err.to_string(), "directory returned 3 rows for full_name");
    }
}
