//! Macros for declaring workflow state sets.

/// Declare a state enum whose variant order is its chain order.
///
/// Derives `Clone`, `PartialEq`, `Debug` and serde, and implements
/// [`State`](crate::core::State) and [`StateSet`](crate::core::StateSet).
///
/// # Example
///
/// ```
/// use rewind::core::{Chain, State};
/// use rewind::state_enum;
///
/// state_enum! {
///     pub enum TicketState {
///         Open,
///         InProgress,
///         Resolved,
///     }
/// }
///
/// let chain = Chain::<TicketState>::from_variants().unwrap();
/// assert_eq!(chain.terminal().state().name(), "Resolved");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl $crate::core::StateSet for $name {
            fn variants() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{State, StateSet};

    state_enum! {
        enum TestState {
            New,
            Processing,
            Shipped,
            Delivered,
        }
    }

    #[test]
    fn state_enum_macro_generates_traits() {
        assert_eq!(TestState::New.name(), "New");
        assert_eq!(TestState::Delivered.name(), "Delivered");
        assert_eq!(
            TestState::variants(),
            vec![
                TestState::New,
                TestState::Processing,
                TestState::Shipped,
                TestState::Delivered
            ]
        );
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_eq!(PublicState::variants().len(), 2);
    }

    #[test]
    fn state_enum_keeps_variant_attributes() {
        state_enum! {
            #[allow(dead_code)]
            enum Documented {
                /// First stage
                Draft,
                /// Last stage
                Published,
            }
        }

        assert_eq!(Documented::Published.name(), "Published");
    }
}
