//! Configuration-time strategy selection

/// Pick one of two interchangeable implementations
///
/// Only the selected constructor runs. Meant to be called once while the
/// host application is being wired up, with the result bound for the
/// lifetime of the application.
///
/// # Examples
/// ```
/// use services::defined_when;
///
/// type Describe = Box<dyn Fn(&str) -> String>;
///
/// let live_lookups = false;
/// let describe = defined_when(
///     live_lookups,
///     || Box::new(|site: &str| format!("live lookup for {}", site)) as Describe,
///     || Box::new(|_: &str| String::from("lookups disabled")) as Describe,
/// );
/// assert_eq!(describe("01646500"), "lookups disabled");
/// ```
pub fn defined_when<T>(
    condition: bool,
    primary: impl FnOnce() -> T,
    fallback: impl FnOnce() -> T,
) -> T {
    if condition {
        primary()
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_selects_primary_when_condition_holds() {
        let picked = defined_when(
            true,
            || Box::new(|x: u32| x * 2) as Box<dyn Fn(u32) -> u32>,
            || Box::new(|_: u32| 0u32) as Box<dyn Fn(u32) -> u32>,
        );
        assert_eq!(picked(21), 42);
    }

    #[test]
    fn test_selects_fallback_otherwise() {
        let picked = defined_when(
            false,
            || Box::new(|x: u32| x * 2) as Box<dyn Fn(u32) -> u32>,
            || Box::new(|_: u32| 0u32) as Box<dyn Fn(u32) -> u32>,
        );
        assert_eq!(picked(21), 0);
    }

    #[test]
    fn test_only_selected_constructor_runs() {
        let built = Cell::new(0);
        let value = defined_when(
            false,
            || {
                built.set(built.get() + 1);
                "primary"
            },
            || "fallback",
        );

        assert_eq!(value, "fallback");
        assert_eq!(built.get(), 0);
    }
}
