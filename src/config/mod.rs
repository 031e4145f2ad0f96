// Process configuration read from the environment

pub mod app;
pub mod database;

pub use app::*;
pub use database::*;

/// Looks a variable up, treating an empty value the same as an unset one.
pub(crate) fn lookup_non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}
