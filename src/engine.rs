//! Lookup resolution and multi-sheet search

pub mod resolver;
pub mod search;

pub use resolver::{
    DataWarning, Displayable, LookupOutcome, MAX_REDIRECT_HOPS, RedirectHop, SheetLookup,
    resolve_in_sheet,
};
pub use search::{SearchReport, SheetSearch};
