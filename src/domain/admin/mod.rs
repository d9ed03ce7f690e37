//! Admin domain module
//!
//! Declares how kats appear in the administrative change list: which fields
//! are searched, displayed, filtered and used for the default ordering.

mod changelist;
mod registration;

pub use changelist::{ChangeList, ChangeListRow, ListFilter};
pub use registration::{
    AdminQueryError, ChangeListParams, ModelAdmin, DEFAULT_LIST_PER_PAGE, KAT_ADMIN,
    MAX_LIST_PER_PAGE,
};
