//! Screen Layer
//!
//! Headless view models for each screen. They hold what the screen renders
//! and translate user actions into store or session calls; drawing and
//! navigation stay with the host shell.

mod list_detail;
mod list_overview;
mod new_list;
mod picker;
mod sign_in;

pub use list_detail::ListDetailScreen;
pub use list_overview::ListOverviewScreen;
pub use new_list::{NewListScreen, NewListView};
pub use picker::{Picker, PickerKind, PICKER_COLUMNS};
pub use sign_in::{SignInOutcome, SignInScreen};
