//! Proficiency point allocation
//!
//! Character generation, level-up and dual-classing all hand out weapon
//! proficiency points through the same screen. A session computes how many
//! points may be spent, lets the player move them between categories within
//! each category's floor and cap, and finally folds the result back into the
//! character's packed proficiency stats.

pub mod allocation;
pub mod budget;
pub mod commit;
pub mod engine;
pub mod session;
pub mod view;

pub use allocation::{AllocationEntry, AllocationState, MutationOutcome};
pub use budget::{compute_budget, Budget, BudgetInputs};
pub use commit::{fold_proficiency, CommitReport};
pub use engine::AllocationEngine;
pub use session::{ChangeHook, ProfsSession, ProfsWindow, SessionRequest};
pub use view::{render_page, CategoryDescriptor, Page, PagedView, RowView};
