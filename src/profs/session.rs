//! A single proficiency allocation session
//!
//! Opening a session resolves the character's class and proficiency column,
//! computes the budget, seeds every category with its floor, and renders the
//! first page. UI events then arrive through the `on_*` methods.

use crate::character::{Character, StatAccessor};
use crate::core::config::EngineConfig;
use crate::core::error::{ProfError, Result};
use crate::core::types::{ClassId, SessionType, TextRef};
use crate::profs::allocation::{AllocationEntry, AllocationState, MutationOutcome};
use crate::profs::budget::{compute_budget, Budget, BudgetInputs};
use crate::profs::commit::{commit_allocation, CommitReport, ACTIVE_MASK};
use crate::profs::view::{render_page, CategoryDescriptor, Page, PagedView, RowView};
use crate::tables::{ClassRow, GameTables};

/// Toolkit-side surface a session draws into
pub trait ProfsWindow {
    /// Replace every visible row
    fn draw_rows(&mut self, rows: &[RowView]);

    /// Update the remaining-points label
    fn set_points_left(&mut self, points: u32);

    /// Show a text in the description panel
    fn set_description(&mut self, text: TextRef);

    /// Update the scrollbar's range and thumb
    fn set_scroll_range(&mut self, _max_top: usize, _top: usize) {}
}

/// Called after every successful increment or decrement
pub type ChangeHook = Box<dyn FnMut()>;

/// Parameters of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub session_type: SessionType,
    /// Level per class slot before the session
    pub prior_levels: Vec<u32>,
    /// Level per class slot after the session
    pub new_levels: Vec<u32>,
    /// Class being switched to; only meaningful when dual-classing
    pub override_class: Option<ClassId>,
    /// Whether the chargen screen carries a scrollbar
    pub scroll_enabled: bool,
    /// Overrides the configured table offset for this session
    pub table_row_offset: Option<usize>,
}

impl SessionRequest {
    pub fn new(session_type: SessionType) -> Self {
        Self {
            session_type,
            prior_levels: vec![0, 0, 0],
            new_levels: vec![1, 1, 1],
            override_class: None,
            scroll_enabled: true,
            table_row_offset: None,
        }
    }

    pub fn with_levels(mut self, prior: Vec<u32>, new: Vec<u32>) -> Self {
        self.prior_levels = prior;
        self.new_levels = new;
        self
    }

    pub fn with_override_class(mut self, class: ClassId) -> Self {
        self.override_class = Some(class);
        self
    }

    pub fn with_scroll(mut self, enabled: bool) -> Self {
        self.scroll_enabled = enabled;
        self
    }

    pub fn with_table_offset(mut self, offset: usize) -> Self {
        self.table_row_offset = Some(offset);
        self
    }
}

pub struct ProfsSession<W: ProfsWindow> {
    session_type: SessionType,
    class_name: String,
    retired_class: Option<String>,
    column: String,
    categories: Vec<CategoryDescriptor>,
    state: AllocationState,
    view: PagedView,
    budget: Budget,
    description: Option<TextRef>,
    window: W,
    on_change: ChangeHook,
}

impl<W: ProfsWindow> std::fmt::Debug for ProfsSession<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfsSession")
            .field("session_type", &self.session_type)
            .field("class_name", &self.class_name)
            .field("column", &self.column)
            .field("points_remaining", &self.state.points_remaining())
            .field("top_index", &self.view.top_index())
            .finish_non_exhaustive()
    }
}

impl<W: ProfsWindow> ProfsSession<W> {
    /// Build a session and render its first page
    ///
    /// Nothing is drawn unless every precondition holds.
    pub fn open(
        request: &SessionRequest,
        character: &Character,
        tables: &GameTables,
        config: &EngineConfig,
        window: W,
        on_change: ChangeHook,
    ) -> Result<Self> {
        let table = &tables.proficiencies;
        let offset = request.table_row_offset.unwrap_or(config.table_row_offset);
        if offset >= table.row_count() {
            return Err(ProfError::TableOffsetOutOfRange {
                offset,
                rows: table.row_count(),
            });
        }

        let class_row = resolve_class(request, character, tables)?;
        let multi = character.multi_class(tables);

        let rates = match multi {
            Some(multi) => multi
                .members
                .iter()
                .map(|&member| {
                    tables
                        .classes
                        .get(member)
                        .map(|row| (member, row.prof_rate))
                        .ok_or(ProfError::UnknownClass(member))
                })
                .collect::<Result<Vec<_>>>()?,
            None => vec![(class_row.id, class_row.prof_rate)],
        };

        let retired_class = character
            .dual
            .and_then(|dual| tables.classes.get(dual.old_class))
            .map(|row| row.name.clone());

        let column = resolve_column(request, character, tables, config, class_row, multi.is_some());
        let column_index = table
            .column_index(&column)
            .ok_or_else(|| ProfError::UnknownColumn(column.clone()))?;

        let is_ranger = class_row.has_token(&config.ranger_token);
        let mut categories = Vec::with_capacity(table.row_count() - offset);
        let mut entries = Vec::with_capacity(table.row_count() - offset);
        let mut placeholders = 0;

        for (display_index, row) in table.rows().iter().enumerate().skip(offset) {
            if row.is_placeholder(config.invalid_name_threshold) {
                placeholders += 1;
            }

            let floor = match request.session_type {
                // Only the active-class field counts toward what is already owned
                SessionType::LevelUp => (character.get_stat(row.stat_id) & ACTIVE_MASK) as u8,
                SessionType::CharGen | SessionType::DualClass => {
                    if is_ranger && row.name == config.two_weapon_row {
                        config.ranger_two_weapon_points
                    } else {
                        0
                    }
                }
            };

            let cap = table.cap(display_index, column_index);
            if floor > cap.min(config.indicator_ceiling) {
                tracing::warn!(row = %row.name, floor, cap, "Existing points exceed the column cap");
            }

            entries.push(AllocationEntry::new(floor, cap));
            categories.push(CategoryDescriptor {
                id: row.stat_id,
                display_index,
                row_name: row.name.clone(),
                name: row.display_name(config.invalid_name_threshold),
                description: row.desc_ref,
                cap,
            });
        }

        let budget = compute_budget(&BudgetInputs {
            prior_levels: &request.prior_levels,
            new_levels: &request.new_levels,
            rates: &rates,
            first_level: class_row.first_level,
            headroom: AllocationState::headroom_of(&entries),
        })?;

        let state = AllocationState::new(entries, budget.points, config.indicator_ceiling);
        let view = PagedView::new(
            config.visible_slots(request.session_type),
            categories.len(),
            placeholders,
            request.session_type.has_scrollbar(request.scroll_enabled),
        );

        let mut session = Self {
            session_type: request.session_type,
            class_name: class_row.name.clone(),
            retired_class,
            column,
            categories,
            state,
            view,
            budget,
            description: request.session_type.intro_text(),
            window,
            on_change,
        };

        if let Some(text) = session.description {
            session.window.set_description(text);
        }
        session.redraw_first();

        tracing::debug!(
            session = session.session_type.name(),
            class = %session.class_name,
            retired = session.retired_class.as_deref().unwrap_or("-"),
            column = %session.column,
            budget = session.budget.points,
            raw_budget = session.budget.raw,
            top_index = session.view.top_index(),
            "Opened proficiency session"
        );

        Ok(session)
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Class given up by a dual-classed character
    pub fn retired_class(&self) -> Option<&str> {
        self.retired_class.as_deref()
    }

    /// Proficiency column caps are read from
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn points_remaining(&self) -> u32 {
        self.state.points_remaining()
    }

    pub fn categories(&self) -> &[CategoryDescriptor] {
        &self.categories
    }

    pub fn entries(&self) -> &[AllocationEntry] {
        self.state.entries()
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    pub fn top_index(&self) -> usize {
        self.view.top_index()
    }

    pub fn view(&self) -> &PagedView {
        &self.view
    }

    /// Text currently shown in the description panel
    pub fn description(&self) -> Option<TextRef> {
        self.description
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    /// Render the current page without drawing it
    pub fn page(&self) -> Page {
        render_page(&self.categories, &self.state, &self.view)
    }

    /// Plus button on a visible row
    pub fn on_increment(&mut self, slot: usize) -> MutationOutcome {
        let Some(index) = self.select(slot) else {
            return MutationOutcome::NoSuchRow;
        };
        let outcome = self.state.increment(index);
        self.after_mutation(index, outcome);
        outcome
    }

    /// Minus button on a visible row
    pub fn on_decrement(&mut self, slot: usize) -> MutationOutcome {
        let Some(index) = self.select(slot) else {
            return MutationOutcome::NoSuchRow;
        };
        let outcome = self.state.decrement(index);
        self.after_mutation(index, outcome);
        outcome
    }

    /// Row label pressed: show its description, change nothing
    pub fn on_inspect(&mut self, slot: usize) -> Option<TextRef> {
        self.select(slot)?;
        self.description
    }

    /// Scrollbar moved
    pub fn on_scroll(&mut self, top: usize) {
        if !self.view.is_scrollable() {
            tracing::trace!(top, "Ignoring scroll on a session without a scrollbar");
            return;
        }
        self.view.scroll_to(top);
        self.redraw();
    }

    /// Write the allocation into the character's stats, ending the session
    pub fn commit(self, accessor: &mut impl StatAccessor) -> CommitReport {
        let report = commit_allocation(self.session_type, &self.categories, &self.state, accessor);
        tracing::debug!(
            session = self.session_type.name(),
            retired = self.retired_class.as_deref().unwrap_or("-"),
            written = report.written.len(),
            skipped = report.skipped,
            "Committed proficiencies"
        );
        report
    }

    /// Map a slot to its category and show the category's description
    fn select(&mut self, slot: usize) -> Option<usize> {
        let index = self.view.slot_to_index(slot)?;
        let category = self.categories.get(index)?;
        self.description = Some(category.description);
        self.window.set_description(category.description);
        Some(index)
    }

    fn after_mutation(&mut self, index: usize, outcome: MutationOutcome) {
        if outcome.is_changed() {
            self.redraw();
            (self.on_change)();
        } else {
            tracing::trace!(index, ?outcome, "Ignored proficiency change");
        }
    }

    fn redraw(&mut self) {
        let page = self.page();
        self.draw(&page);
    }

    /// First draw of a session, skipping unavailable leading rows once
    fn redraw_first(&mut self) {
        let page = self.page();
        self.draw(&page);
        if self.view.auto_skip(&page) > 0 {
            self.redraw();
        }
    }

    fn draw(&mut self, page: &Page) {
        self.window.set_points_left(page.points_remaining);
        self.window.draw_rows(&page.rows);
        if self.view.is_scrollable() {
            self.window.set_scroll_range(self.view.max_top(), self.view.top_index());
        }
    }
}

/// Class whose name, rate and grant drive the session
fn resolve_class<'a>(
    request: &SessionRequest,
    character: &Character,
    tables: &'a GameTables,
) -> Result<&'a ClassRow> {
    let class = request
        .override_class
        .or(character.dual.map(|dual| dual.new_class))
        .unwrap_or(character.class);
    tables.classes.get(class).ok_or(ProfError::UnknownClass(class))
}

/// Proficiency column: the kit's, else the class's (or the class it borrows from)
fn resolve_column(
    request: &SessionRequest,
    character: &Character,
    tables: &GameTables,
    config: &EngineConfig,
    class_row: &ClassRow,
    is_multi: bool,
) -> String {
    // Dual-class sessions would pick up the old class's kit
    let kit_applies = request.session_type != SessionType::DualClass
        && !is_multi
        && !character.is_dual_classed();

    if kit_applies {
        if let Some(kit_id) = character.kit {
            match tables.kits.get(kit_id) {
                Some(kit) => {
                    tracing::debug!(kit = %kit.name, column = %kit.prof_column, "Using kit column");
                    return kit.prof_column.clone();
                }
                None => tracing::warn!(kit = kit_id.0, "Kit not in kit table, using class column"),
            }
        }
    }

    config
        .column_fallback(&class_row.name)
        .unwrap_or(&class_row.name)
        .to_string()
}
