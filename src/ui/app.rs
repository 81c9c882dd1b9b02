use chrono::{Datelike, Local, Months, NaiveDate};
use std::sync::mpsc::Receiver;

use crate::config::AppConfig;
use crate::db::Database;
use crate::filter::DateRange;
use crate::models::{Category, Currency, Expense, ExpenseForm, ExpenseId, ExpenseKind};
use crate::store::{DeleteOutcome, ExpenseStore, LoadOutcome, StoreEvent};
use crate::ui::theme::{Palette, ThemeMode};
use crate::view::DashboardView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: ExpenseId, description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Date,
    Category,
    Kind,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Description,
            Self::Amount,
            Self::Date,
            Self::Category,
            Self::Kind,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Date => "Date (YYYY-MM-DD)",
            Self::Category => "Category",
            Self::Kind => "Type",
        }
    }

    /// Fields picked from a fixed set rather than typed.
    pub(crate) fn is_choice(&self) -> bool {
        matches!(self, Self::Category | Self::Kind)
    }
}

/// The add/edit form. `editing` is `None` when adding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormState {
    pub(crate) editing: Option<ExpenseId>,
    pub(crate) form: ExpenseForm,
    pub(crate) field: usize,
    pub(crate) error: Option<String>,
}

impl FormState {
    fn new_expense(today: NaiveDate) -> Self {
        Self {
            editing: None,
            form: ExpenseForm {
                date: today.format("%Y-%m-%d").to_string(),
                category: Category::Other.as_str().to_string(),
                kind: ExpenseKind::Debit.as_str().to_string(),
                ..ExpenseForm::default()
            },
            field: 0,
            error: None,
        }
    }

    fn edit(expense: &Expense) -> Self {
        Self {
            editing: Some(expense.id),
            form: ExpenseForm::from_expense(expense),
            field: 0,
            error: None,
        }
    }

    pub(crate) fn title(&self) -> String {
        match self.editing {
            Some(id) => format!(" Edit Expense {id} "),
            None => " Add Expense ".to_string(),
        }
    }

    pub(crate) fn current_field(&self) -> FormField {
        FormField::all()[self.field % FormField::all().len()]
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Description => &self.form.description,
            FormField::Amount => &self.form.amount,
            FormField::Date => &self.form.date,
            FormField::Category => &self.form.category,
            FormField::Kind => &self.form.kind,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Description => &mut self.form.description,
            FormField::Amount => &mut self.form.amount,
            FormField::Date => &mut self.form.date,
            FormField::Category => &mut self.form.category,
            FormField::Kind => &mut self.form.kind,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.field = (self.field + 1) % FormField::all().len();
    }

    pub(crate) fn prev_field(&mut self) {
        let len = FormField::all().len();
        self.field = (self.field + len - 1) % len;
    }

    pub(crate) fn push_char(&mut self, c: char) {
        let field = self.current_field();
        if !field.is_choice() {
            self.value_mut(field).push(c);
        }
    }

    pub(crate) fn pop_char(&mut self) {
        let field = self.current_field();
        if !field.is_choice() {
            self.value_mut(field).pop();
        }
    }

    /// Step a choice field through its options.
    pub(crate) fn cycle(&mut self, delta: i32) {
        match self.current_field() {
            FormField::Category => {
                let all = Category::all();
                let current = Category::parse(&self.form.category);
                let idx = all.iter().position(|c| *c == current).unwrap_or(0);
                let next = (idx as i32 + delta).rem_euclid(all.len() as i32) as usize;
                self.form.category = all[next].as_str().to_string();
            }
            FormField::Kind => {
                let kind = match ExpenseKind::parse(&self.form.kind) {
                    Some(ExpenseKind::Credit) => ExpenseKind::Debit,
                    _ => ExpenseKind::Credit,
                };
                self.form.kind = kind.as_str().to_string();
            }
            _ => {}
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    /// Persistent banner for load failures. Cleared by the next good load.
    pub(crate) notice: Option<String>,
    pub(crate) show_help: bool,
    pub(crate) theme: ThemeMode,
    pub(crate) currency: Currency,

    pub(crate) store: ExpenseStore<Database>,
    events: Receiver<StoreEvent>,
    pub(crate) range: DateRange,
    pub(crate) view: DashboardView,

    // Expenses table
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    pub(crate) form: Option<FormState>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(mut store: ExpenseStore<Database>, config: &AppConfig) -> Self {
        let events = store.subscribe();
        let range = DateRange::default();
        let view = DashboardView::compute(
            store.expenses(),
            range,
            Self::today(),
            store.revision(),
        );

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            notice: None,
            show_help: false,
            theme: config.theme,
            currency: Currency::new(config.currency_symbol.as_str()),

            store,
            events,
            range,
            view,

            expense_index: 0,
            expense_scroll: 0,

            form: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── Canonical state ───────────────────────────────────────

    pub(crate) fn reload(&mut self) {
        match self.store.load() {
            Ok(LoadOutcome::Loaded(_)) => self.notice = None,
            Ok(LoadOutcome::NoData) => {
                self.notice = None;
                self.set_status("No expenses recorded yet. Press 'a' to add one");
            }
            Ok(LoadOutcome::Stale) => {}
            Err(e) => {
                tracing::error!(error = %e, "reload failed");
                self.notice = Some(format!("Could not load expenses: {e}"));
            }
        }
        self.sync_view();
    }

    /// Drain store notifications and recompute the view if anything it
    /// depends on moved.
    pub(crate) fn sync_view(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                StoreEvent::Loaded { count } => {
                    if count > 0 {
                        self.set_status(format!("Loaded {count} expenses"));
                    }
                }
                StoreEvent::Created(id) => self.set_status(format!("Added expense {id}")),
                StoreEvent::Updated(id) => self.set_status(format!("Updated expense {id}")),
                StoreEvent::Deleted(id) => self.set_status(format!("Deleted expense {id}")),
            }
        }

        let today = Self::today();
        let revision = self.store.revision();
        if self.view.is_stale(revision, &self.range, today) {
            self.view = DashboardView::compute(self.store.expenses(), self.range, today, revision);
        }

        let len = self.view.visible.len();
        if self.expense_index >= len {
            self.expense_index = len.saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    // ── Filter ────────────────────────────────────────────────

    pub(crate) fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.sync_view();
        let label = self.range.describe(Self::today());
        self.set_status(format!("Showing {label}"));
    }

    /// Move the filter a whole month from the month currently in view.
    pub(crate) fn shift_month(&mut self, delta: i32) {
        let today = Self::today();
        let base = self.range.effective(today).start.unwrap_or(today);
        let first = base.with_day(1).unwrap_or(base);
        let target = if delta >= 0 {
            first.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };

        match target.and_then(|d| DateRange::month(d.year(), d.month())) {
            Some(range) => self.set_range(range),
            None => self.set_status("Month out of range"),
        }
    }

    // ── Selection ─────────────────────────────────────────────

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.view.visible.get(self.expense_index)
    }

    // ── Form ──────────────────────────────────────────────────

    pub(crate) fn open_add_form(&mut self) {
        self.form = Some(FormState::new_expense(Self::today()));
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn open_edit_form(&mut self) {
        match self.selected_expense() {
            Some(expense) => {
                self.form = Some(FormState::edit(expense));
                self.input_mode = InputMode::Form;
            }
            None => self.set_status("No expense selected"),
        }
    }

    pub(crate) fn cancel_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validate and apply the form. On failure the form stays open with the
    /// error shown and canonical state untouched.
    pub(crate) fn submit_form(&mut self) {
        let Some(state) = self.form.as_mut() else {
            return;
        };

        let draft = match state.form.validate() {
            Ok(draft) => draft,
            Err(e) => {
                state.error = Some(e.to_string());
                return;
            }
        };

        let result = match state.editing {
            Some(id) => self.store.update(id, draft),
            None => self.store.create(draft).map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.form = None;
                self.input_mode = InputMode::Normal;
                self.sync_view();
            }
            Err(e) => {
                tracing::warn!(error = %e, "form submit failed");
                if let Some(state) = self.form.as_mut() {
                    state.error = Some(e.to_string());
                }
            }
        }
    }

    // ── Delete ────────────────────────────────────────────────

    pub(crate) fn request_delete(&mut self) {
        let Some(expense) = self.selected_expense() else {
            self.set_status("No expense selected");
            return;
        };
        let id = expense.id;
        let description = expense.description.clone();
        self.confirm_message = format!("Delete '{description}'?");
        self.pending_action = Some(PendingAction::DeleteExpense { id, description });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self) {
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        let Some(action) = self.pending_action.take() else {
            return;
        };

        match action {
            PendingAction::DeleteExpense { id, description } => match self.store.delete(id) {
                Ok(DeleteOutcome::Deleted) => self.sync_view(),
                Ok(DeleteOutcome::AlreadyAbsent) => {
                    self.set_status(format!("'{description}' was already deleted"));
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "delete failed");
                    self.set_status(format!("Delete failed: {e}"));
                }
            },
        }
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.confirm_message.clear();
        self.input_mode = InputMode::Normal;
        self.set_status("Cancelled");
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.set_status(format!("Theme: {}", self.theme.as_str()));
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
