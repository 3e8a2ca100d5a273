use crate::app::NetworkEventSender;
use crate::config::Config;
use crate::events::network::Event as NetworkEvent;
use crate::store::{Action, AppState, Item, Project, RawMaterial, Store, TimerPhase, Weaver};
use crate::trends::{ScrapedProduct, TrendMatch};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::sync::mpsc::SendError;

use super::error::StateError;
use super::form::{FormState, FormSubmission};
use super::navigation::{TrendsPanel, View};

/// Shown in a trends panel when its request could not reach the network
/// thread.
///
pub const NETWORK_UNAVAILABLE: &str = "Network worker is not running. Restart to retry.";

/// Amount `+` and `-` change a material's stock by.
///
pub const STOCK_STEP: f64 = 10.0;

/// Message shown in the status line.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Deletion waiting for the user to confirm.
///
#[derive(Clone, Debug, PartialEq)]
pub struct PendingDelete {
    pub label: String,
    action: Action,
}

/// Houses data representative of application state.
///
pub struct State {
    store: Store,
    net_sender: Option<NetworkEventSender>,
    weaver: Weaver,
    products_per_site: u32,
    low_stock_threshold: f64,
    surplus_threshold: f64,
    terminal_size: Rect,
    spinner_index: usize,
    current_view: View,
    projects_list_state: ListState,
    materials_list_state: ListState,
    items_list_state: ListState,
    matches_list_state: ListState,
    scraped_list_state: ListState,
    trends_panel: TrendsPanel,
    form: Option<FormState>,
    delete_confirmation: Option<PendingDelete>,
    trend_matches: Vec<TrendMatch>,
    scraped_products: Vec<ScrapedProduct>,
    matching: bool,
    scraping: bool,
    trend_error: Option<String>,
    scrape_error: Option<String>,
    status: Option<Status>,
    log_visible: bool,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        let config = Config::default();
        State {
            store: Store::default(),
            net_sender: None,
            weaver: config.weaver,
            products_per_site: config.products_per_site,
            low_stock_threshold: config.low_stock_threshold,
            surplus_threshold: config.surplus_threshold,
            terminal_size: Rect::default(),
            spinner_index: 0,
            current_view: View::Projects,
            projects_list_state: ListState::default(),
            materials_list_state: ListState::default(),
            items_list_state: ListState::default(),
            matches_list_state: ListState::default(),
            scraped_list_state: ListState::default(),
            trends_panel: TrendsPanel::Matches,
            form: None,
            delete_confirmation: None,
            trend_matches: vec![],
            scraped_products: vec![],
            matching: false,
            scraping: false,
            trend_error: None,
            scrape_error: None,
            status: None,
            log_visible: false,
            theme: Theme::default(),
        }
    }
}

impl State {
    pub fn new(store: Store, net_sender: NetworkEventSender, config: &Config, theme: Theme) -> Self {
        let mut state = State {
            store,
            net_sender: Some(net_sender),
            weaver: config.weaver.clone(),
            products_per_site: config.products_per_site,
            low_stock_threshold: config.low_stock_threshold,
            surplus_threshold: config.surplus_threshold,
            theme,
            ..State::default()
        };
        state.clamp_selections();
        state
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Returns the store.
    ///
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the current store snapshot.
    ///
    pub fn app_state(&self) -> &AppState {
        self.store.state()
    }

    pub fn weaver(&self) -> &Weaver {
        &self.weaver
    }

    pub fn low_stock_threshold(&self) -> f64 {
        self.low_stock_threshold
    }

    pub fn surplus_threshold(&self) -> f64 {
        self.surplus_threshold
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        &self.current_view
    }

    /// Switch to the given view, dropping any pending confirmation.
    ///
    pub fn select_view(&mut self, view: View) -> &mut Self {
        self.current_view = view;
        self.delete_confirmation = None;
        self
    }

    pub fn next_view(&mut self) -> &mut Self {
        let view = self.current_view.next();
        self.select_view(view)
    }

    pub fn previous_view(&mut self) -> &mut Self {
        let view = self.current_view.previous();
        self.select_view(view)
    }

    pub fn get_projects_list_state(&mut self) -> &mut ListState {
        &mut self.projects_list_state
    }

    pub fn get_materials_list_state(&mut self) -> &mut ListState {
        &mut self.materials_list_state
    }

    pub fn get_items_list_state(&mut self) -> &mut ListState {
        &mut self.items_list_state
    }

    pub fn get_matches_list_state(&mut self) -> &mut ListState {
        &mut self.matches_list_state
    }

    pub fn get_scraped_list_state(&mut self) -> &mut ListState {
        &mut self.scraped_list_state
    }

    pub fn trends_panel(&self) -> TrendsPanel {
        self.trends_panel
    }

    /// Toggle which trends list the cursor moves in.
    ///
    pub fn toggle_trends_panel(&mut self) -> &mut Self {
        self.trends_panel = match self.trends_panel {
            TrendsPanel::Matches => TrendsPanel::Scraped,
            TrendsPanel::Scraped => TrendsPanel::Matches,
        };
        self
    }

    /// Move the cursor of the current list down, wrapping around.
    ///
    pub fn next_index(&mut self) -> &mut Self {
        let (list_state, len) = self.current_list();
        step(list_state, len, true);
        self
    }

    /// Move the cursor of the current list up, wrapping around.
    ///
    pub fn previous_index(&mut self) -> &mut Self {
        let (list_state, len) = self.current_list();
        step(list_state, len, false);
        self
    }

    fn current_list(&mut self) -> (&mut ListState, usize) {
        let state = self.store.state();
        match self.current_view {
            View::Projects => (&mut self.projects_list_state, state.projects().len()),
            View::Materials => (&mut self.materials_list_state, state.raw_materials().len()),
            View::Items => (&mut self.items_list_state, state.items().len()),
            View::Trends => match self.trends_panel {
                TrendsPanel::Matches => (&mut self.matches_list_state, self.trend_matches.len()),
                TrendsPanel::Scraped => (&mut self.scraped_list_state, self.scraped_products.len()),
            },
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects_list_state
            .selected()
            .and_then(|i| self.store.state().projects().get(i))
    }

    pub fn selected_raw_material(&self) -> Option<&RawMaterial> {
        self.materials_list_state
            .selected()
            .and_then(|i| self.store.state().raw_materials().get(i))
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items_list_state
            .selected()
            .and_then(|i| self.store.state().items().get(i))
    }

    /// Keep every list cursor inside its list after the lists changed.
    ///
    fn clamp_selections(&mut self) {
        let state = self.store.state();
        clamp(&mut self.projects_list_state, state.projects().len());
        clamp(&mut self.materials_list_state, state.raw_materials().len());
        clamp(&mut self.items_list_state, state.items().len());
        clamp(&mut self.matches_list_state, self.trend_matches.len());
        clamp(&mut self.scraped_list_state, self.scraped_products.len());
    }

    pub fn timer_phase(&self) -> TimerPhase {
        self.store.state().timer_phase()
    }

    pub fn timer_running(&self) -> bool {
        self.timer_phase() == TimerPhase::Running
    }

    /// Start the timer on the selected project.
    ///
    pub fn start_timer(&mut self) -> &mut Self {
        let result = self
            .selected_project()
            .map(|p| p.id.clone())
            .ok_or(StateError::NothingSelected)
            .and_then(|id| Ok(self.store.timer().start(&id)?));
        self.report(result);
        self
    }

    pub fn pause_timer(&mut self) -> &mut Self {
        let result = self.store.timer().pause();
        self.report(result.map_err(StateError::from));
        self
    }

    pub fn resume_timer(&mut self) -> &mut Self {
        let result = self.store.timer().resume();
        self.report(result.map_err(StateError::from));
        self
    }

    pub fn stop_timer(&mut self) -> &mut Self {
        let result = self.store.timer().stop();
        self.report(result.map_err(StateError::from));
        self
    }

    /// Recompute the visible timer from the clock.
    ///
    pub fn tick_timer(&mut self) -> &mut Self {
        if let Err(e) = self.store.timer().tick() {
            warn!("Timer tick failed: {}", e);
        }
        self
    }

    pub fn next_stage(&mut self) -> &mut Self {
        self.shift_stage(true)
    }

    pub fn previous_stage(&mut self) -> &mut Self {
        self.shift_stage(false)
    }

    fn shift_stage(&mut self, forward: bool) -> &mut Self {
        let result = self
            .selected_project()
            .map(|p| {
                let stage = if forward {
                    p.current_stage.next()
                } else {
                    p.current_stage.previous()
                };
                (p.id.clone(), stage)
            })
            .ok_or(StateError::NothingSelected)
            .and_then(|(id, stage)| Ok(self.store.update_project_stage(&id, stage)?));
        self.report(result);
        self
    }

    pub fn increase_stock(&mut self) -> &mut Self {
        self.adjust_stock(STOCK_STEP)
    }

    pub fn decrease_stock(&mut self) -> &mut Self {
        self.adjust_stock(-STOCK_STEP)
    }

    /// Change the selected material's stock by `delta`, stopping at zero.
    ///
    fn adjust_stock(&mut self, delta: f64) -> &mut Self {
        let result = self
            .selected_raw_material()
            .map(|m| (m.id.clone(), (m.quantity + delta).max(0.0)))
            .ok_or(StateError::NothingSelected)
            .and_then(|(material_id, quantity)| {
                Ok(self.store.dispatch(Action::AdjustStock {
                    material_id,
                    quantity,
                })?)
            });
        self.report(result);
        self
    }

    pub fn get_form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    /// Open a creation form for the records of the current view.
    ///
    pub fn open_new_form(&mut self) -> &mut Self {
        self.form = match self.current_view {
            View::Projects => Some(FormState::new_project()),
            View::Materials => Some(FormState::new_raw_material()),
            View::Items => Some(FormState::new_item()),
            View::Trends => None,
        };
        self
    }

    /// Open an edit form for the selected record of the current view.
    ///
    pub fn open_edit_form(&mut self) -> &mut Self {
        let form = match self.current_view {
            View::Projects => self.selected_project().map(FormState::edit_project),
            View::Materials => self.selected_raw_material().map(FormState::edit_raw_material),
            View::Items => self.selected_item().map(FormState::edit_item),
            View::Trends => return self,
        };
        match form {
            Some(form) => self.form = Some(form),
            None => {
                self.report::<()>(Err(StateError::NothingSelected));
            }
        }
        self
    }

    pub fn close_form(&mut self) -> &mut Self {
        self.form = None;
        self
    }

    pub fn form_next_field(&mut self) -> &mut Self {
        if let Some(form) = self.form.as_mut() {
            form.next_field();
        }
        self
    }

    pub fn form_previous_field(&mut self) -> &mut Self {
        if let Some(form) = self.form.as_mut() {
            form.previous_field();
        }
        self
    }

    pub fn form_push_char(&mut self, c: char) -> &mut Self {
        if let Some(form) = self.form.as_mut() {
            form.push_char(c);
        }
        self
    }

    pub fn form_pop_char(&mut self) -> &mut Self {
        if let Some(form) = self.form.as_mut() {
            form.pop_char();
        }
        self
    }

    /// Parse the open form and apply it. The form stays open on failure.
    ///
    pub fn submit_form(&mut self) -> &mut Self {
        let form = match self.form.as_ref() {
            Some(form) => form,
            None => return self,
        };
        let title = form.kind.title();
        let result = form
            .submit(self.store.state())
            .and_then(|submission| self.apply_submission(submission));
        if let Some(name) = self.report(result) {
            self.form = None;
            self.status = Some(Status::Info(format!("{}: saved '{}'", title, name)));
        }
        self
    }

    fn apply_submission(&mut self, submission: FormSubmission) -> Result<String, StateError> {
        let name = match submission {
            FormSubmission::NewProject(draft) => self.store.create_project(draft)?.name,
            FormSubmission::Project(project) => {
                let name = project.name.clone();
                self.store.dispatch(Action::UpdateProject(project))?;
                name
            }
            FormSubmission::NewRawMaterial(draft) => self.store.create_raw_material(draft)?.name,
            FormSubmission::RawMaterial(material) => {
                let name = material.name.clone();
                self.store.dispatch(Action::UpdateRawMaterial(material))?;
                name
            }
            FormSubmission::NewItem(draft) => self.store.create_item(draft)?.name,
            FormSubmission::Item(item) => {
                let name = item.name.clone();
                self.store.dispatch(Action::UpdateItem(item))?;
                name
            }
        };
        self.clamp_selections();
        Ok(name)
    }

    /// Ask to delete the selected record of the current view.
    ///
    pub fn request_delete(&mut self) -> &mut Self {
        let pending = match self.current_view {
            View::Projects => self.selected_project().map(|p| PendingDelete {
                label: format!("project '{}'", p.name),
                action: Action::DeleteProject(p.id.clone()),
            }),
            View::Materials => self.selected_raw_material().map(|m| PendingDelete {
                label: format!("material '{}'", m.name),
                action: Action::DeleteRawMaterial(m.id.clone()),
            }),
            View::Items => self.selected_item().map(|i| PendingDelete {
                label: format!("item '{}'", i.name),
                action: Action::DeleteItem(i.id.clone()),
            }),
            View::Trends => return self,
        };
        match pending {
            Some(pending) => self.delete_confirmation = Some(pending),
            None => {
                self.report::<()>(Err(StateError::NothingSelected));
            }
        }
        self
    }

    pub fn get_delete_confirmation(&self) -> Option<&PendingDelete> {
        self.delete_confirmation.as_ref()
    }

    pub fn has_delete_confirmation(&self) -> bool {
        self.delete_confirmation.is_some()
    }

    pub fn cancel_delete_confirmation(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self
    }

    /// Apply the pending deletion.
    ///
    pub fn confirm_delete(&mut self) -> &mut Self {
        if let Some(pending) = self.delete_confirmation.take() {
            let result = self.store.dispatch(pending.action);
            if self.report(result.map_err(StateError::from)).is_some() {
                info!("Deleted {}.", pending.label);
                self.status = Some(Status::Info(format!("Deleted {}", pending.label)));
            }
            self.clamp_selections();
        }
        self
    }

    pub fn get_trend_matches(&self) -> &[TrendMatch] {
        &self.trend_matches
    }

    pub fn get_scraped_products(&self) -> &[ScrapedProduct] {
        &self.scraped_products
    }

    pub fn is_matching(&self) -> bool {
        self.matching
    }

    pub fn is_scraping(&self) -> bool {
        self.scraping
    }

    pub fn get_trend_error(&self) -> Option<&str> {
        self.trend_error.as_deref()
    }

    pub fn get_scrape_error(&self) -> Option<&str> {
        self.scrape_error.as_deref()
    }

    /// Ask the network thread for trend matches of the weaver profile.
    ///
    pub fn request_trend_matches(&mut self) -> &mut Self {
        if self.matching {
            return self;
        }
        self.matching = true;
        self.trend_error = None;
        let event = NetworkEvent::MatchTrends {
            weaver_id: self.weaver.id.clone(),
        };
        if self.dispatch(event).is_err() {
            self.matching = false;
            self.trend_error = Some(NETWORK_UNAVAILABLE.to_string());
        }
        self
    }

    pub fn set_trend_matches(&mut self, result: Result<Vec<TrendMatch>, String>) -> &mut Self {
        self.matching = false;
        match result {
            Ok(matches) => {
                self.trend_matches = matches;
                self.trend_error = None;
            }
            Err(message) => self.trend_error = Some(message),
        }
        self.clamp_selections();
        self
    }

    /// Ask the network thread to run the scraping pipeline.
    ///
    pub fn request_scrape(&mut self) -> &mut Self {
        if self.scraping {
            return self;
        }
        self.scraping = true;
        self.scrape_error = None;
        let event = NetworkEvent::Scrape {
            products_per_site: self.products_per_site,
        };
        if self.dispatch(event).is_err() {
            self.scraping = false;
            self.scrape_error = Some(NETWORK_UNAVAILABLE.to_string());
        }
        self
    }

    pub fn set_scrape_result(&mut self, result: Result<Vec<ScrapedProduct>, String>) -> &mut Self {
        self.scraping = false;
        match result {
            Ok(products) => {
                self.scraped_products = products;
                self.scrape_error = None;
            }
            Err(message) => self.scrape_error = Some(message),
        }
        self.clamp_selections();
        self
    }

    pub fn get_status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn clear_status(&mut self) -> &mut Self {
        self.status = None;
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    /// Turn a failed UI intent into a status message. Returns the success
    /// value, clearing any previous error.
    ///
    fn report<T>(&mut self, result: Result<T, StateError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.status = None;
                Some(value)
            }
            Err(e) => {
                warn!("{}", e);
                self.status = Some(Status::Error(e.to_string()));
                None
            }
        }
    }

    /// Send the given event to the network thread. Fails once the network
    /// thread has gone away.
    ///
    pub fn dispatch(&self, event: NetworkEvent) -> Result<(), SendError<NetworkEvent>> {
        match &self.net_sender {
            Some(net_sender) => net_sender.send(event).map_err(|err| {
                error!("Received error from network dispatch: {}", err);
                err
            }),
            None => Ok(()),
        }
    }
}

fn step(list_state: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        list_state.select(None);
        return;
    }
    let next = match (list_state.selected(), forward) {
        (Some(i), true) if i + 1 < len => i + 1,
        (Some(_), true) => 0,
        (Some(i), false) if i > 0 => i - 1,
        (Some(_), false) => len - 1,
        (None, true) => 0,
        (None, false) => len - 1,
    };
    list_state.select(Some(next));
}

fn clamp(list_state: &mut ListState, len: usize) {
    match list_state.selected() {
        _ if len == 0 => list_state.select(None),
        Some(i) if i >= len => list_state.select(Some(len - 1)),
        None => list_state.select(Some(0)),
        Some(_) => (),
    }
}
