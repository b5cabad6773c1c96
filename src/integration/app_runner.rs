use std::{future, sync::Arc};

use color_eyre::eyre::Result;
use futures::future::select_all;

use crate::{
    core::{
        cmd::Cmd,
        controller::{FetchOutcome, PagedListController},
        msg::Msg,
        raw_msg::RawMsg,
        state::AppState,
        translator::translate_raw_to_domain,
        update::update,
    },
    domain::{dish::Dish, fallback::fallback_dishes, source::DataSource},
    infrastructure::{
        config::Config,
        tui::{Event, TuiLike},
    },
    model::{paged_list::Phase, performance::PerformanceRecorder},
    perf::report::{create_performance_report, format_performance_report},
    presentation::components::Components,
};

/// One restaurant card: its own list controller and timing
struct Card<S: DataSource> {
    name: String,
    controller: PagedListController<S>,
    recorder: PerformanceRecorder,
}

/// Drives the dish screen: terminal events and fetch outcomes go in, frames
/// come out.
///
/// Every restaurant card loads its dishes independently; all of them share
/// one data source. All state changes happen inside [`AppRunner::run`];
/// fetches run as separate tasks and only their outcomes are merged here.
pub struct AppRunner<S: DataSource<Item = Dish>, T: TuiLike> {
    state: AppState,
    cards: Vec<Card<S>>,
    components: Components,
    tui: T,
}

impl<S: DataSource<Item = Dish>, T: TuiLike> AppRunner<S, T> {
    pub fn new(config: &Config, source: Arc<S>, tui: T) -> Self {
        Self::with_fallback(config, source, tui, fallback_dishes())
    }

    /// Like [`AppRunner::new`] but with custom items for a failed first load
    pub fn with_fallback(config: &Config, source: Arc<S>, tui: T, fallback: Vec<Dish>) -> Self {
        let restaurants = config.cards();
        let cards = restaurants
            .iter()
            .map(|restaurant| {
                let recorder = PerformanceRecorder::new();
                let controller = PagedListController::new(
                    Arc::clone(&source),
                    config.list.page_size,
                    fallback.clone(),
                )
                .with_recorder(recorder.clone());
                Card {
                    name: restaurant.shop_name.clone(),
                    controller,
                    recorder,
                }
            })
            .collect();
        Self {
            state: AppState::new_with_config(config),
            cards,
            components: Components::new(restaurants),
            tui,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn controller(&self, card: usize) -> Option<&PagedListController<S>> {
        self.cards.get(card).map(|c| &c.controller)
    }

    pub fn recorder(&self, card: usize) -> Option<&PerformanceRecorder> {
        self.cards.get(card).map(|c| &c.recorder)
    }

    pub fn tui(&self) -> &T {
        &self.tui
    }

    /// Run until quit or until the terminal stops delivering events
    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        for card in &mut self.cards {
            card.controller.initialize();
        }
        self.render()?;

        loop {
            tokio::select! {
                // outcomes first so a burst of keys cannot starve them
                biased;
                (index, outcome) = next_outcome(&mut self.cards) => {
                    if self.cards[index].controller.apply(outcome) {
                        self.sync_item_count(index)?;
                    }
                    self.render()?;
                }
                event = self.tui.next() => match event {
                    Some(event) => self.handle_event(event)?,
                    None => break,
                },
            }

            if self.state.system.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        self.log_performance_reports();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let raw = match event {
            Event::Key(key) => RawMsg::Key(key),
            Event::Resize(width, height) => RawMsg::Resize(width, height),
            Event::Tick => RawMsg::Tick,
            Event::Quit | Event::Closed => RawMsg::Quit,
            Event::Error => RawMsg::Error(String::from("terminal event stream failed")),
            Event::Render => return self.render(),
            Event::Init | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {
                return Ok(())
            }
        };

        let needs_render = !raw.is_frequent();
        for msg in translate_raw_to_domain(raw, &self.state) {
            self.send_msg(msg)?;
        }
        if needs_render {
            self.render()?;
        }
        Ok(())
    }

    fn send_msg(&mut self, msg: Msg) -> Result<()> {
        let (state, commands) = update(msg, std::mem::take(&mut self.state));
        self.state = state;
        for command in commands {
            self.execute(command)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Cmd) -> Result<()> {
        match command {
            Cmd::RequestMore { card } => {
                if let Some(c) = self.cards.get_mut(card) {
                    c.controller.request_more();
                }
            }
            Cmd::Refresh { card } => {
                if let Some(c) = self.cards.get_mut(card) {
                    c.controller.reset();
                    self.sync_item_count(card)?;
                }
            }
            Cmd::Resize { width, height } => {
                self.tui
                    .resize(ratatui::prelude::Rect::new(0, 0, width, height))?;
            }
            Cmd::LogError { message } => {
                log::error!("{message}");
            }
        }
        Ok(())
    }

    fn sync_item_count(&mut self, card: usize) -> Result<()> {
        let Some(c) = self.cards.get(card) else {
            return Ok(());
        };
        let count = c.controller.snapshot().len();
        let known = self.state.lists.get(card).map(|list| list.item_count);
        if known != Some(count) {
            self.send_msg(Msg::ItemsChanged { card, count })?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let snapshots: Vec<_> = self.cards.iter().map(|c| c.controller.snapshot()).collect();
        let state = &self.state;
        let components = &self.components;
        self.tui
            .draw(&mut |f| components.render(f, state, &snapshots))?;

        for (card, snapshot) in self.cards.iter().zip(&snapshots) {
            card.recorder.mark_first_render();
            if !snapshot.is_empty() && snapshot.phase != Phase::FailedFallback {
                card.recorder.mark_meaningful_paint();
            }
        }
        Ok(())
    }

    fn log_performance_reports(&self) {
        for card in &self.cards {
            let report = create_performance_report(&card.recorder.metrics());
            for line in format_performance_report(&report).lines() {
                log::info!("[{}] {line}", card.name);
            }
        }
    }
}

/// Wait for the next fetch outcome of any card, tagged with the card index.
///
/// Pending forever when there are no cards or nothing is in flight.
async fn next_outcome<S: DataSource>(cards: &mut [Card<S>]) -> (usize, FetchOutcome<S::Item>) {
    if cards.is_empty() {
        return future::pending().await;
    }
    let waits = cards
        .iter_mut()
        .map(|card| Box::pin(card.controller.next_outcome()));
    let (outcome, index, _) = select_all(waits).await;
    (index, outcome)
}
