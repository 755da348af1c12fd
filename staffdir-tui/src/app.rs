//! Application state and event loop
//!
//! The app owns the active screen and all IO: key events come from
//! crossterm, network results come back over an mpsc channel. Every
//! navigation bumps a generation counter and swaps the cancellation
//! token, so calls still in flight for a torn-down screen either stop
//! early or get discarded when their result arrives.

use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::router::Route;
use crate::ui;
use crate::views::{FormView, ListView, SubmitAction};
use shared::Employee;
use staffdir_client::{ClientConfig, DirectoryClient};

/// Result of a one-shot network call, delivered back to the UI loop
#[derive(Debug)]
pub enum NetEvent {
    ListLoaded(Vec<Employee>),
    ListFailed(String),
    EmployeeLoaded(Employee),
    EmployeeLoadFailed(String),
    Saved(Employee),
    SaveFailed(String),
    Deleted,
    DeleteFailed(String),
}

/// The active screen
pub enum Screen {
    List(ListView),
    Form(FormView),
}

pub struct App {
    pub route: Route,
    pub screen: Screen,
    client: DirectoryClient,
    generation: u64,
    cancel: CancellationToken,
    tx: mpsc::Sender<(u64, NetEvent)>,
    rx: mpsc::Receiver<(u64, NetEvent)>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let client_config = ClientConfig::new(config.api_base_url.clone())
            .with_timeout(config.request_timeout_secs);
        let (tx, rx) = mpsc::channel(16);

        Self {
            route: Route::EmployeeAll,
            screen: Screen::List(ListView::new()),
            client: DirectoryClient::new(&client_config),
            generation: 0,
            cancel: CancellationToken::new(),
            tx,
            rx,
            should_quit: false,
        }
    }

    /// Run until quit; the default route redirects to the list
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        self.navigate(Route::EmployeeAll);

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()?
                    && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
                {
                    self.handle_key(key);
                }
            }

            while let Ok((generation, net_event)) = self.rx.try_recv() {
                self.handle_net(generation, net_event);
            }
        }

        Ok(())
    }

    /// Switch screens: cancel in-flight work, bump the generation, and
    /// activate the target view
    pub fn navigate(&mut self, route: Route) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.generation += 1;
        tracing::debug!("navigate to {}", route.path());

        match &route {
            Route::EmployeeAll => {
                self.screen = Screen::List(ListView::new());
                self.fetch_list();
            }
            Route::EmployeeAdd => {
                self.screen = Screen::Form(FormView::create());
            }
            Route::EmployeeUpdate(id) => {
                self.screen = Screen::Form(FormView::edit(id.clone()));
                self.fetch_employee(id.clone());
            }
        }
        self.route = route;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Collect intents first; acting on them needs `self` back
        let mut goto: Option<Route> = None;
        let mut refetch = false;
        let mut delete: Option<String> = None;
        let mut submit: Option<SubmitAction> = None;

        match &mut self.screen {
            Screen::List(view) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Up | KeyCode::Char('k') => view.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => view.select_next(),
                KeyCode::Char('a') => goto = Some(Route::EmployeeAdd),
                KeyCode::Char('e') | KeyCode::Enter => {
                    if let Some(id) = view.selected_id() {
                        goto = Some(Route::EmployeeUpdate(id));
                    }
                }
                KeyCode::Char('d') => {
                    if !view.busy
                        && let Some(id) = view.selected_id()
                    {
                        view.busy = true;
                        delete = Some(id);
                    }
                }
                KeyCode::Char('r') => {
                    if !view.busy {
                        view.busy = true;
                        refetch = true;
                    }
                }
                _ => {}
            },
            Screen::Form(form) => match key.code {
                KeyCode::Esc => goto = Some(Route::EmployeeAll),
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                KeyCode::Enter => {
                    if let Some(action) = form.submit() {
                        form.saving = true;
                        form.error = None;
                        submit = Some(action);
                    }
                }
                _ => form.handle_key(key),
            },
        }

        if let Some(id) = delete {
            self.delete_employee(id);
        }
        if refetch {
            self.fetch_list();
        }
        if let Some(action) = submit {
            self.submit_employee(action);
        }
        if let Some(route) = goto {
            self.navigate(route);
        }
    }

    /// Apply a network result; results from a previous screen are dropped
    pub fn handle_net(&mut self, generation: u64, net_event: NetEvent) {
        if generation != self.generation {
            tracing::debug!("discarding stale response from a previous screen");
            return;
        }

        match net_event {
            NetEvent::ListLoaded(employees) => {
                if let Screen::List(view) = &mut self.screen {
                    tracing::info!("loaded {} employees", employees.len());
                    view.loaded(employees);
                }
            }
            NetEvent::ListFailed(message) => {
                tracing::warn!("list fetch failed: {message}");
                if let Screen::List(view) = &mut self.screen {
                    view.load_failed(message);
                }
            }
            NetEvent::EmployeeLoaded(employee) => {
                if let Screen::Form(form) = &mut self.screen {
                    form.employee_loaded(&employee);
                }
            }
            NetEvent::EmployeeLoadFailed(message) => {
                tracing::warn!("edit load failed: {message}");
                if let Screen::Form(form) = &mut self.screen {
                    form.load_failed(message);
                }
            }
            NetEvent::Saved(employee) => {
                tracing::info!("saved employee {}", employee.id.as_deref().unwrap_or("-"));
                self.navigate(Route::EmployeeAll);
            }
            NetEvent::SaveFailed(message) => {
                tracing::warn!("save failed: {message}");
                if let Screen::Form(form) = &mut self.screen {
                    form.save_failed(message);
                }
            }
            NetEvent::Deleted => {
                // Never splice locally; show the re-fetched list instead
                self.fetch_list();
            }
            NetEvent::DeleteFailed(message) => {
                tracing::warn!("delete failed: {message}");
                if let Screen::List(view) = &mut self.screen {
                    view.load_failed(message);
                }
            }
        }
    }

    fn fetch_list(&self) {
        let client = self.client.clone();
        self.spawn_net(async move {
            match client.list_all().await {
                Ok(employees) => NetEvent::ListLoaded(employees),
                Err(err) => NetEvent::ListFailed(err.to_string()),
            }
        });
    }

    fn fetch_employee(&self, id: String) {
        let client = self.client.clone();
        self.spawn_net(async move {
            match client.find(&id).await {
                Ok(employee) => NetEvent::EmployeeLoaded(employee),
                Err(err) => NetEvent::EmployeeLoadFailed(err.to_string()),
            }
        });
    }

    fn submit_employee(&self, action: SubmitAction) {
        let client = self.client.clone();
        self.spawn_net(async move {
            let result = match &action {
                SubmitAction::Create(employee) => client.create(employee).await,
                SubmitAction::Update(employee) => client.update(employee).await,
            };
            match result {
                Ok(employee) => NetEvent::Saved(employee),
                Err(err) => NetEvent::SaveFailed(err.to_string()),
            }
        });
    }

    fn delete_employee(&self, id: String) {
        let client = self.client.clone();
        self.spawn_net(async move {
            match client.delete(&id).await {
                Ok(()) => NetEvent::Deleted,
                Err(err) => NetEvent::DeleteFailed(err.to_string()),
            }
        });
    }

    /// Run one call in the background, bound to the current screen's
    /// lifetime: navigation cancels the token, and the generation tag
    /// lets late results be discarded
    fn spawn_net<F>(&self, fut: F)
    where
        F: Future<Output = NetEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let generation = self.generation;
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                net_event = fut => {
                    let _ = tx.send((generation, net_event)).await;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        // Unroutable port; spawned calls fail long after these tests finish
        App::new(&Config::with_base_url("http://127.0.0.1:9"))
    }

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: Some(id.into()),
            name: name.into(),
            email: format!("{name}@corp.com"),
            job_title: "Engineer".into(),
            phone: "555".into(),
            image_url: "img".into(),
            employee_code: String::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn stale_responses_are_discarded() {
        let mut app = test_app();
        app.navigate(Route::EmployeeAll);
        let stale = app.generation;
        app.navigate(Route::EmployeeAdd);
        app.navigate(Route::EmployeeAll);

        app.handle_net(stale, NetEvent::ListLoaded(vec![employee("1", "ann")]));
        match &app.screen {
            Screen::List(view) => assert!(view.employees.is_none()),
            Screen::Form(_) => panic!("expected list screen"),
        }

        app.handle_net(app.generation, NetEvent::ListLoaded(vec![employee("1", "ann")]));
        match &app.screen {
            Screen::List(view) => assert_eq!(view.len(), 1),
            Screen::Form(_) => panic!("expected list screen"),
        }
    }

    #[tokio::test]
    async fn save_success_navigates_back_to_the_list() {
        let mut app = test_app();
        app.navigate(Route::EmployeeAdd);
        app.handle_net(app.generation, NetEvent::Saved(employee("42", "bob")));

        assert_eq!(app.route, Route::EmployeeAll);
        assert!(matches!(app.screen, Screen::List(_)));
    }

    #[tokio::test]
    async fn delete_refetches_instead_of_splicing() {
        let mut app = test_app();
        app.navigate(Route::EmployeeAll);
        app.handle_net(
            app.generation,
            NetEvent::ListLoaded(vec![employee("1", "ann"), employee("2", "bob")]),
        );

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_net(app.generation, NetEvent::Deleted);

        // Old rows stay visible until the re-fetch lands
        match &app.screen {
            Screen::List(view) => {
                assert_eq!(view.len(), 2);
                assert!(view.busy);
            }
            Screen::Form(_) => panic!("expected list screen"),
        }

        app.handle_net(app.generation, NetEvent::ListLoaded(vec![employee("2", "bob")]));
        match &app.screen {
            Screen::List(view) => {
                assert_eq!(view.len(), 1);
                assert!(!view.busy);
            }
            Screen::Form(_) => panic!("expected list screen"),
        }
    }

    #[tokio::test]
    async fn edit_navigates_to_the_selected_row() {
        let mut app = test_app();
        app.navigate(Route::EmployeeAll);
        app.handle_net(
            app.generation,
            NetEvent::ListLoaded(vec![employee("1", "ann"), employee("2", "bob")]),
        );

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('e')));

        assert_eq!(app.route, Route::EmployeeUpdate("2".into()));
        match &app.screen {
            Screen::Form(form) => {
                assert_eq!(form.route_id.as_deref(), Some("2"));
                assert!(!form.loaded);
            }
            Screen::List(_) => panic!("expected form screen"),
        }
    }

    #[tokio::test]
    async fn escape_recovers_from_a_failed_edit_load() {
        let mut app = test_app();
        app.navigate(Route::EmployeeUpdate("404".into()));
        app.handle_net(
            app.generation,
            NetEvent::EmployeeLoadFailed("employee not found: 404".into()),
        );

        match &app.screen {
            Screen::Form(form) => assert!(form.is_fatal()),
            Screen::List(_) => panic!("expected form screen"),
        }

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.route, Route::EmployeeAll);
    }
}
