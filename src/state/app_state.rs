//! Application state definitions

use super::forms::NewLabRequestForm;
use super::store::Store;
use crate::i18n::Translator;

/// Addressable screens of the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Labs,
    NewLabRequest,
    ViewLab(String),
}

impl Route {
    /// Path for the route
    pub fn path(&self) -> String {
        match self {
            Self::Labs => "/labs".to_string(),
            Self::NewLabRequest => "/labs/new".to_string(),
            Self::ViewLab(id) => format!("/labs/{id}"),
        }
    }

    /// Parse a path into a route
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.trim_end_matches('/').strip_prefix("/labs")?;
        match rest {
            "" => Some(Self::Labs),
            "/new" => Some(Self::NewLabRequest),
            _ => {
                let id = rest.strip_prefix('/')?;
                if id.is_empty() || id.contains('/') {
                    None
                } else {
                    Some(Self::ViewLab(id.to_string()))
                }
            }
        }
    }

    /// Whether the route is a form that owns a draft
    pub fn is_form(&self) -> bool {
        matches!(self, Self::NewLabRequest)
    }
}

/// Routes kept for `back` before the oldest are dropped
const MAX_HISTORY: usize = 32;

/// Navigation history
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    /// Current route
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Path of the current route
    pub fn location(&self) -> String {
        self.current.path()
    }

    /// Navigate to a route, keeping the previous one in history.
    /// The labs list is the root, so reaching it starts a fresh history.
    pub fn push(&mut self, route: Route) {
        tracing::info!("Navigating {} -> {}", self.location(), route.path());
        if route == Route::Labs {
            self.history.clear();
            self.current = route;
            return;
        }
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }

    /// Go back to the last non-form route
    pub fn back(&mut self) {
        while let Some(route) = self.history.pop() {
            if route.is_form() {
                continue;
            }
            self.current = route;
            return;
        }
    }
}

/// Breadcrumb entry shown in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Translation key, or literal text when `translate` is false
    pub text: String,
    pub translate: bool,
    pub location: String,
}

impl Breadcrumb {
    fn key(key: &str, location: &str) -> Self {
        Self {
            text: key.to_string(),
            translate: true,
            location: location.to_string(),
        }
    }

    fn literal(text: &str, location: &str) -> Self {
        Self {
            text: text.to_string(),
            translate: false,
            location: location.to_string(),
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub router: Router,

    // Data
    pub store: Store,

    // Forms
    pub lab_request_form: NewLabRequestForm,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // UI state
    pub translator: Translator,
    pub service_connected: bool,
    pub status_message: Option<String>,
    pub errors: Vec<String>,
}

impl AppState {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            ..Default::default()
        }
    }

    /// Title for the current route (translated)
    pub fn title(&self) -> String {
        let t = &self.translator;
        match self.router.current() {
            Route::Labs => t.t("labs.label").to_string(),
            Route::NewLabRequest => t.t("labs.requests.new").to_string(),
            Route::ViewLab(id) => {
                let code = self
                    .store
                    .find_lab(id)
                    .map(|l| l.display_code())
                    .unwrap_or(id.as_str());
                format!("{} {code}", t.t("labs.label"))
            }
        }
    }

    /// Breadcrumbs for the current route, root first
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let root = Breadcrumb::key("labs.label", "/labs");
        match self.router.current() {
            Route::Labs => vec![root],
            route @ Route::NewLabRequest => {
                vec![root, Breadcrumb::key("labs.requests.new", &route.path())]
            }
            route @ Route::ViewLab(id) => {
                let code = self
                    .store
                    .find_lab(id)
                    .map(|l| l.display_code())
                    .unwrap_or(id.as_str());
                vec![root, Breadcrumb::literal(code, &route.path())]
            }
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Scroll down
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Oldest queued error
    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}
