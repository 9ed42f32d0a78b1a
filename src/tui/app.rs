//! TUI model — screens, cursors, and the configurator's selection state.
//!
//! The app never performs I/O. Key handling queues [`Effect`]s; the runner
//! drains them, runs the fetches on tokio, and feeds results back as
//! [`AppEvent`]s through `apply_event`.

use tracing::debug;

use crate::config::Config;
use crate::controller::{LayoutRequest, LayoutResponse, SelectionController};
use crate::i18n;
use crate::model::{Firmware, Recloser, ServiceSummary, Translation};
use crate::render::{RenderedPage, Renderer};

/// Lines moved by PageUp/PageDown in the content pane.
pub const PAGE_SCROLL: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// "Recloser Management": pick a device model.
    Inventory,
    /// "Select Firmware Version": pick a firmware of the chosen recloser.
    Firmware,
    /// Sidebar of services plus the rendered layout.
    Configurator,
}

/// Side effect requested by the model, performed by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchInventory,
    FetchServices { firmware_id: i64 },
    FetchLayout(LayoutRequest),
}

/// Fetch result delivered back into the event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Inventory(Vec<Recloser>),
    Services {
        firmware_id: i64,
        services: Vec<ServiceSummary>,
    },
    Layout(LayoutResponse),
}

/// The open configurator: one firmware of one recloser.
#[derive(Debug, Clone)]
pub struct ConfiguratorState {
    pub firmware_id: i64,
    pub recloser_label: String,
    pub version: String,
    /// False until the service list arrives.
    pub services_loaded: bool,
    pub controller: SelectionController,
}

pub struct TuiApp {
    pub screen: Screen,
    pub inventory: Vec<Recloser>,
    pub inventory_loaded: bool,
    pub recloser_index: usize,
    pub firmware_index: usize,
    pub configurator: Option<ConfiguratorState>,
    pub languages: Vec<String>,
    pub language_index: usize,
    /// Vertical scroll of the configurator content pane.
    pub content_scroll: u16,
    pub should_quit: bool,
    pending: Vec<Effect>,
    /// Highest layout request id issued so far, across configurator sessions.
    last_request_id: u64,
}

impl TuiApp {
    /// Start on the inventory screen with an inventory fetch queued.
    pub fn new(config: &Config) -> Self {
        let languages = config.language_cycle();
        let language_index = languages
            .iter()
            .position(|l| *l == config.language)
            .unwrap_or(0);
        Self {
            screen: Screen::Inventory,
            inventory: Vec::new(),
            inventory_loaded: false,
            recloser_index: 0,
            firmware_index: 0,
            configurator: None,
            languages,
            language_index,
            content_scroll: 0,
            should_quit: false,
            pending: vec![Effect::FetchInventory],
            last_request_id: 0,
        }
    }

    /// Take queued effects, oldest first.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    pub fn language(&self) -> &str {
        self.languages
            .get(self.language_index)
            .map(String::as_str)
            .unwrap_or(i18n::DEFAULT_LANGUAGE)
    }

    pub fn cycle_language(&mut self) {
        if !self.languages.is_empty() {
            self.language_index = (self.language_index + 1) % self.languages.len();
            debug!("label language now {}", self.language());
        }
    }

    pub fn label<'a>(&self, translations: &'a [Translation]) -> &'a str {
        i18n::resolve(translations, self.language())
    }

    pub fn selected_recloser(&self) -> Option<&Recloser> {
        self.inventory.get(self.recloser_index)
    }

    pub fn selected_firmware(&self) -> Option<&Firmware> {
        self.selected_recloser()?.firmwares.get(self.firmware_index)
    }

    /// The current layout rendered in the current language.
    pub fn rendered_page(&self) -> Option<RenderedPage> {
        let layout = self.configurator.as_ref()?.controller.current_layout()?;
        Some(Renderer::new(self.language()).render_page(layout))
    }

    // ── Navigation ──

    pub fn move_up(&mut self) {
        match self.screen {
            Screen::Inventory => self.recloser_index = self.recloser_index.saturating_sub(1),
            Screen::Firmware => self.firmware_index = self.firmware_index.saturating_sub(1),
            Screen::Configurator => {
                let request = self
                    .configurator
                    .as_mut()
                    .and_then(|c| c.controller.select_previous());
                self.request_layout(request);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.screen {
            Screen::Inventory => {
                if self.recloser_index + 1 < self.inventory.len() {
                    self.recloser_index += 1;
                }
            }
            Screen::Firmware => {
                let count = self.selected_recloser().map_or(0, |r| r.firmwares.len());
                if self.firmware_index + 1 < count {
                    self.firmware_index += 1;
                }
            }
            Screen::Configurator => {
                let request = self
                    .configurator
                    .as_mut()
                    .and_then(|c| c.controller.select_next());
                self.request_layout(request);
            }
        }
    }

    /// Enter: drill into the highlighted entry, or refetch the active service.
    pub fn open(&mut self) {
        match self.screen {
            Screen::Inventory => {
                if self.selected_recloser().is_some() {
                    self.firmware_index = 0;
                    self.screen = Screen::Firmware;
                }
            }
            Screen::Firmware => self.open_configurator(),
            Screen::Configurator => {
                let request = self.configurator.as_mut().and_then(|c| {
                    let id = c.controller.selected_service_id()?;
                    Some(c.controller.select(id))
                });
                self.request_layout(request);
            }
        }
    }

    pub fn back(&mut self) {
        match self.screen {
            Screen::Inventory => {}
            Screen::Firmware => self.screen = Screen::Inventory,
            Screen::Configurator => {
                self.configurator = None;
                self.content_scroll = 0;
                self.screen = Screen::Firmware;
            }
        }
    }

    pub fn scroll_up(&mut self) {
        self.content_scroll = self.content_scroll.saturating_sub(PAGE_SCROLL);
    }

    pub fn scroll_down(&mut self) {
        self.content_scroll = self.content_scroll.saturating_add(PAGE_SCROLL);
    }

    fn open_configurator(&mut self) {
        let (Some(recloser), Some(firmware)) = (self.selected_recloser(), self.selected_firmware())
        else {
            return;
        };
        let state = ConfiguratorState {
            firmware_id: firmware.id,
            recloser_label: self.label(&recloser.translations).to_string(),
            version: firmware.version.clone(),
            services_loaded: false,
            controller: SelectionController::starting_after(Vec::new(), self.last_request_id),
        };
        debug!("opening configurator for firmware {}", state.firmware_id);
        self.pending.push(Effect::FetchServices {
            firmware_id: state.firmware_id,
        });
        self.configurator = Some(state);
        self.content_scroll = 0;
        self.screen = Screen::Configurator;
    }

    fn request_layout(&mut self, request: Option<LayoutRequest>) {
        if let Some(request) = request {
            self.last_request_id = self.last_request_id.max(request.request_id);
            self.content_scroll = 0;
            self.pending.push(Effect::FetchLayout(request));
        }
    }

    // ── Fetch results ──

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Inventory(reclosers) => {
                self.inventory = reclosers;
                self.inventory_loaded = true;
                self.recloser_index = 0;
            }
            AppEvent::Services {
                firmware_id,
                services,
            } => {
                let Some(state) = self.configurator.as_mut() else {
                    return;
                };
                if state.firmware_id != firmware_id || state.services_loaded {
                    debug!("discarding service list for firmware {firmware_id}");
                    return;
                }
                state.controller =
                    SelectionController::starting_after(services, self.last_request_id);
                state.services_loaded = true;
                let request = state.controller.initial_request();
                self.request_layout(request);
            }
            AppEvent::Layout(response) => {
                if let Some(state) = self.configurator.as_mut() {
                    state.controller.apply(response);
                }
            }
        }
    }
}
