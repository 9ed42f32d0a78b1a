//! Key binding dispatch for the TUI.
//!
//! Ctrl+C or `q` quits. Up/Down move the highlight (in the configurator they
//! change the selected service). Enter opens. Esc/Backspace go back.
//! `l` cycles the label language. PageUp/PageDown scroll the content pane.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::TuiApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut TuiApp, key: KeyEvent) {
    // Windows reports releases too; act on presses only.
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('l') => app.cycle_language(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Enter => app.open(),
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tui::app::{AppEvent, Effect, Screen};
    use crate::source::{FixtureSource, LayoutSource};

    fn press(app: &mut TuiApp, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    async fn app_with_inventory() -> TuiApp {
        let mut app = TuiApp::new(&Config::default());
        let inventory = FixtureSource::sample().fetch_inventory().await.unwrap();
        app.apply_event(AppEvent::Inventory(inventory));
        app.drain_effects();
        app
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = TuiApp::new(&Config::default());
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn q_quits() {
        let mut app = TuiApp::new(&Config::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut app = TuiApp::new(&Config::default());
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.should_quit);
    }

    #[test]
    fn l_cycles_language() {
        let mut app = TuiApp::new(&Config::default());
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.language(), "ptBr");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = TuiApp::new(&Config::default());
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn arrows_move_recloser_highlight() {
        let mut app = app_with_inventory().await;
        press(&mut app, KeyCode::Down);
        assert_eq!(app.recloser_index, 1);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.recloser_index, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.recloser_index, 0);
    }

    #[tokio::test]
    async fn enter_and_esc_walk_the_screens() {
        let mut app = app_with_inventory().await;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Firmware);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Configurator);
        assert_eq!(
            app.drain_effects(),
            vec![Effect::FetchServices { firmware_id: 1 }]
        );
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Firmware);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.screen, Screen::Inventory);
    }

    #[tokio::test]
    async fn enter_in_configurator_refetches_active_service() {
        let mut app = app_with_inventory().await;
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        app.drain_effects();
        let services = FixtureSource::sample().fetch_service_summaries(1).await.unwrap();
        app.apply_event(AppEvent::Services {
            firmware_id: 1,
            services,
        });
        let first = app.drain_effects();
        press(&mut app, KeyCode::Enter);
        let second = app.drain_effects();
        match (first.as_slice(), second.as_slice()) {
            ([Effect::FetchLayout(a)], [Effect::FetchLayout(b)]) => {
                assert_eq!(a.service_id, b.service_id);
                assert!(b.request_id > a.request_id);
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[tokio::test]
    async fn page_keys_scroll_content() {
        let mut app = app_with_inventory().await;
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.content_scroll, crate::tui::app::PAGE_SCROLL);
    }
}
