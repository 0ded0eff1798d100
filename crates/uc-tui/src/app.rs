//! Application state and main UI controller.
//!
//! Owns the dungeon session and the party ledger, routes decoded
//! commands into the session, and rebuilds the cached scenes for
//! whichever panes the session marked dirty. Everything is synchronous:
//! one key press, one batch of mutations, one repaint.

use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use uc_core::party::PartyLedger;
use uc_core::render::{MapScene, ViewScene, project_view, render_minimap};
use uc_core::{Cell, DungeonSession, Redraw, TransitionKind};

use crate::icons::GlyphArt;
use crate::input::{Command, key_to_command};
use crate::theme::Theme;
use crate::widgets::{MessagesWidget, MinimapWidget, StatusWidget, ViewWidget};

/// Application state.
pub struct App {
    session: DungeonSession,
    party: PartyLedger,
    theme: Theme,
    art: GlyphArt,

    /// Cached scenes, rebuilt only for panes the session invalidated.
    map_scene: MapScene,
    view_scene: ViewScene,

    should_quit: bool,
}

impl App {
    pub fn new(session: DungeonSession, party: PartyLedger, theme: Theme, art: GlyphArt) -> Self {
        let mut app = Self {
            session,
            party,
            theme,
            art,
            map_scene: MapScene::default(),
            view_scene: ViewScene::default(),
            should_quit: false,
        };
        app.rebuild_scenes(Redraw::all());
        app
    }

    /// Decode a terminal event into a command. Key releases and repeats
    /// are ignored.
    pub fn handle_event(&self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => key_to_command(key),
            _ => None,
        }
    }

    /// Apply one command to the session and repaint what it dirtied.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Step(step) => self.session.step(step, &mut self.party),
            Command::Rotate(turns) => self.session.rotate(turns, &mut self.party),
            Command::Ascend => self
                .session
                .transition(TransitionKind::Ascend, &mut self.party),
            Command::Descend => self
                .session
                .transition(TransitionKind::Descend, &mut self.party),
            Command::OpenChest => self.session.open_treasure(&mut self.party),
            Command::ToggleRevealAll => {
                let on = !self.session.visibility.reveal_all();
                self.session.visibility.set_reveal_all(on);
                self.session.invalidate(Redraw::MINIMAP);
            }
            Command::Quit => {
                self.should_quit = true;
                return;
            }
        }

        let dirty = self.session.take_redraw();
        self.rebuild_scenes(dirty);
    }

    fn rebuild_scenes(&mut self, dirty: Redraw) {
        if dirty.contains(Redraw::MINIMAP) {
            let trail: Vec<Cell> = self.session.trail().collect();
            self.map_scene = render_minimap(
                &self.session.level,
                &self.session.player,
                &self.session.visibility,
                &trail,
                &self.art,
            );
        }
        if dirty.contains(Redraw::VIEW) {
            self.view_scene = project_view(&self.session.level, &self.session.player);
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(2)])
            .split(frame.area());

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(30),
                Constraint::Length(self.map_scene.size as u16 + 2),
            ])
            .split(rows[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(panes[0]);

        frame.render_widget(ViewWidget::new(&self.view_scene, self.theme), left[0]);
        frame.render_widget(
            MessagesWidget::new(self.session.history(), self.theme),
            left[1],
        );
        frame.render_widget(
            MinimapWidget::new(&self.map_scene, &self.art, self.theme),
            panes[1],
        );
        frame.render_widget(
            StatusWidget::new(&self.party, self.session.player, self.theme),
            rows[1],
        );
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit || self.session.exited()
    }

    pub fn party(&self) -> &PartyLedger {
        &self.party
    }

    pub fn session(&self) -> &DungeonSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uc_core::dungeon::GenConfig;
    use uc_core::{GameRng, Step};

    fn test_app() -> App {
        let mut party = PartyLedger::new_delve(30, 0);
        let session = DungeonSession::new(GenConfig::default(), GameRng::new(7), &mut party);
        App::new(
            session,
            party,
            Theme::dark(),
            GlyphArt::new(crate::icons::GraphicsMode::Fancy),
        )
    }

    #[test]
    fn test_scenes_are_built_on_startup() {
        let app = test_app();
        assert!(!app.map_scene.nodes.is_empty());
        assert!(!app.view_scene.quads.is_empty());
    }

    #[test]
    fn test_rotate_drains_the_dirty_flags() {
        let mut app = test_app();
        let facing = app.session.player.facing;
        app.execute(Command::Rotate(1));
        assert_eq!(app.session.player.facing, facing.rotated(1));
        assert!(app.session.take_redraw().is_empty());
    }

    #[test]
    fn test_quit_command() {
        let mut app = test_app();
        app.execute(Command::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_reveal_toggle_round_trips() {
        let mut app = test_app();
        app.execute(Command::ToggleRevealAll);
        assert!(app.session.visibility.reveal_all());
        app.execute(Command::ToggleRevealAll);
        assert!(!app.session.visibility.reveal_all());
    }

    #[test]
    fn test_steps_leave_no_dirty_flags_behind() {
        let mut app = test_app();
        for step in [Step::Forward, Step::StepLeft, Step::Backward] {
            app.execute(Command::Step(step));
            assert!(app.session.take_redraw().is_empty());
        }
    }
}
