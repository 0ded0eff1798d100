//! Status line widget.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use uc_core::PlayerState;
use uc_core::party::{PartyState, PartyStateExt, keys};

use crate::theme::Theme;

/// One-line party status strip under the map panes.
pub struct StatusWidget<'a> {
    party: &'a dyn PartyState,
    player: PlayerState,
    theme: Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(party: &'a dyn PartyState, player: PlayerState, theme: Theme) -> Self {
        Self {
            party,
            player,
            theme,
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hp = self.party.get_i64(keys::HP);
        let gold = self.party.get_i64(keys::GOLD);

        let line = format!(
            "HP:{hp} $:{gold} Dlvl:{} Facing:{}",
            self.player.depth, self.player.facing,
        );
        let hp_style = if hp <= 5 {
            Style::default().fg(self.theme.bad)
        } else {
            Style::default().fg(self.theme.text)
        };
        buf.set_string(area.x, area.y, &line, hp_style);

        if self.party.on_fire() {
            let x = area.x + line.len() as u16 + 1;
            buf.set_string(x, area.y, "Burning", Style::default().fg(self.theme.bad));
        }

        // Key help on the second line when there is room.
        if area.height > 1 {
            buf.set_string(
                area.x,
                area.y + 1,
                "arrows move/turn  a/d strafe  o open  </> stairs  m map  q quit",
                Style::default().fg(self.theme.text_dim),
            );
        }
    }
}
