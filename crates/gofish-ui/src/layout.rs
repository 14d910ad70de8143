use crate::resource::AssetManifest;
use gofish_core::game::engine::GameEngine;
use gofish_core::model::player::PlayerId;
use gofish_core::model::rank::Rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// One row of opponent hands above one row for the human, capped at the
/// manifest's maximum window.
pub fn window_size(
    opponent_count: usize,
    max_opponent_hand: usize,
    manifest: &AssetManifest,
) -> WindowSize {
    let card = &manifest.card_size;
    let pad = manifest.padding;
    let per_opponent = max_opponent_hand as u32 * card.width + pad;
    let width = (opponent_count as u32).saturating_mul(per_opponent) + pad;
    let height = card.height * 2 + pad * 4;
    WindowSize {
        width: width.min(manifest.max_window.width),
        height: height.min(manifest.max_window.height),
    }
}

/// Stable identity of a clickable element. Each widget carries its own id,
/// so a click always resolves to the element that was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    HandCard(usize),
    Opponent(PlayerId),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectRank(Rank),
    SelectTarget(PlayerId),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub id: ElementId,
    pub rect: Rect,
    pub action: Action,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    window: WindowSize,
    widgets: Vec<Widget>,
}

impl TableLayout {
    pub fn from_engine(engine: &GameEngine, manifest: &AssetManifest) -> Self {
        let card = &manifest.card_size;
        let pad = manifest.padding;
        let players = engine.players();
        let opponents: Vec<_> = players.iter().filter(|p| !p.is_human()).collect();
        let max_hand = opponents.iter().map(|p| p.hand().len()).max().unwrap_or(0);
        let window = window_size(opponents.len(), max_hand, manifest);
        let mut widgets = Vec::new();

        let panel_width = max_hand.max(1) as u32 * card.width;
        for (i, opponent) in opponents.iter().enumerate() {
            widgets.push(Widget {
                id: ElementId::Opponent(opponent.id()),
                rect: Rect {
                    x: pad + i as u32 * (panel_width + pad),
                    y: pad,
                    width: panel_width,
                    height: card.height,
                },
                action: Action::SelectTarget(opponent.id()),
                label: format!("{} ({} cards)", opponent.name(), opponent.hand().len()),
            });
        }

        let hand_y = pad * 2 + card.height;
        if let Some(human) = players.iter().find(|p| p.is_human()) {
            for (i, &held) in human.hand().iter().enumerate() {
                widgets.push(Widget {
                    id: ElementId::HandCard(i),
                    rect: Rect {
                        x: pad + i as u32 * card.width,
                        y: hand_y,
                        width: card.width,
                        height: card.height,
                    },
                    action: Action::SelectRank(held.rank),
                    label: held.to_string(),
                });
            }
        }

        widgets.push(Widget {
            id: ElementId::Submit,
            rect: Rect {
                x: pad,
                y: hand_y + card.height + pad,
                width: card.width * 2,
                height: pad,
            },
            action: Action::Submit,
            label: "Ask for Card".into(),
        });

        Self { window, widgets }
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn action_for(&self, id: ElementId) -> Option<Action> {
        self.widgets.iter().find(|w| w.id == id).map(|w| w.action)
    }

    pub fn hit(&self, x: u32, y: u32) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.rect.contains(x, y))
    }
}
