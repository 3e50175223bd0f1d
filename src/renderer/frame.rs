//! Frame builder: game state snapshot to draw list

use glam::Vec2;

use super::shapes::{self, Align, Frame, Sprite};
use crate::assets::LoadedAssets;
use crate::consts::*;
use crate::platform::KeyBindings;
use crate::sim::{Column, Difficulty, GamePhase, GameState, KeyPress};

const STAR_SIZE: f32 = 30.0;
const STAR_GAP: f32 = 6.0;
const HUD_MARGIN: f32 = 10.0;
const HUD_TEXT: f32 = 24.0;
const TITLE_TEXT: f32 = 56.0;
const GLYPH_TEXT: f32 = 32.0;

/// What the sink is able to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOptions {
    pub text_enabled: bool,
    pub menu_background: bool,
    pub star_icon: bool,
}

impl From<&LoadedAssets> for FrameOptions {
    fn from(assets: &LoadedAssets) -> Self {
        Self {
            text_enabled: assets.text_enabled,
            menu_background: assets.menu_background,
            star_icon: assets.star_icon,
        }
    }
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState, bindings: &KeyBindings, options: FrameOptions) -> Frame {
    let mut painter = Painter {
        frame: Frame::new(),
        options,
    };
    painter
        .frame
        .rect(Vec2::ZERO, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT), shapes::BACKGROUND);

    match state.phase {
        GamePhase::ShowingStart => painter.start_screen(bindings),
        GamePhase::ShowingMenu => painter.menu(bindings),
        GamePhase::Playing => painter.field(state, bindings),
        GamePhase::GameOver => {
            painter.field(state, bindings);
            painter.result_overlay("GAME OVER", state.round.score, bindings);
        }
        GamePhase::Win => {
            painter.field(state, bindings);
            painter.result_overlay("TRACK CLEARED", state.round.score, bindings);
        }
    }
    painter.frame
}

struct Painter {
    frame: Frame,
    options: FrameOptions,
}

impl Painter {
    fn text(&mut self, pos: Vec2, size: f32, align: Align, text: impl Into<String>, color: shapes::Color) {
        if self.options.text_enabled {
            self.frame.text(pos, size, align, text, color);
        }
    }

    fn backdrop(&mut self) {
        if self.options.menu_background {
            self.frame.sprite(
                Sprite::MenuBackground,
                Vec2::ZERO,
                Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            );
        }
    }

    fn start_screen(&mut self, bindings: &KeyBindings) {
        self.backdrop();
        let confirm = key_label(bindings, KeyPress::Confirm);
        self.text(
            Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT * 0.35),
            TITLE_TEXT,
            Align::Center,
            "KEYS RUSH",
            shapes::HIGHLIGHT,
        );
        self.text(
            Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT * 0.55),
            HUD_TEXT,
            Align::Center,
            format!("Press {confirm} to start"),
            shapes::TEXT,
        );
    }

    fn menu(&mut self, bindings: &KeyBindings) {
        self.backdrop();
        self.text(
            Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT * 0.25),
            HUD_TEXT * 1.5,
            Align::Center,
            "Select difficulty",
            shapes::HIGHLIGHT,
        );
        for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
            let key = bindings.select_key(difficulty).label();
            self.text(
                Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT * 0.4 + i as f32 * HUD_TEXT * 2.0),
                HUD_TEXT,
                Align::Center,
                format!("{key} - {}", difficulty.label()),
                shapes::TEXT,
            );
        }
    }

    fn field(&mut self, state: &GameState, bindings: &KeyBindings) {
        let round = &state.round;

        for column in Column::all().skip(1) {
            let x = column.left();
            self.frame.line(
                Vec2::new(x, 0.0),
                Vec2::new(x, FIELD_HEIGHT),
                2.0,
                shapes::SEPARATOR,
            );
        }

        self.frame.rect(
            Vec2::new(0.0, BAND_Y),
            Vec2::new(FIELD_WIDTH, BAND_HEIGHT),
            shapes::BAND,
        );

        for column in Column::all() {
            let remaining = round.flash_timers[column.index()];
            if remaining > 0.0 {
                self.frame.rect(
                    Vec2::new(column.left(), 0.0),
                    Vec2::new(COLUMN_WIDTH, FIELD_HEIGHT),
                    shapes::with_alpha(shapes::FLASH, remaining / FLASH_DURATION),
                );
            }
        }

        for tile in round.active_tiles() {
            let min = Vec2::new(tile.column().left(), tile.y);
            let size = Vec2::new(COLUMN_WIDTH, TILE_HEIGHT);
            self.frame.rect(min, size, shapes::TILE);
            self.frame.outline(min, size, 2.0, shapes::TILE_EDGE);
            self.text(
                Vec2::new(min.x + COLUMN_WIDTH / 2.0, tile.center()),
                GLYPH_TEXT,
                Align::Center,
                bindings.column_key(tile.column()).label(),
                shapes::TEXT,
            );
        }

        self.text(
            Vec2::splat(HUD_MARGIN),
            HUD_TEXT,
            Align::Left,
            format!("Score: {}", round.score),
            shapes::TEXT,
        );

        for i in 0..round.stars_earned {
            let x = FIELD_WIDTH - HUD_MARGIN - (i + 1) as f32 * (STAR_SIZE + STAR_GAP) + STAR_GAP;
            let min = Vec2::new(x, HUD_MARGIN);
            if self.options.star_icon {
                self.frame.sprite(Sprite::Star, min, Vec2::splat(STAR_SIZE));
            } else {
                self.frame.rect(min, Vec2::splat(STAR_SIZE), shapes::HIGHLIGHT);
            }
        }

        if round.reward_timer > 0.0 {
            self.text(
                Vec2::new(FIELD_WIDTH / 2.0, HUD_MARGIN + STAR_SIZE + HUD_TEXT),
                HUD_TEXT,
                Align::Center,
                "You earned a star!",
                shapes::HIGHLIGHT,
            );
        }
    }

    fn result_overlay(&mut self, title: &str, score: u32, bindings: &KeyBindings) {
        self.frame.rect(
            Vec2::ZERO,
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            shapes::DIM,
        );
        let restart = key_label(bindings, KeyPress::Restart);
        let center = FIELD_WIDTH / 2.0;
        self.text(
            Vec2::new(center, FIELD_HEIGHT * 0.35),
            TITLE_TEXT,
            Align::Center,
            title,
            shapes::HIGHLIGHT,
        );
        self.text(
            Vec2::new(center, FIELD_HEIGHT * 0.5),
            HUD_TEXT,
            Align::Center,
            format!("Final score: {score}"),
            shapes::TEXT,
        );
        self.text(
            Vec2::new(center, FIELD_HEIGHT * 0.6),
            HUD_TEXT,
            Align::Center,
            format!("Press {restart} to return to the menu"),
            shapes::TEXT,
        );
    }
}

fn key_label(bindings: &KeyBindings, action: KeyPress) -> String {
    bindings
        .key_for(action)
        .map(|k| k.label())
        .unwrap_or_else(|| "?".to_string())
}
