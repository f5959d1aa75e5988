//! Score, level and banner text drawn as absolutely positioned UI nodes.

use bevy::prelude::*;

use crate::game::TextSlot;

const HUD_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);

const SLOTS: [TextSlot; 3] = [TextSlot::Score, TextSlot::Level, TextSlot::Banner];

/// Text the lifecycle wants on screen; `None` hides the line
#[derive(Resource, Debug, Default)]
pub struct HudText {
    pub score: Option<String>,
    pub level: Option<String>,
    pub banner: Option<String>,
}

impl HudText {
    pub fn set(&mut self, slot: TextSlot, text: Option<String>) {
        *self.line_mut(slot) = text;
    }

    pub fn get(&self, slot: TextSlot) -> Option<&str> {
        match slot {
            TextSlot::Score => self.score.as_deref(),
            TextSlot::Level => self.level.as_deref(),
            TextSlot::Banner => self.banner.as_deref(),
        }
    }

    fn line_mut(&mut self, slot: TextSlot) -> &mut Option<String> {
        match slot {
            TextSlot::Score => &mut self.score,
            TextSlot::Level => &mut self.level,
            TextSlot::Banner => &mut self.banner,
        }
    }
}

#[derive(Component)]
pub struct HudLine(pub TextSlot);

pub fn spawn_hud(mut commands: Commands) {
    for slot in SLOTS {
        let (left, top) = slot.position();
        commands.spawn((
            Text::new(""),
            TextFont {
                font_size: slot.font_size(),
                ..default()
            },
            TextColor(HUD_COLOR),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(left),
                top: Val::Px(top),
                ..default()
            },
            Visibility::Hidden,
            HudLine(slot),
            Name::new(format!("HUD {:?}", slot)),
        ));
    }
}

pub fn sync_hud(hud: Res<HudText>, mut lines: Query<(&HudLine, &mut Text, &mut Visibility)>) {
    if !hud.is_changed() {
        return;
    }

    for (line, mut text, mut visibility) in &mut lines {
        match hud.get(line.0) {
            Some(content) => {
                if text.0 != content {
                    text.0 = content.to_string();
                }
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
