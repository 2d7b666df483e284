use bevy::prelude::*;

use constants::plane::{MAX_SEGMENTS, MIN_SEGMENTS, PANEL_MAX, PANEL_MIN};

use crate::engine::scene::plane::{PlaneConfig, PlaneGeometry, TerrainPlane};
use crate::tools::hover::ActiveFades;

const PANEL_BACKGROUND: Color = Color::srgb(0.10, 0.11, 0.13);
const ROW_BACKGROUND: Color = Color::srgb(0.12, 0.13, 0.15);
const BUTTON_NORMAL: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_HOVERED: Color = Color::srgb(0.30, 0.34, 0.40);
const BUTTON_PRESSED: Color = Color::srgb(0.16, 0.30, 0.22);

/// The four numeric fields exposed by the panel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PanelField {
    Width,
    Height,
    WidthSegments,
    HeightSegments,
}

impl PanelField {
    pub const ALL: [PanelField; 4] = [
        PanelField::Width,
        PanelField::Height,
        PanelField::WidthSegments,
        PanelField::HeightSegments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PanelField::Width => "width",
            PanelField::Height => "height",
            PanelField::WidthSegments => "widthSegments",
            PanelField::HeightSegments => "heightSegments",
        }
    }

    pub fn read(self, config: &PlaneConfig) -> f32 {
        match self {
            PanelField::Width => config.width,
            PanelField::Height => config.height,
            PanelField::WidthSegments => config.width_segments as f32,
            PanelField::HeightSegments => config.height_segments as f32,
        }
    }

    /// Step the bound field by `delta`, clamped to the calibration range.
    /// Returns whether the value actually changed.
    pub fn step(self, config: &mut PlaneConfig, delta: f32) -> bool {
        match self {
            PanelField::Width => {
                let next = (config.width + delta).clamp(PANEL_MIN, PANEL_MAX);
                let changed = next != config.width;
                config.width = next;
                changed
            }
            PanelField::Height => {
                let next = (config.height + delta).clamp(PANEL_MIN, PANEL_MAX);
                let changed = next != config.height;
                config.height = next;
                changed
            }
            PanelField::WidthSegments => {
                let next = step_segments(config.width_segments, delta);
                let changed = next != config.width_segments;
                config.width_segments = next;
                changed
            }
            PanelField::HeightSegments => {
                let next = step_segments(config.height_segments, delta);
                let changed = next != config.height_segments;
                config.height_segments = next;
                changed
            }
        }
    }
}

fn step_segments(current: u32, delta: f32) -> u32 {
    (current as i64 + delta as i64).clamp(MIN_SEGMENTS as i64, MAX_SEGMENTS as i64) as u32
}

#[derive(Component)]
pub struct FieldButton {
    pub field: PanelField,
    pub delta: f32,
}

#[derive(Component)]
pub struct FieldValueLabel {
    pub field: PanelField,
}

/// Fired for every discrete panel change; the rebuild system reacts in the
/// same frame.
#[derive(Event)]
pub struct PlaneConfigChanged;

/// Spawns the plane parameter panel: one row per field with decrement and
/// increment buttons around a live value readout.
pub fn spawn_parameter_panel(commands: &mut Commands, config: &PlaneConfig) {
    commands
        .spawn((
            Name::new("PlanePanel"),
            BackgroundColor(PANEL_BACKGROUND),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(6.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Plane"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));

            for field in PanelField::ALL {
                spawn_field_row(panel, field, field.read(config));
            }
        });
}

fn spawn_field_row(panel: &mut ChildSpawnerCommands, field: PanelField, value: f32) {
    panel
        .spawn((
            Name::new(field.label()),
            BackgroundColor(ROW_BACKGROUND),
            Node {
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceBetween,
                column_gap: Val::Px(8.0),
                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                ..default()
            },
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(field.label()),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                Node {
                    width: Val::Px(120.0),
                    ..default()
                },
            ));

            spawn_step_button(row, field, -1.0, "-");

            row.spawn((
                FieldValueLabel { field },
                Text::new(format!("{value:.0}")),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
                Node {
                    width: Val::Px(32.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
            ));

            spawn_step_button(row, field, 1.0, "+");
        });
}

fn spawn_step_button(row: &mut ChildSpawnerCommands, field: PanelField, delta: f32, glyph: &str) {
    row.spawn((
        FieldButton { field, delta },
        Button,
        BackgroundColor(BUTTON_NORMAL),
        BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
        Node {
            width: Val::Px(24.0),
            height: Val::Px(24.0),
            display: Display::Flex,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
    ))
    .with_children(|button| {
        button.spawn((
            Text::new(glyph),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 1.0, 1.0)),
        ));
    });
}

/// Button interaction: step the bound field and emit a change event when
/// the value moved.
pub fn panel_button_system(
    mut interactions: Query<
        (&Interaction, &FieldButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut config: ResMut<PlaneConfig>,
    mut changed: EventWriter<PlaneConfigChanged>,
) {
    for (interaction, button, mut background) in &mut interactions {
        match interaction {
            Interaction::Pressed => {
                *background = BackgroundColor(BUTTON_PRESSED);
                if button.field.step(&mut config, button.delta) {
                    changed.write(PlaneConfigChanged);
                }
            }
            Interaction::Hovered => *background = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *background = BackgroundColor(BUTTON_NORMAL),
        }
    }
}

/// Synchronous rebuild on any panel change: dispose the old geometry by
/// replacing the mesh asset under the same handle, re-randomise depth and
/// reset colours for the new vertex count. In-flight fades reference old
/// vertex indices and are dropped.
pub fn apply_config_changes(
    mut events: EventReader<PlaneConfigChanged>,
    config: Res<PlaneConfig>,
    plane: Option<ResMut<TerrainPlane>>,
    mut fades: ResMut<ActiveFades>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    let Some(mut plane) = plane else {
        return;
    };

    let config = config.clamped();
    plane.geometry = PlaneGeometry::rebuild(&config, &mut rand::rng());
    fades.clear();
    meshes.insert(&plane.mesh, plane.geometry.to_mesh(&config));
    println!(
        "→ Plane rebuilt: {} vertices, {} triangles",
        plane.geometry.vertex_count(),
        plane.geometry.triangle_count()
    );
}

/// Keep the value readouts in sync with the configuration.
pub fn update_panel_labels(
    config: Res<PlaneConfig>,
    mut labels: Query<(&FieldValueLabel, &mut Text)>,
) {
    if !config.is_changed() {
        return;
    }
    for (label, mut text) in &mut labels {
        let value = label.field.read(&config);
        let rendered = format!("{value:.0}");
        if text.0 != rendered {
            *text = Text::new(rendered);
        }
    }
}
