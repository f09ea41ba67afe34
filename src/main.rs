mod shared;
mod weighted;
mod input;
mod player;
mod villagers;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Living World".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<VillageConfig>()
        .init_resource::<ItemRegistry>()
        .init_resource::<PlayerState>()
        .init_resource::<VillageState>()
        .init_resource::<ChatState>()
        .init_resource::<VillageRng>()
        // Events
        .add_event::<ReputationChangedEvent>()
        .add_event::<ChatOpenEvent>()
        .add_event::<ChatButtonClickedEvent>()
        .add_event::<ChatCloseEvent>()
        .add_event::<ShopOpenEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(villagers::VillagerPlugin)
        .add_plugins(villagers::VillagerRenderPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXEL_SCALE)),
    ));
}
