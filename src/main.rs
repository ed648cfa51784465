// Main
mod banner;
mod barriers;
mod dialogue;
mod menu;
mod player;
mod stages;
mod town;
mod triggers;

use bevy::prelude::*;

use banner::BannerPlugin;
use barriers::BarrierPlugin;
use dialogue::DialoguePlugin;
use menu::MenuPlugin;
use player::PlayerPlugin;
use stages::{Progress, Screen};
use town::TownPlugin;
use triggers::TriggerPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .init_state::<Screen>()
        .init_resource::<Progress>()
        .add_plugins((
            MenuPlugin,
            TownPlugin,
            PlayerPlugin,
            TriggerPlugin,
            DialoguePlugin,
            BarrierPlugin,
            BannerPlugin,
        ))
        .run();
}
