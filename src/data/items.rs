use crate::shared::*;

/// Display names for every item id the villagers care about.
pub fn populate_items(registry: &mut ItemRegistry) {
    let items = [
        (ItemId::DIRT_BLOCK, "Dirt Block"),
        (ItemId::STONE_BLOCK, "Stone Block"),
        (ItemId::TORCH, "Torch"),
        (ItemId::GEL, "Gel"),
        (ItemId::STARFURY, "Starfury"),
        (ItemId::FALLEN_STAR, "Fallen Star"),
        (ItemId::BOMB, "Bomb"),
        (ItemId::MUD_BLOCK, "Mud Block"),
        (ItemId::FEATHER, "Feather"),
        (ItemId::JUNGLE_SPORES, "Jungle Spores"),
        (ItemId::ICE_BLOCK, "Ice Block"),
        (ItemId::CLOUD, "Cloud"),
        (ItemId::RAIN_CLOUD, "Rain Cloud"),
        (ItemId::SUNPLATE_BLOCK, "Sunplate Block"),
        (ItemId::LIHZAHRD_BRICK, "Lihzahrd Brick"),
        (ItemId::LIHZAHRD_POWER_CELL, "Lihzahrd Power Cell"),
        (ItemId::GIANT_HARPY_FEATHER, "Giant Harpy Feather"),
    ];

    for (id, name) in items {
        registry.items.insert(
            id,
            ItemDef {
                id,
                name: name.to_string(),
            },
        );
    }
}
