//! B1 Borderlands - Starter module shipped with the seeding binary
//!
//! A frontier keep, the forest road that leads to it, and the goblin caves
//! in the hills beyond.

use crate::application::ports::inbound::ContentModule;
use crate::application::services::ModuleBuilder;
use crate::domain::entities::{
    Direction, Disposition, EncounterEntry, ItemType, LocationExit, LocationType, LootEntry,
    PoolEffect,
};
use crate::domain::value_objects::{Biome, ChallengeRating, ContentKind, EncounterContext, ModuleId};

pub struct BorderlandsModule;

impl ContentModule for BorderlandsModule {
    fn module_id(&self) -> ModuleId {
        ModuleId::from("b1")
    }

    fn define(&self, b: &mut ModuleBuilder) {
        let bite = b.ability("bite", |a| a.damage_dice = Some("1d4".to_string()));
        let claw = b.ability("claw", |a| a.damage_dice = Some("1d6".to_string()));
        let shortbow = b.ability("shortbow", |a| {
            a.description = "Ranged attack, 80 ft.".to_string();
            a.damage_dice = Some("1d6".to_string());
        });
        let cleave = b.ability("cleave", |a| {
            a.damage_dice = Some("2d8".to_string());
            a.cooldown_rounds = 2;
        });

        let copper = b.item("copper-coins", ItemType::Currency, |_| {});
        let silver = b.item("silver-coins", ItemType::Currency, |i| {
            i.value = 1;
        });
        let rat_tail = b.item("rat-tail", ItemType::Material, |_| {});
        let wolf_pelt = b.item("wolf-pelt", ItemType::Material, |i| {
            i.value = 2;
            i.weight = 3.0;
        });
        let shortsword = b.item("shortsword", ItemType::Weapon, |i| {
            i.value = 10;
            i.weight = 2.0;
        });
        let leather = b.item("leather-armor", ItemType::Armor, |i| {
            i.value = 10;
            i.weight = 10.0;
        });
        let potion = b.item("healing-potion", ItemType::Consumable, |i| {
            i.value = 50;
            i.weight = 0.5;
        });
        let key = b.item("lair-key", ItemType::Key, |i| {
            i.description = "A crude iron key strung on sinew.".to_string();
        });

        let rat_remains = b.loot_table("rat-remains", |t| {
            t.entries.push(LootEntry::new(rat_tail.id.clone(), 0.5, 1, 1));
        });
        let wolf_remains = b.loot_table("wolf-remains", |t| {
            t.entries.push(LootEntry::guaranteed(wolf_pelt.id.clone(), 1));
        });
        let goblin_purse = b.loot_table("goblin-purse", |t| {
            t.entries.push(LootEntry::new(copper.id.clone(), 0.8, 2, 12));
            t.entries.push(LootEntry::new(shortsword.id.clone(), 0.1, 1, 1));
        });
        let bandit_purse = b.loot_table("bandit-purse", |t| {
            t.entries.push(LootEntry::new(silver.id.clone(), 0.6, 1, 8));
            t.entries.push(LootEntry::new(leather.id.clone(), 0.2, 1, 1));
            t.entries.push(LootEntry::new(potion.id.clone(), 0.05, 1, 1));
        });
        let hoard = b.loot_table("lair-hoard", |t| {
            t.entries.push(LootEntry::new(copper.id.clone(), 1.0, 20, 60));
            t.entries.push(LootEntry::new(silver.id.clone(), 0.75, 5, 20));
            t.entries.push(LootEntry::new(potion.id.clone(), 0.5, 1, 2));
            t.entries.push(LootEntry::guaranteed(key.id.clone(), 1));
        });

        let rat = b.creature("giant-rat", |c| {
            c.challenge_rating = ChallengeRating::new(0.125);
            c.hit_points = 7;
            c.armor_class = 12;
            c.ability_ids.push(bite.id.clone());
            c.loot_table_id = Some(rat_remains.id.clone());
        });
        let wolf = b.creature("wolf", |c| {
            c.challenge_rating = ChallengeRating::new(0.25);
            c.hit_points = 11;
            c.armor_class = 13;
            c.ability_ids.push(bite.id.clone());
            c.loot_table_id = Some(wolf_remains.id.clone());
        });
        let goblin = b.creature("goblin", |c| {
            c.challenge_rating = ChallengeRating::new(0.25);
            c.hit_points = 7;
            c.armor_class = 15;
            c.ability_ids.push(shortbow.id.clone());
            c.loot_table_id = Some(goblin_purse.id.clone());
        });
        let bandit = b.creature("bandit", |c| {
            c.challenge_rating = ChallengeRating::new(0.125);
            c.hit_points = 11;
            c.armor_class = 12;
            c.ability_ids.push(shortbow.id.clone());
            c.loot_table_id = Some(bandit_purse.id.clone());
        });
        let orc = b.creature("orc", |c| {
            c.challenge_rating = ChallengeRating::new(0.5);
            c.hit_points = 15;
            c.armor_class = 13;
            c.ability_ids.push(claw.id.clone());
            c.loot_table_id = Some(goblin_purse.id.clone());
        });
        let ogre = b.creature("ogre", |c| {
            c.challenge_rating = 2u32.into();
            c.hit_points = 59;
            c.armor_class = 11;
            c.ability_ids.push(cleave.id.clone());
        });
        let castellan = b.creature("castellan", |c| {
            c.challenge_rating = 2u32.into();
            c.hit_points = 52;
            c.armor_class = 17;
            c.hostile = false;
        });

        let hall_id = b.id(ContentKind::Location, "keep-hall");
        let road_id = b.id(ContentKind::Location, "forest-road");
        let caves_id = b.id(ContentKind::Location, "caves-mouth");
        let lair_id = b.id(ContentKind::Location, "goblin-lair");

        b.location("keep-hall", LocationType::Interior, |l| {
            l.description = "Smoke-stained rafters over long trestle tables.".to_string();
            l.creature_ids.push(castellan.id.clone());
            l.exits.push(LocationExit::new(Direction::South, road_id.clone()));
        });
        b.location("forest-road", LocationType::Exterior, |l| {
            l.biome = Some(Biome::Forest);
            l.encounter_chance = 0.2;
            l.exits.push(LocationExit::new(Direction::North, hall_id.clone()));
            l.exits.push(LocationExit::new(Direction::East, caves_id.clone()));
        });
        b.location("caves-mouth", LocationType::Exterior, |l| {
            l.biome = Some(Biome::Hills);
            l.encounter_chance = 0.35;
            l.creature_ids.push(goblin.id.clone());
            l.exits.push(LocationExit::new(Direction::West, road_id.clone()));
            l.exits.push(LocationExit::new(Direction::Down, lair_id.clone()).hidden());
        });
        b.location("goblin-lair", LocationType::Interior, |l| {
            l.encounter_chance = 0.5;
            l.creature_ids.push(goblin.id.clone());
            l.creature_ids.push(rat.id.clone());
            l.exits.push(LocationExit::new(Direction::Up, caves_id.clone()));
        });
        // Swamp has no table of its own and rolls on GENERIC
        b.location("fen-edge", LocationType::Exterior, |l| {
            l.biome = Some(Biome::Swamp);
            l.encounter_chance = 0.25;
            l.exits.push(LocationExit::new(Direction::North, road_id.clone()));
        });

        b.chest("lair-strongbox", &lair_id, |c| {
            c.loot_table_id = Some(hoard.id.clone());
            c.locked = true;
            c.lock_difficulty = Some(12);
        });
        b.pool("shrine-spring", &road_id, |p| {
            p.description = "Clear water bubbling beneath a mossy shrine.".to_string();
            p.effect = PoolEffect::Heal {
                dice: "1d8".to_string(),
            };
        });
        b.trap("tripwire", &caves_id, |t| {
            t.detect_difficulty = 12;
            t.disarm_difficulty = 10;
            t.damage_dice = Some("1d6".to_string());
        });

        let garrison = b.faction("keep-garrison", |f| {
            f.home_location_id = Some(hall_id.clone());
        });
        let clan = b.faction("goblin-clan", |f| {
            f.home_location_id = Some(lair_id.clone());
            f.member_ids.push(goblin.id.clone());
            f.member_ids.push(orc.id.clone());
        });
        b.faction_relation(&garrison, &clan, Disposition::Hostile);
        b.faction_relation(&clan, &garrison, Disposition::Hostile);

        b.encounter_table(
            Biome::Forest,
            vec![
                EncounterEntry::new(wolf.id.clone(), 2, 4)
                    .with_weight(5)
                    .with_challenge_range(0u32, 2u32),
                EncounterEntry::new(bandit.id.clone(), 2, 6)
                    .with_weight(3)
                    .with_challenge_range(0u32, 3u32),
                EncounterEntry::new(ogre.id.clone(), 1, 1).with_challenge_range(2u32, 6u32),
            ],
        );
        b.encounter_table(
            Biome::Hills,
            vec![
                EncounterEntry::new(goblin.id.clone(), 3, 8)
                    .with_weight(4)
                    .with_challenge_range(0u32, 2u32),
                EncounterEntry::new(orc.id.clone(), 1, 4)
                    .with_weight(2)
                    .with_challenge_range(1u32, 4u32),
                EncounterEntry::new(ogre.id.clone(), 1, 1).with_challenge_range(2u32, 6u32),
            ],
        );
        b.encounter_table(
            EncounterContext::indoor(),
            vec![
                EncounterEntry::new(rat.id.clone(), 2, 5).with_weight(3),
                EncounterEntry::new(goblin.id.clone(), 1, 3),
            ],
        );
        b.encounter_table(
            EncounterContext::generic(),
            vec![
                EncounterEntry::new(rat.id.clone(), 1, 4).with_weight(2),
                EncounterEntry::new(wolf.id.clone(), 1, 3),
                EncounterEntry::new(goblin.id.clone(), 1, 4),
            ],
        );
    }
}
