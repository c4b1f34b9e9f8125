// src/extract/item_type.rs

use super::first_field;
use crate::wikitext::Fields;

/// Infobox keys holding the item category.
const TYPE_KEYS: [&str; 5] = ["type", "itemType", "category", "weaponType", "armorType"];

/// Canonical categories and the spellings that map to them.
const CATEGORIES: &[(&str, &[&str])] = &[
    ("Amulet", &["amulet", "amulets", "necklace", "periapt", "medallion"]),
    ("Ammunition", &["ammunition", "arrow", "arrows", "bolt", "bolts", "bullet", "bullets"]),
    ("Axe", &["axe", "axes", "battle axe", "battleaxe", "throwing axe"]),
    ("Belt", &["belt", "belts", "girdle", "girdles"]),
    ("Boots", &["boots", "boot"]),
    (
        "Bludgeoning Weapon",
        &["war hammer", "warhammer", "hammer", "club", "mace", "flail", "morning star", "morningstar"],
    ),
    ("Bow", &["bow", "bows", "longbow", "long bow", "shortbow", "short bow", "composite longbow"]),
    ("Cloak", &["cloak", "cloaks", "cape", "mantle"]),
    ("Crossbow", &["crossbow", "crossbows", "light crossbow", "heavy crossbow"]),
    ("Curved Sword", &["scimitar", "scimitars", "wakizashi", "ninja-to", "katana", "curved swords"]),
    ("Dagger", &["dagger", "daggers"]),
    ("Dart", &["dart", "darts"]),
    ("Gem", &["gem", "gems", "jewel", "jewels", "gemstone"]),
    ("Glove", &["gloves", "gauntlets", "bracers", "bracer", "gauntlet"]),
    ("Halberd", &["halberd", "halberds", "polearm"]),
    (
        "Heavy Armor",
        &["plate mail", "plate armor", "full plate", "full plate mail", "splint mail", "banded mail"],
    ),
    ("Helmet", &["helmet", "helmets", "helm", "headband", "circlet", "hat"]),
    ("Large Sword", &["long sword", "longsword", "bastard sword", "large swords"]),
    ("Light Armor", &["leather armor", "studded leather armor", "hide armor", "armor"]),
    ("Medium Armor", &["chain mail", "chainmail", "scale mail", "splint armor"]),
    ("Potion", &["potion", "potions", "oil", "elixir"]),
    ("Ring", &["ring", "rings"]),
    ("Robe", &["robe", "robes"]),
    ("Scroll", &["scroll", "scrolls"]),
    ("Shield", &["shield", "shields", "buckler", "small shield", "medium shield", "large shield", "tower shield"]),
    ("Short Sword", &["short sword", "shortsword", "short swords"]),
    ("Sling", &["sling", "slings"]),
    ("Spear", &["spear", "spears"]),
    ("Staff", &["staff", "staves", "quarterstaff"]),
    ("Two-Handed Sword", &["two-handed sword", "two handed sword", "greatsword", "two-handed swords"]),
    ("Wand", &["wand", "wands", "rod", "rods"]),
];

/// Canonical item category from the infobox.
pub fn item_type(fields: &Fields) -> Option<&'static str> {
    first_field(fields, &TYPE_KEYS).and_then(normalize_type)
}

/// Map a free-text type to a canonical category.
///
/// Tries an exact match on names and aliases first, then the longest alias
/// that ends the value on a word boundary (`"Magical long sword"`).
pub fn normalize_type(raw: &str) -> Option<&'static str> {
    let value = raw
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .trim_end_matches('.')
        .to_lowercase();
    if value.is_empty() {
        return None;
    }

    let aliases = || {
        CATEGORIES.iter().flat_map(|(name, aliases)| {
            std::iter::once((*name, name.to_lowercase()))
                .chain(aliases.iter().map(move |alias| (*name, alias.to_string())))
        })
    };

    if let Some((name, _)) = aliases().find(|(_, alias)| *alias == value) {
        return Some(name);
    }

    aliases()
        .filter(|(_, alias)| {
            value
                .strip_suffix(alias.as_str())
                .is_some_and(|head| head.ends_with(' '))
        })
        .max_by_key(|(_, alias)| alias.len())
        .map(|(name, _)| name)
}
