//! Chest contents rendered as an inventory grid with tooltips.

use std::sync::LazyLock;

use formats::{ChestRecord, ItemRecord, Localizations, split_namespaced};
use regex::Regex;

use crate::text::{render, render_or_empty, to_roman};

/// Enchantments that only ever have one level; no numeral is shown.
const HIDDEN_LEVELS: [&str; 9] = [
    "aqua_affinity",
    "binding_curse",
    "channeling",
    "flame",
    "infinity",
    "mending",
    "multishot",
    "silk_touch",
    "vanishing_curse",
];

/// Items whose name is drawn in a rarity colour.
fn name_colour(item_id: &str) -> Option<&'static str> {
    let colour = match item_id {
        "beacon" | "conduit" | "end_crystal" | "golden_apple" => "enchanted",
        "creeper_head" | "dragon_breath" | "dragon_head" | "enchanted_book"
        | "experience_bottle" | "heart_of_the_sea" | "nether_star" | "piglin_head"
        | "player_head" | "skeleton_skull" | "totem_of_undying" | "wither_skeleton_skull"
        | "zombie_head" => "yellow",
        "dragon_egg" | "enchanted_golden_apple" => "purple",
        id if id.starts_with("music_disc_") => "enchanted",
        _ => return None,
    };
    Some(colour)
}

fn trim_colour(material: &str) -> Option<&'static str> {
    Some(match material {
        "minecraft:amethyst" => "#d393ff",
        "minecraft:copper" => "#ff9474",
        "minecraft:diamond" => "#71deff",
        "minecraft:emerald" => "#43ff83",
        "minecraft:gold" => "#ffe300",
        "minecraft:iron" => "#d2d2d2",
        "minecraft:lapis" => "#3c6bc6",
        "minecraft:netherite" => "#666666",
        "minecraft:quartz" => "#ffffff",
        "minecraft:redstone" => "#ff0000",
        _ => return None,
    })
}

const LEATHER_BROWN: &str = "rgb(106, 64, 41)";
const ARMOR_PIECES: [&str; 4] = ["boots", "chestplate", "helmet", "leggings"];

// {text:Name}, {text:Name,color:gold}, {translate:key}, {translate:key,color:gold}
static CUSTOM_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{(text:(?<text>[^,)]*))?,?(translate:(?<translate>[^,)]*))?,?(color:(?<color>[^)]*))?\}",
    )
    .expect("constant pattern")
});

pub fn html_colour(packed: u32) -> String {
    format!("#{packed:06x}")
}

fn colour_layer(colour: Option<&str>, image: &str) -> String {
    let colour = match colour {
        Some(c) => c,
        None if image.contains("leather_") => LEATHER_BROWN,
        None => return String::new(),
    };
    format!(
        r#"<div class="color_layer" style="background-color: {colour}; mask-image: url('Images/Items/{image}.png');"></div>"#
    )
}

fn glint(image: &str) -> String {
    format!(
        r#"<div class="enchanted_glint" style="-webkit-mask-image: url('Images/Items/{image}.png'); mask-image: url('Images/Items/{image}.png');"></div>"#
    )
}

fn is_glinting(item: &ItemRecord, item_id: &str) -> bool {
    item.enchantments.is_some() || item_id == "enchanted_golden_apple"
}

fn leather_overlay(item: &ItemRecord, item_id: &str) -> String {
    let is_leather_armor = item_id
        .strip_prefix("leather_")
        .is_some_and(|piece| ARMOR_PIECES.contains(&piece));
    if !is_leather_armor {
        return String::new();
    }
    let overlay = format!("{item_id}_overlay");
    let mut html = format!(r#"<img src="Images/Items/{overlay}.png" />"#);
    if is_glinting(item, item_id) {
        html.push_str(&glint(&overlay));
    }
    html
}

fn trim_overlay(item: &ItemRecord, item_id: &str) -> String {
    let Some(trim) = &item.trim else {
        return String::new();
    };
    let piece = item_id.split('_').nth(1).unwrap_or_default();
    if !ARMOR_PIECES.contains(&piece) {
        return String::new();
    }
    let image = format!("{piece}_trim");
    format!(
        r#"<img src="Images/Items/{image}.png" />{}"#,
        colour_layer(trim_colour(&trim.material), &image)
    )
}

fn custom_name(raw: &str, extra_class: &str, l: &Localizations) -> Option<String> {
    let Some(caps) = CUSTOM_NAME.captures(raw) else {
        return render(l.localize(raw), &format!("name italic{extra_class}"));
    };
    let text = caps.name("text").map(|m| m.as_str());
    let translate = caps.name("translate").map(|m| m.as_str());
    let colour = caps.name("color").map_or("", |m| m.as_str());

    let name = match (translate, text) {
        (Some(key), fallback) => l.localize_or(key, fallback.unwrap_or(key)),
        (None, Some(text)) => text,
        (None, None) => return None,
    };
    render(name, &format!("name italic {colour}{extra_class}"))
}

fn trim_description(item: &ItemRecord, l: &Localizations) -> String {
    let Some(trim) = &item.trim else {
        return String::new();
    };
    let (pattern_ns, pattern_id) = split_namespaced(&trim.pattern);
    let (material_ns, material_id) = split_namespaced(&trim.material);

    let label = l.localize_or("item.minecraft.smithing_template.upgrade", "Upgrade: ");
    let pattern = l.localize_or(&format!("trim_pattern.{pattern_ns}.{pattern_id}"), pattern_id);
    let material = l.localize_or(&format!("trim_material.{material_ns}.{material_id}"), material_id);

    let mut html = render_or_empty(label, "");
    html.push_str(&render_or_empty(&format!(" {pattern}"), material_id));
    html.push_str(&render_or_empty(&format!(" {material}"), material_id));
    html
}

fn enchantments_description(item: &ItemRecord, l: &Localizations) -> String {
    let Some(enchantments) = &item.enchantments else {
        return String::new();
    };
    enchantments
        .iter()
        .map(|e| {
            let class = if e.id.contains("curse") { "curse" } else { "" };
            let (ns, id) = split_namespaced(&e.id);
            let name = l.localize_or(&format!("enchantment.{ns}.{id}"), id);
            let text = if HIDDEN_LEVELS.contains(&id) {
                name.to_string()
            } else {
                format!("{name} {}", to_roman(e.level))
            };
            render_or_empty(&text, class)
        })
        .collect()
}

fn item_description(item: &ItemRecord, item_ns: &str, item_id: &str, l: &Localizations) -> String {
    let mut extra_class = String::new();
    if item.enchantments.is_some() {
        extra_class = " enchanted".to_string();
    }
    if let Some(colour) = name_colour(item_id) {
        extra_class = format!(" {colour}");
    }

    let name = match &item.custom_name {
        Some(raw) => custom_name(raw, &extra_class, l),
        None => {
            let block = l.localize_or(&format!("block.{item_ns}.{item_id}"), item_id);
            let name = l.localize_or(&format!("item.{item_ns}.{item_id}"), block);
            render(name, &format!("name{extra_class}"))
        }
    };

    let mut html = name.unwrap_or_default();
    if let Some(desc) = l.get(&format!("item.{item_ns}.{item_id}.desc")) {
        html.push_str(&render_or_empty(desc, ""));
    }
    html.push_str(&trim_description(item, l));
    html.push_str(&enchantments_description(item, l));
    if item.color.is_some_and(|c| c != 0) {
        html.push_str(&render_or_empty(l.localize("item.dyed"), "italic"));
    }
    html
}

/// Sprite name: animated items use their first frame.
fn item_image(item_id: &str) -> String {
    match item_id {
        "compass" | "clock" | "recovery_compass" => format!("{item_id}_00"),
        "enchanted_golden_apple" => "golden_apple".to_string(),
        id => id.to_string(),
    }
}

fn item_cell(item: &ItemRecord, l: &Localizations) -> String {
    let (item_ns, item_id) = item.namespaced();
    let image = item_image(item_id);
    let (row, col) = (item.slot / 9, item.slot % 9);
    let (top, left) = (18 + 18 * row, 8 + 18 * col);

    let mut html = format!(r#"<div class="item" style="top: {top}px; left: {left}px;">"#);
    html.push_str(&format!(r#"<img src="Images/Items/{image}.png" />"#));
    let dye = item.color.filter(|&c| c != 0).map(html_colour);
    html.push_str(&colour_layer(dye.as_deref(), item_id));
    html.push_str(&leather_overlay(item, item_id));
    html.push_str(&trim_overlay(item, item_id));
    if is_glinting(item, item_id) {
        html.push_str(&glint(&image));
    }
    if item.count > 1 {
        html.push_str(&render_or_empty(&item.count.to_string(), "item_count"));
    }
    html.push_str(&format!(
        "<div class=item_description>{}</div></div>",
        item_description(item, item_ns, item_id, l)
    ));
    html
}

pub fn popup(chest: &ChestRecord, l: &Localizations) -> String {
    let mut html = if chest.large {
        r#"<div class="chest_container large"><div class="chest_scaler"><img class="chest large_chest" src="Images/LargeChest.png"/>"#
    } else {
        r#"<div class="chest_container"><div class="chest_scaler"><img class="chest" src="Images/SmallChest.png"/>"#
    }
    .to_string();

    html.push_str(&render_or_empty(&chest.name, "chest_name"));
    for item in &chest.items {
        html.push_str(&item_cell(item, l));
    }
    html.push_str("</div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::{custom_name, html_colour, item_cell, item_description, popup, trim_overlay};
    use crate::text::render;
    use formats::{ArmorTrim, ChestRecord, Enchantment, ItemRecord, Localizations};
    use foundation::Vec3;

    fn item(id: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            custom_name: None,
            color: None,
            count: 1,
            slot: 0,
            trim: None,
            enchantments: None,
        }
    }

    fn table() -> Localizations {
        Localizations::from_json_str(
            r#"{
                "item.minecraft.diamond_sword": "Diamond Sword",
                "block.minecraft.cobblestone": "Cobblestone",
                "enchantment.minecraft.sharpness": "Sharpness",
                "enchantment.minecraft.mending": "Mending",
                "item.custom.rex": "Rex the Dog",
                "item.dyed": "Dyed"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn packs_colours_as_hex() {
        assert_eq!(html_colour(0xff0000), "#ff0000");
        assert_eq!(html_colour(0x00a0), "#0000a0");
    }

    #[test]
    fn names_fall_back_from_item_to_block_to_id() {
        let l = table();
        let sword = item_description(&item("minecraft:diamond_sword"), "minecraft", "diamond_sword", &l);
        assert!(sword.starts_with(&render("Diamond Sword", "name").unwrap()));

        let cobble = item_description(&item("minecraft:cobblestone"), "minecraft", "cobblestone", &l);
        assert!(cobble.starts_with(&render("Cobblestone", "name").unwrap()));

        let dirt = item_description(&item("minecraft:dirt"), "minecraft", "dirt", &Localizations::disabled());
        assert_eq!(dirt, render("dirt", "name").unwrap());
    }

    #[test]
    fn enchantment_levels_are_roman_unless_hidden() {
        let l = table();
        let mut sword = item("minecraft:diamond_sword");
        sword.enchantments = Some(vec![
            Enchantment { id: "minecraft:sharpness".into(), level: 5 },
            Enchantment { id: "minecraft:mending".into(), level: 1 },
        ]);
        let html = item_description(&sword, "minecraft", "diamond_sword", &l);
        assert!(html.contains(&render("Diamond Sword", "name enchanted").unwrap()));
        assert!(html.contains(&render("Sharpness V", "").unwrap()));
        assert!(html.contains(&render("Mending", "").unwrap()));
        assert!(!html.contains(&render("Mending I", "").unwrap()));
    }

    #[test]
    fn custom_names_parse_text_translate_and_colour() {
        let l = table();
        assert_eq!(
            custom_name("{text:Rex,color:gold}", "", &l),
            render("Rex", "name italic gold")
        );
        assert_eq!(
            custom_name("{translate:item.custom.rex}", "", &l),
            render("Rex the Dog", "name italic ")
        );
        assert_eq!(
            custom_name("{translate:missing.key}", "", &l),
            render("missing.key", "name italic ")
        );
        assert_eq!(custom_name("Plain", " yellow", &l), render("Plain", "name italic yellow"));
    }

    #[test]
    fn slots_lay_out_on_a_nine_wide_grid() {
        let mut stone = item("minecraft:stone");
        stone.slot = 30;
        stone.count = 64;
        let html = item_cell(&stone, &Localizations::disabled());
        assert!(html.starts_with(r#"<div class="item" style="top: 72px; left: 62px;">"#));
        assert!(html.contains(&render("64", "item_count").unwrap()));
    }

    #[test]
    fn leather_gets_default_dye_and_overlay() {
        let helmet = item("minecraft:leather_helmet");
        let html = item_cell(&helmet, &Localizations::disabled());
        assert!(html.contains("background-color: rgb(106, 64, 41)"));
        assert!(html.contains("Images/Items/leather_helmet_overlay.png"));
        assert!(!html.contains("enchanted_glint"));
    }

    #[test]
    fn trims_colour_armor_pieces_only() {
        let mut boots = item("minecraft:iron_boots");
        boots.trim = Some(ArmorTrim {
            pattern: "minecraft:coast".into(),
            material: "minecraft:gold".into(),
        });
        let html = trim_overlay(&boots, "iron_boots");
        assert!(html.contains("Images/Items/boots_trim.png"));
        assert!(html.contains("background-color: #ffe300"));

        let mut sword = item("minecraft:iron_sword");
        sword.trim = boots.trim.clone();
        assert_eq!(trim_overlay(&sword, "iron_sword"), "");
    }

    #[test]
    fn chest_frame_matches_size() {
        let chest = ChestRecord {
            world_pos: Vec3::default(),
            name: String::new(),
            large: true,
            items: vec![item("minecraft:clock")],
        };
        let html = popup(&chest, &Localizations::disabled());
        assert!(html.starts_with(r#"<div class="chest_container large">"#));
        assert!(html.contains("Images/Items/clock_00.png"));
        assert!(!html.contains("chest_name"));
        assert!(html.ends_with("</div></div>"));
    }
}
