//! Popup bodies for the simple marker kinds, plus the map info panel.

use formats::{
    BedRecord, BlockStat, EntityLists, PlayerRecord, PortalRecord, RenderStats, RespawnAnchorRecord,
    SignRecord, ViewRecord, WorldStats,
};
use foundation::WorldCoord;

use crate::html::{escape, number};

/// Long-standing donors, shown with a badge on their player popup.
pub const SUPPORTERS: [&str; 3] = ["griffen8280", "Vyruz", "iamsofa"];

const STAT_ICONS: usize = 10;

pub fn spawn(pos: WorldCoord) -> String {
    format!(r#"<p class="center">{pos}</p>"#)
}

pub fn sign(sign: &SignRecord) -> String {
    let [t1, t2, t3, t4] = sign.lines().map(escape);
    format!("<pre><center>{t1}<br/>{t2}<br/>{t3}<br/>{t4}</center></pre>")
}

pub fn view(view: &ViewRecord) -> String {
    let file = escape(&view.image_file);
    format!(
        r#"<div><a href="{file}"><img width="512" height="288" src="{file}"/></a></div><center>{}</center>"#,
        escape(&view.text)
    )
}

pub fn bed(bed: &BedRecord) -> String {
    format!("<center>{}'s bed</center>", escape(&bed.player_name))
}

pub fn respawn_anchor(anchor: &RespawnAnchorRecord) -> String {
    format!("<center>{}'s respawn anchor</center>", escape(&anchor.player_name))
}

pub fn portal(portal: &PortalRecord) -> String {
    let p = portal.world_pos;
    format!(
        r#"<div style="text-align:center">Portal</div><br/> position ({}, {}, {})"#,
        number(p.x),
        number(p.y),
        number(p.z)
    )
}

fn stat_icon(image: &str) -> String {
    format!(r#"<img style="margin:1px" src="Images/{image}.png" width="18" height="18" />"#)
}

/// Ten half-steppable icons for a 0..=20 stat such as health or food.
fn half_step_row(value: f64, stem: &str) -> String {
    (0..STAT_ICONS)
        .map(|i| {
            let i = i as f64;
            let fill = if i * 2.0 + 1.0 < value {
                "Full"
            } else if i * 2.0 < value {
                "Half"
            } else {
                "Empty"
            };
            stat_icon(&format!("{fill}{stem}"))
        })
        .collect()
}

/// Ten bubbles for 0..=300 ticks of air.
fn air_row(air: f64) -> String {
    (0..STAT_ICONS)
        .map(|i| {
            if (i as f64) * 30.0 < air {
                stat_icon("FullAir")
            } else {
                stat_icon("EmptyAir")
            }
        })
        .collect()
}

pub fn is_supporter(name: &str) -> bool {
    SUPPORTERS.contains(&name)
}

fn donation(name: &str) -> String {
    let badge = if is_supporter(name) {
        concat!(
            r#"<center><table><tr>"#,
            r#"<td><img src="Images/IronIcon.png"/></td>"#,
            r#"<td><a href="http://www.justgiving.com/tectonicus">Iron Supporter</a></td>"#,
            r#"</tr></table></center>"#
        )
    } else {
        r#"<img src="Images/Spacer.png" style="height:38px;" />"#
    };
    format!("<div>{badge}</div>")
}

pub fn player(player: &PlayerRecord, icon_url: &str) -> String {
    let name = escape(&player.name);
    let icon = escape(icon_url);
    let mut html = String::new();
    html.push_str(r#"<div style="text-align:center">"#);
    html.push_str(&format!(
        r#"<div class="playerName" style="text-align:center; font-size:110%" >{name}</div>"#
    ));
    html.push_str(r#"<div style="width:300px; margin:4px;" >"#);
    html.push_str(&format!(
        r#"<img style="float:left; margin:4px;" src="{icon}" width="64" height="64" />"#
    ));
    html.push_str("<div>");
    html.push_str(&format!("<div>{}</div>", half_step_row(player.health, "Heart")));
    html.push_str(&format!("<div>{}</div>", half_step_row(player.food, "Food")));
    html.push_str(&format!("<div>{}</div>", air_row(player.air)));
    html.push_str("</div></div>");
    html.push_str(&format!(
        r#"<div id="xpDiv" style="clear:both; text-align:center" >Experience level {}</div>"#,
        player.xp_level
    ));
    html.push_str(&format!(
        r#"<div id="donationDiv" style="clear:both; text-align:center" >{}</div>"#,
        donation(&player.name)
    ));
    html.push_str("</div>");
    html
}

/// The "Map Info" panel attached to the attribution link.
///
/// The block count section is left out when the renderer wrote no block stats.
pub fn map_info(
    stats: &RenderStats,
    world: &WorldStats,
    blocks: &[BlockStat],
    entities: &EntityLists,
) -> String {
    let mut html = String::new();
    html.push_str(r#"<h4 class="center">Map Info</h4>"#);
    html.push_str(r#"<div class="center">Render Stats</div>"#);
    html.push_str(&format!("Tectonicus version: {}<br/>", escape(&stats.tectonicus_version)));
    html.push_str(&format!("Render time: {}<br/>", escape(&stats.render_time)));
    html.push_str(&format!("Peak memory usage: {}Mb<br/>", stats.peak_memory_mb()));
    html.push_str(&format!("Created on {}<br/>", escape(&stats.rendered_on_date)));
    html.push_str(&format!("Created at {}<br/>", escape(&stats.rendered_on_time)));
    html.push_str("<br/>");

    html.push_str(r#"<div class="center">World stats</div>"#);
    html.push_str(&format!("Players: {}<br/>", world.num_players));
    html.push_str(&format!("Chunks: {}<br/>", world.num_chunks));
    html.push_str(&format!("Portals: {}<br/>", world.num_portals));
    html.push_str(&format!("Views: {}<br/>", entities.views.len()));
    html.push_str(&format!("Signs: {}<br/>", entities.signs.len()));
    html.push_str(&format!("Player Beds: {}<br/>", entities.beds.len()));

    if !blocks.is_empty() {
        html.push_str(r#"<div class="center">Blocks</div>"#);
        for stat in blocks {
            html.push_str(&format!("{} {}<br/>", escape(&stat.name), escape(&stat.count)));
        }
    }
    html
}
