use crate::api::config::{ClearMode, FieldConfig};
use crate::api::palette::Palette;
use crate::core::field::NodeField;
use crate::core::node::Node;
use crate::renderer::draw::DrawList;

/// Opacity of the line between two nodes, or `None` if no line is drawn.
///
/// Symmetric in its arguments: the line fades with distance and with the
/// dimmer of the two endpoints.
pub fn connection_opacity(a: &Node, b: &Node, config: &FieldConfig) -> Option<f32> {
    let cd = config.connection_distance;
    let d = a.pos.distance(b.pos);
    if cd <= 0.0 || !(d < cd) {
        return None;
    }
    let dimmer = a.alpha().min(b.alpha());
    if dimmer <= config.visibility_epsilon {
        return None;
    }
    Some(((1.0 - d / cd) * config.line_opacity * dimmer).clamp(0.0, 1.0))
}

/// Build the frame's draw list from current state. Never mutates the field.
pub fn build_draw_list(
    field: &NodeField,
    palette: &Palette,
    config: &FieldConfig,
    list: &mut DrawList,
) {
    list.reset();

    match config.clear {
        ClearMode::Clear => list.clear_surface(),
        ClearMode::Fade { color } => list.fade(color),
    }

    for node in field.iter().filter(|n| n.is_visible(config.visibility_epsilon)) {
        list.circle(
            node.pos,
            node.radius() * config.glow_scale,
            palette.glow.scale_alpha(node.alpha() * config.glow_opacity),
        );
        list.circle(node.pos, node.radius(), palette.primary.scale_alpha(node.alpha()));
    }

    let nodes = field.nodes();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            if let Some(opacity) = connection_opacity(a, b, config) {
                list.line(a.pos, b.pos, config.line_width, palette.line.scale_alpha(opacity));
            }
        }
    }
}
