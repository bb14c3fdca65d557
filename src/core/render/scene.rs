//! Draw pass and scene inspection.

use crate::core::render::context::DrawContext;
use crate::core::widgets::slider::handle_center;
use crate::core::window::{Role, WindowId, WindowKind, WindowTree};
use crate::util::color::Color;
use crate::util::geometry::Rect;

/// Desktop background colour.
pub const DESKTOP_COLOR: Color = Color::LIGHT_BLUE;

/// A visible node with its absolute, clipped box, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedWindow {
    pub id: WindowId,
    pub identifier: String,
    pub frame: Rect,
}

/// Flattens the tree into a back-to-front list of drawn nodes.
///
/// Relies on the hidden flags of the last resize or draw pass.
pub fn flatten(tree: &WindowTree) -> Vec<FlattenedWindow> {
    let mut result = Vec::new();
    for &window in tree.top_level_windows() {
        flatten_recursive(tree, window, &mut result);
    }
    result
}

fn flatten_recursive(tree: &WindowTree, id: WindowId, result: &mut Vec<FlattenedWindow>) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if node.is_hidden || node.minimized {
        return;
    }
    if let Ok(origin) = tree.to_screen(id, 0.0, 0.0) {
        result.push(FlattenedWindow {
            id,
            identifier: node.identifier.clone(),
            frame: Rect::from_parts(origin, tree.effective_draw_size(id)),
        });
    }
    for &child in &node.children {
        flatten_recursive(tree, child, result);
    }
}

/// Draw the whole desktop: background, then every visible top-level window
/// back to front with its border.
pub fn paint(tree: &WindowTree, ctx: &mut dyn DrawContext) {
    let config = tree.config();
    ctx.set_origin(0.0, 0.0);
    ctx.set_fill_color(DESKTOP_COLOR);
    ctx.fill_rect(0.0, 0.0, config.screen_width, config.screen_height);

    for &window in tree.top_level_windows() {
        let Some(node) = tree.get(window) else {
            continue;
        };
        if node.minimized {
            continue;
        }
        draw_node(tree, window, ctx);
        ctx.set_origin(node.x, node.y);
        ctx.set_stroke_color(Color::GRAY);
        ctx.stroke_rect(0.0, 0.0, node.width, node.height);
    }
}

fn draw_node(tree: &WindowTree, id: WindowId, ctx: &mut dyn DrawContext) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if node.is_hidden {
        return;
    }
    let Ok(origin) = tree.to_screen(id, 0.0, 0.0) else {
        return;
    };
    let size = tree.effective_draw_size(id);
    ctx.set_origin(origin.x, origin.y);

    let background = match &node.kind {
        WindowKind::Button(_) => tree.button_background(id).ok().flatten(),
        _ => node.background,
    };
    if let Some(color) = background {
        ctx.set_fill_color(color);
        ctx.fill_rect(0.0, 0.0, size.width, size.height);
    }

    match &node.kind {
        WindowKind::Plain => {}
        WindowKind::Label(data) => {
            ctx.set_stroke_color(data.font_color);
            ctx.draw_string(&data.text, 3.0, 1.0);
        }
        WindowKind::Button(data) => {
            ctx.set_stroke_color(data.label.font_color);
            ctx.draw_string(&data.label.text, 3.0, 1.0);
            ctx.set_stroke_color(Color::LIGHT_GRAY);
            ctx.draw_line(0.0, 0.0, size.width, 0.0);
            ctx.draw_line(0.0, 0.0, 0.0, size.height);
            ctx.set_stroke_color(Color::BLACK);
            ctx.draw_line(size.width, 0.0, size.width, size.height);
            ctx.draw_line(0.0, size.height, size.width, size.height);
        }
        WindowKind::Slider(data) => {
            let middle = size.height / 2.0;
            ctx.set_stroke_color(Color::BLACK);
            ctx.draw_line(0.0, middle, size.width, middle);
            let center = handle_center(node.width, data.handle_width, data.value);
            ctx.set_fill_color(data.handle_color);
            ctx.fill_rect(center - data.handle_width / 2.0, 0.0, data.handle_width, size.height);
        }
        WindowKind::Container(_) => {
            ctx.set_stroke_color(Color::BLACK);
            ctx.stroke_rect(0.0, 0.0, size.width, size.height);
        }
    }

    match node.role {
        Role::MinimizeButton => {
            ctx.set_stroke_color(Color::WHITE);
            ctx.draw_line(0.0, size.height / 2.0, size.width, size.height / 2.0);
        }
        Role::MaximizeButton => {
            ctx.set_stroke_color(Color::WHITE);
            ctx.stroke_rect(0.0, 0.0, size.width, size.height);
        }
        Role::CloseButton => {
            ctx.set_stroke_color(Color::WHITE);
            ctx.draw_line(0.0, 0.0, size.width, size.height);
            ctx.draw_line(0.0, size.height, size.width, 0.0);
        }
        _ => {}
    }

    for &child in &node.children {
        draw_node(tree, child, ctx);
    }
}

/// Dump the window tree to a string for debugging.
pub fn dump(tree: &WindowTree) -> String {
    let mut out = String::new();
    dump_recursive(tree, tree.root(), 0, &mut out);
    out
}

fn dump_recursive(tree: &WindowTree, id: WindowId, depth: usize, out: &mut String) {
    if let Some(node) = tree.get(id) {
        let indent = "  ".repeat(depth);
        let mut flags = String::new();
        if node.is_hidden {
            flags.push_str(" hidden");
        }
        if node.minimized {
            flags.push_str(" minimized");
        }
        out.push_str(&format!(
            "{}{} [{}] pos=({},{}) size={}x{}{}\n",
            indent,
            node.identifier,
            node.kind.name(),
            node.x,
            node.y,
            node.width,
            node.height,
            flags
        ));

        for &child in &node.children {
            dump_recursive(tree, child, depth + 1, out);
        }
    }
}
