use crate::prelude::*;

/// Width and height of the UI coordinate space, origin at the bottom left.
pub const SCREEN_SIZE: vec2<f32> = vec2(640.0, 480.0);

pub struct Palette {
    pub white: Color,
    pub black: Color,
    pub blue: Color,
    pub light_blue: Color,
    pub green: Color,
    pub health_back: Color,
    pub health_fill: Color,
    pub player: Color,
    pub enemy: Color,
    pub boss: Color,
    pub your_turn: Color,
    pub enemy_turn: Color,
    pub attack: Color,
    pub heal: Color,
    pub plead: Color,
}

impl Palette {
    pub fn new() -> Self {
        let rgb = |r: u8, g: u8, b: u8| -> Color { Rgba::<u8>::opaque(r, g, b).convert() };
        Self {
            white: rgb(255, 255, 255),
            black: rgb(0, 0, 0),
            blue: rgb(70, 130, 180),
            light_blue: rgb(100, 160, 210),
            green: rgb(50, 180, 100),
            health_back: rgb(100, 0, 0),
            health_fill: rgb(0, 200, 0),
            player: rgb(0, 100, 255),
            enemy: rgb(100, 100, 40),
            boss: rgb(200, 40, 40),
            your_turn: rgb(0, 255, 0),
            enemy_turn: rgb(255, 0, 0),
            attack: rgb(200, 50, 50),
            heal: rgb(50, 200, 100),
            plead: rgb(200, 50, 200),
        }
    }
}

/// Brighten a colour by a fixed amount per channel, used for hovered buttons.
pub fn highlight(color: Color) -> Color {
    let lift = 50.0 / 255.0;
    Rgba::new(
        (color.r + lift).min(1.0),
        (color.g + lift).min(1.0),
        (color.b + lift).min(1.0),
        color.a,
    )
}

/// Axis-aligned rectangle from its bottom left corner and size.
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Aabb2<f32> {
    Aabb2 {
        min: vec2(x, y),
        max: vec2(x + width, y + height),
    }
}

/// Everything a screen needs to draw itself.
pub struct Painter {
    pub geng: Geng,
    pub camera: Camera2d,
    pub palette: Palette,
}

impl Painter {
    pub fn new(geng: &Geng) -> Self {
        Self {
            geng: geng.clone(),
            camera: Camera2d {
                center: SCREEN_SIZE / 2.0,
                rotation: Angle::ZERO,
                fov: SCREEN_SIZE.y,
            },
            palette: Palette::new(),
        }
    }

    pub fn clear(&self, color: Color, framebuffer: &mut ugli::Framebuffer) {
        ugli::clear(framebuffer, Some(color), None, None);
    }

    pub fn quad(&self, target: Aabb2<f32>, color: Color, framebuffer: &mut ugli::Framebuffer) {
        self.geng.draw2d().draw2d(
            framebuffer,
            &self.camera,
            &draw2d::Quad::new(target, color),
        );
    }

    pub fn outline(
        &self,
        target: Aabb2<f32>,
        width: f32,
        color: Color,
        framebuffer: &mut ugli::Framebuffer,
    ) {
        let size = target.size();
        let (min, max) = (target.min, target.max);
        self.quad(rect(min.x, min.y, size.x, width), color, framebuffer);
        self.quad(rect(min.x, max.y - width, size.x, width), color, framebuffer);
        self.quad(rect(min.x, min.y, width, size.y), color, framebuffer);
        self.quad(rect(max.x - width, min.y, width, size.y), color, framebuffer);
    }

    /// Draw a line of text, `align` is relative to `pos` (0.5 is centered).
    pub fn text(
        &self,
        text: &str,
        pos: vec2<f32>,
        size: f32,
        align: vec2<f32>,
        color: Color,
        framebuffer: &mut ugli::Framebuffer,
    ) {
        self.geng.default_font().draw(
            framebuffer,
            &self.camera,
            text,
            align.map(geng::TextAlign),
            mat3::translate(pos) * mat3::scale_uniform(size),
            color,
        );
    }

    pub fn text_centered(
        &self,
        text: &str,
        pos: vec2<f32>,
        size: f32,
        color: Color,
        framebuffer: &mut ugli::Framebuffer,
    ) {
        self.text(text, pos, size, vec2(0.5, 0.5), color, framebuffer);
    }

    pub fn button(
        &self,
        button: &MenuButton,
        hovered: bool,
        framebuffer: &mut ugli::Framebuffer,
    ) {
        let color = if hovered {
            highlight(button.color)
        } else {
            button.color
        };
        self.quad(button.target, color, framebuffer);
        self.outline(button.target, 2.0, self.palette.white, framebuffer);
        self.text_centered(
            &button.label,
            button.target.center(),
            28.0,
            button.text_color,
            framebuffer,
        );
    }

    pub fn health_bar(
        &self,
        target: Aabb2<f32>,
        ratio: f32,
        framebuffer: &mut ugli::Framebuffer,
    ) {
        self.quad(target, self.palette.health_back, framebuffer);
        let size = target.size();
        self.quad(
            rect(target.min.x, target.min.y, size.x * ratio.clamp(0.0, 1.0), size.y),
            self.palette.health_fill,
            framebuffer,
        );
        self.outline(target, 2.0, self.palette.white, framebuffer);
    }
}

#[derive(Debug, Clone)]
pub struct MenuButton {
    pub target: Aabb2<f32>,
    pub label: String,
    pub color: Color,
    pub text_color: Color,
}

impl MenuButton {
    pub fn new(target: Aabb2<f32>, label: &str, color: Color, text_color: Color) -> Self {
        Self {
            target,
            label: label.to_owned(),
            color,
            text_color,
        }
    }

    pub fn contains(&self, pos: vec2<f32>) -> bool {
        self.target.contains(pos)
    }
}
