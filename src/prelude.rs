pub use generational_arena::{Arena, Index as Id};
pub use geng::prelude::*;
pub use geng_utils::conversions::*;

pub use crate::{assets::*, audio::*, config::*, model::*, render::*};

pub type Color = Rgba<f32>;
