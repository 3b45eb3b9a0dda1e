//! Presentation layer: page model and role renderers

mod host;
mod page;
mod player;
mod renderer;
mod templates;

pub use host::HostRenderer;
pub use page::{
    Element, Page, Region, UiAction, BUZZ_REGION, CONTENT_REGION, PLAYER_INFO_REGION,
};
pub use player::PlayerRenderer;
pub use renderer::{base, Renderer};
pub use templates::{default_templates, TemplateKey, REFUSAL_REASONS_ID};
