pub mod blocks;
pub mod ci;
pub mod context;
pub mod error;
pub mod json;
pub mod live_region;
pub mod output;
pub mod primitives;
pub mod prompt;
pub mod sink;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
