//! Navigation over the row sequence

mod zoom;

pub use zoom::ZoomWindow;
