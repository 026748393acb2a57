pub mod encode_decode;
pub mod position;
pub mod tour;
pub mod vec2d;
pub mod visit_record;

pub use position::{Bounds, Position};
pub use tour::Tour;
pub use vec2d::Vec2D;
pub use visit_record::VisitRecord;
