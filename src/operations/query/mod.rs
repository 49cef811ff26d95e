mod bounding_box;
mod classify;
mod validate_closed;
mod volume;

pub use bounding_box::{Aabb, BoundingBox};
pub use classify::{classify_point_in_mesh, PointClassification};
pub use validate_closed::ValidateClosed;
pub use volume::Volume;
