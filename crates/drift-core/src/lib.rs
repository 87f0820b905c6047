pub mod camera;
pub mod constants;
pub mod drift;
pub mod field;
pub mod overlay;
pub mod params;
pub mod picking;
pub mod session;
pub mod tasks;
pub mod transition;
pub mod view;

pub use camera::*;
pub use constants::*;
pub use drift::*;
pub use field::*;
pub use overlay::*;
pub use params::*;
pub use picking::*;
pub use session::*;
pub use tasks::*;
pub use transition::*;
pub use view::*;
