pub mod error;
pub mod geometry;
pub mod input;
pub mod mode;
pub mod options;
pub mod scheduler;
pub mod stroke;
pub mod surface;

pub use error::SurfaceError;
pub use geometry::{Point, Segment};
pub use input::{InputDevice, InputEvent, InputHandler, InputSource, ManualInput};
pub use mode::{CompositeOperation, Mode};
pub use options::{ContextOptions, SurfaceConfig};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use stroke::{DrawState, StrokeSurface};
pub use surface::{RecordingSurface, SurfaceCall, SurfaceHandle};
