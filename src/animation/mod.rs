//! Per-window property animation.
//!
//! - [`AnimationRecord`]: one attribute animating between two values
//! - [`AnimationScheduler`]: owns records per window and advances them
//! - [`AttributeValues`]: the per-attribute result handed to the paint step

mod attribute;
mod record;
mod scheduler;
mod value;
mod values;

pub use attribute::{Attribute, WindowType, WindowTypeMask};
pub use record::{AnimationRecord, AnimationSpec, DescribeRecord, RecordState};
pub use scheduler::{AnimationId, AnimationScheduler, WindowId};
pub use value::FPx2;
pub use values::AttributeValues;
