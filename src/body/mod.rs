pub mod angles;
pub mod frame;
pub mod joint;

pub use angles::{AngleJoint, JointAngles};
pub use frame::{Frame, TrackedBody};
pub use joint::{ConfidenceLevel, Joint, JointId, Skeleton};
