//! One module per tool. Each exposes `run(config, args)` returning the path
//! it wrote, plus the pure rendering pieces the tests drive directly.

pub mod anomalies;
pub mod etopo;
pub mod groundtrack;
pub mod lwe;
pub mod orbit3d;

pub use anomalies::AnomaliesArgs;
pub use etopo::EtopoArgs;
pub use groundtrack::GroundTrackArgs;
pub use lwe::{LweAnimateArgs, LweExploreArgs};
pub use orbit3d::Orbit3dArgs;
