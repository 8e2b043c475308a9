//! Project scheduling domain models.
//!
//! Provides the data types for representing multi-mode resource-constrained
//! project scheduling problems and their decoded schedules.
//!
//! # Domain Mappings
//!
//! | u-mrcpsp | Construction | Software | Manufacturing |
//! |----------|--------------|----------|---------------|
//! | Activity | Work package | Task | Operation |
//! | Mode | Crew size option | Staffing plan | Machine setting |
//! | Renewable resource | Crew / crane | Developers | Machines |
//! | Schedule | Site plan | Release plan | Production plan |

mod activity;
mod problem;
mod schedule;

pub use activity::{Activity, Mode};
pub use problem::{ProblemData, ProjectTables};
pub use schedule::{Schedule, ScheduledActivity, Violation, ViolationType};
