/// BSP tree and region command.
pub mod bsp;
/// Fragment listing command.
pub mod fragments;
/// File-level information command.
pub mod info;
/// Skeleton and animation command.
pub mod skeleton;
/// String table dump command.
pub mod strings;

mod util;
